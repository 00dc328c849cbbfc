//! The argument dispatcher.
//!
//! Grammar: `<assembly> [<config.json>] [<switch> [<value>]]...`. The first
//! invalid token aborts the parse; there is no partial result.

use crate::configuration::{add_trait, Configuration};
use crate::error::{ArgumentError, Result};
use crate::fs::FileSystem;
use crate::project::{AssemblyConfig, Project, ProjectBuilder};
use crate::reporter::ReporterRegistry;
use crate::switches::{Scope, SwitchKind, SwitchTable, ValueKind, SWITCH_PREFIX};
use crate::transform::TransformRegistry;
use crate::values::{parse_culture, parse_max_threads, parse_parallel, parse_trait};
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Extension a second positional token needs to be taken as a config file.
pub const CONFIG_FILE_EXTENSION: &str = "json";

pub struct CommandLine<'a> {
    file_system: &'a dyn FileSystem,
    reporters: &'a ReporterRegistry,
    transforms: &'a TransformRegistry,
    processor_count: usize,
}

impl<'a> CommandLine<'a> {
    pub fn new(
        file_system: &'a dyn FileSystem,
        reporters: &'a ReporterRegistry,
        transforms: &'a TransformRegistry,
    ) -> Self {
        Self {
            file_system,
            reporters,
            transforms,
            processor_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    /// Override the processor count used to scale `-maxthreads` multipliers.
    pub fn processor_count(mut self, count: usize) -> Self {
        self.processor_count = count;
        self
    }

    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<Project> {
        let table = SwitchTable::new(self.reporters, self.transforms);
        let mut tokens = args.iter().map(|arg| arg.as_ref()).peekable();
        let mut builder = ProjectBuilder::new();

        let mut assembly = self.parse_assembly(&mut tokens)?;

        while let Some(token) = tokens.next() {
            let kind = match table.lookup(token) {
                Some(kind) if is_switch(token) => kind,
                _ => return Err(ArgumentError::UnknownOption(token.to_string())),
            };
            debug!(switch = token, "dispatching switch");

            match kind {
                SwitchKind::Flag { scope, field } => {
                    let config = match scope {
                        Scope::Project => builder.configuration_mut(),
                        Scope::Assembly => &mut assembly.configuration,
                    };
                    *field(config) = Some(true);
                }
                SwitchKind::Value(value_kind) => {
                    let value = take_value(&mut tokens)
                        .ok_or_else(|| ArgumentError::MissingArgument(token.to_lowercase()))?;
                    self.apply_value(*value_kind, value, &mut assembly.configuration)?;
                }
                SwitchKind::Filter(field) => {
                    let value = take_value(&mut tokens)
                        .ok_or_else(|| ArgumentError::MissingArgument(token.to_lowercase()))?;
                    field(&mut assembly.configuration.filters).insert(value.to_string());
                }
                SwitchKind::Trait(field) => {
                    let value = take_value(&mut tokens)
                        .ok_or_else(|| ArgumentError::MissingArgument(token.to_lowercase()))?;
                    let (name, trait_value) = parse_trait(value)
                        .ok_or_else(|| ArgumentError::IncorrectFormat(token.to_lowercase()))?;
                    add_trait(field(&mut assembly.configuration.filters), name, trait_value);
                }
                SwitchKind::Transform(transform) => {
                    let file = take_value(&mut tokens)
                        .ok_or_else(|| ArgumentError::MissingFilename(token.to_string()))?;
                    builder.set_output(transform.id(), PathBuf::from(file));
                }
                SwitchKind::Reporter(reporter) => {
                    builder.choose_reporter(Arc::clone(reporter))?;
                }
            }
        }

        builder.add_assembly(assembly);
        let project = builder.build(self.reporters)?;
        debug!(
            assemblies = project.assemblies().len(),
            reporter = ?project.reporter().switch_name(),
            "command line parsed"
        );
        Ok(project)
    }

    fn parse_assembly<'t, I>(&self, tokens: &mut Peekable<I>) -> Result<AssemblyConfig>
    where
        I: Iterator<Item = &'t str>,
    {
        let assembly = tokens
            .next_if(|t| !is_switch(t))
            .ok_or(ArgumentError::MissingAssembly)?;
        let mut config = AssemblyConfig::new(self.resolve_existing(assembly)?);

        if let Some(candidate) = tokens.next_if(|t| !is_switch(t)) {
            let resolved = self.resolve_existing(candidate)?;
            if !is_config_file(candidate) {
                return Err(ArgumentError::UnknownOption(candidate.to_string()));
            }
            config.config_file = Some(resolved);
        }

        debug!(
            assembly = %config.assembly_file.display(),
            config_file = ?config.config_file,
            "resolved assembly"
        );
        Ok(config)
    }

    fn resolve_existing(&self, token: &str) -> Result<PathBuf> {
        let path = Path::new(token);
        if !self.file_system.exists(path) {
            return Err(ArgumentError::FileNotFound(token.to_string()));
        }
        Ok(self.file_system.resolve_absolute(path))
    }

    fn apply_value(&self, kind: ValueKind, value: &str, config: &mut Configuration) -> Result<()> {
        match kind {
            ValueKind::Culture => config.culture = parse_culture(value),
            ValueKind::MaxThreads => {
                config.max_parallel_threads = parse_max_threads(value, self.processor_count)?
            }
            ValueKind::Parallel => config.parallelize_test_collections = Some(parse_parallel(value)?),
        }
        Ok(())
    }
}

fn is_switch(token: &str) -> bool {
    token.starts_with(SWITCH_PREFIX)
}

fn is_config_file(token: &str) -> bool {
    Path::new(token)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(CONFIG_FILE_EXTENSION))
}

/// The next token, if it is a value rather than another switch.
fn take_value<'t, I>(tokens: &mut Peekable<I>) -> Option<&'t str>
where
    I: Iterator<Item = &'t str>,
{
    tokens.next_if(|t| !is_switch(t))
}
