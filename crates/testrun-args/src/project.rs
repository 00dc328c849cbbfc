use crate::configuration::Configuration;
use crate::error::{ArgumentError, Result};
use crate::reporter::{select_reporter, ReporterRegistry, RunnerReporter};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One test binary and the settings that apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyConfig {
    pub assembly_file: PathBuf,
    pub config_file: Option<PathBuf>,
    pub configuration: Configuration,
}

impl AssemblyConfig {
    pub fn new(assembly_file: PathBuf) -> Self {
        Self {
            assembly_file,
            config_file: None,
            configuration: Configuration::default(),
        }
    }
}

/// A fully parsed invocation.
#[derive(Debug, Clone)]
pub struct Project {
    assemblies: Vec<AssemblyConfig>,
    configuration: Configuration,
    outputs: BTreeMap<String, PathBuf>,
    reporter: Arc<dyn RunnerReporter>,
}

impl Project {
    pub fn assemblies(&self) -> &[AssemblyConfig] {
        &self.assemblies
    }

    /// Project-wide settings such as `-nologo` or `-wait`.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Transform id (lower case) to output file.
    pub fn outputs(&self) -> &BTreeMap<String, PathBuf> {
        &self.outputs
    }

    pub fn output(&self, transform_id: &str) -> Option<&Path> {
        self.outputs
            .get(&transform_id.to_lowercase())
            .map(PathBuf::as_path)
    }

    pub fn reporter(&self) -> &Arc<dyn RunnerReporter> {
        &self.reporter
    }
}

/// Mutable state accumulated while the dispatcher walks the arguments.
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    assemblies: Vec<AssemblyConfig>,
    configuration: Configuration,
    outputs: BTreeMap<String, PathBuf>,
    explicit_reporter: Option<Arc<dyn RunnerReporter>>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_assembly(&mut self, assembly: AssemblyConfig) {
        self.assemblies.push(assembly);
    }

    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    pub fn set_output(&mut self, transform_id: &str, path: PathBuf) {
        self.outputs.insert(transform_id.to_lowercase(), path);
    }

    /// Record an explicitly requested reporter. Naming the same reporter twice
    /// is harmless; naming a second one is an error.
    pub fn choose_reporter(&mut self, reporter: Arc<dyn RunnerReporter>) -> Result<()> {
        match &self.explicit_reporter {
            Some(existing) if !Arc::ptr_eq(existing, &reporter) => {
                Err(ArgumentError::MultipleReporters)
            }
            _ => {
                self.explicit_reporter = Some(reporter);
                Ok(())
            }
        }
    }

    /// Freeze the project and pick its reporter.
    pub fn build(self, reporters: &ReporterRegistry) -> Result<Project> {
        if self.assemblies.is_empty() {
            return Err(ArgumentError::MissingAssembly);
        }

        let reporter = select_reporter(
            reporters,
            self.explicit_reporter.as_ref(),
            self.configuration.no_auto_reporters_or_default(),
        );

        Ok(Project {
            assemblies: self.assemblies,
            configuration: self.configuration,
            outputs: self.outputs,
            reporter,
        })
    }
}
