use std::sync::Arc;
use testrun_args::{ReporterRegistry, RunnerReporter};

/// A reporter known to the runner. It is auto-enabled when its CI
/// environment variable is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinReporter {
    switch: Option<&'static str>,
    description: &'static str,
    environment_variable: Option<&'static str>,
}

impl BuiltinReporter {
    pub const fn new(switch: &'static str, description: &'static str) -> Self {
        Self {
            switch: Some(switch),
            description,
            environment_variable: None,
        }
    }

    pub const fn detected_by(mut self, variable: &'static str) -> Self {
        self.environment_variable = Some(variable);
        self
    }
}

impl RunnerReporter for BuiltinReporter {
    fn switch_name(&self) -> Option<&str> {
        self.switch
    }

    fn description(&self) -> &str {
        self.description
    }

    fn is_environmentally_enabled(&self) -> bool {
        self.environment_variable
            .and_then(std::env::var_os)
            .map_or(false, |value| !value.is_empty())
    }
}

pub const DEFAULT_REPORTER: BuiltinReporter = BuiltinReporter {
    switch: None,
    description: "show standard progress messages",
    environment_variable: None,
};

pub const BUILTIN_REPORTERS: &[BuiltinReporter] = &[
    BuiltinReporter::new("verbose", "show verbose progress messages"),
    BuiltinReporter::new("quiet", "do not show progress messages"),
    BuiltinReporter::new("silent", "do not show any output"),
    BuiltinReporter::new("json", "show progress messages in JSON format"),
    BuiltinReporter::new("teamcity", "forces TeamCity mode (normally auto-detected)")
        .detected_by("TEAMCITY_PROJECT_NAME"),
    BuiltinReporter::new("appveyor", "forces AppVeyor CI mode (normally auto-detected)")
        .detected_by("APPVEYOR_API_URL"),
];

pub fn builtin_registry() -> ReporterRegistry {
    BUILTIN_REPORTERS.iter().fold(
        ReporterRegistry::new(Arc::new(DEFAULT_REPORTER)),
        |registry, reporter| registry.with(Arc::new(reporter.clone())),
    )
}
