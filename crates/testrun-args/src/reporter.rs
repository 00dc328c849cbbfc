//! Reporter capability, registry, and the selection policy.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Anything that can report results. Only its identity and its
/// auto-activation predicate matter to the parser.
pub trait RunnerReporter: fmt::Debug + Send + Sync {
    /// Switch name without the leading `-`. `None` means the reporter can't be
    /// picked from the command line.
    fn switch_name(&self) -> Option<&str>;

    fn description(&self) -> &str;

    /// Whether ambient process conditions (typically CI environment
    /// variables) ask for this reporter.
    fn is_environmentally_enabled(&self) -> bool;
}

/// Ordered candidate reporters plus the fallback used when nothing else applies.
#[derive(Debug, Clone)]
pub struct ReporterRegistry {
    reporters: Vec<Arc<dyn RunnerReporter>>,
    default: Arc<dyn RunnerReporter>,
}

impl ReporterRegistry {
    pub fn new(default: Arc<dyn RunnerReporter>) -> Self {
        Self {
            reporters: Vec::new(),
            default,
        }
    }

    pub fn with(mut self, reporter: Arc<dyn RunnerReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    pub fn reporters(&self) -> &[Arc<dyn RunnerReporter>] {
        &self.reporters
    }

    pub fn default_reporter(&self) -> &Arc<dyn RunnerReporter> {
        &self.default
    }
}

/// Pick the active reporter.
///
/// Environmental detection wins over an explicit switch, unless
/// `no_auto_reporters` is set; in that case the explicit reporter (if any) is
/// used. The registry default is the last resort.
pub fn select_reporter(
    registry: &ReporterRegistry,
    explicit: Option<&Arc<dyn RunnerReporter>>,
    no_auto_reporters: bool,
) -> Arc<dyn RunnerReporter> {
    if !no_auto_reporters {
        if let Some(auto) = registry
            .reporters
            .iter()
            .find(|r| r.is_environmentally_enabled())
        {
            debug!(reporter = ?auto.switch_name(), "environmentally enabled reporter selected");
            return Arc::clone(auto);
        }
    }

    match explicit {
        Some(reporter) => {
            debug!(reporter = ?reporter.switch_name(), "explicit reporter selected");
            Arc::clone(reporter)
        }
        None => {
            debug!("default reporter selected");
            Arc::clone(&registry.default)
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug)]
    pub struct StubReporter {
        pub switch: Option<&'static str>,
        pub auto: bool,
    }

    impl StubReporter {
        pub fn new(switch: &'static str) -> Arc<dyn RunnerReporter> {
            Arc::new(Self {
                switch: Some(switch),
                auto: false,
            })
        }

        pub fn auto(switch: &'static str) -> Arc<dyn RunnerReporter> {
            Arc::new(Self {
                switch: Some(switch),
                auto: true,
            })
        }

        pub fn default_reporter() -> Arc<dyn RunnerReporter> {
            Arc::new(Self {
                switch: None,
                auto: false,
            })
        }
    }

    impl RunnerReporter for StubReporter {
        fn switch_name(&self) -> Option<&str> {
            self.switch
        }

        fn description(&self) -> &str {
            "stub"
        }

        fn is_environmentally_enabled(&self) -> bool {
            self.auto
        }
    }
}
