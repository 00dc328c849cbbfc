//! The switch vocabulary.
//!
//! Built-in switches are declared once in [`BUILTIN_SWITCHES`]. A
//! [`SwitchTable`] adds one switch per registered transform and reporter and
//! answers case-insensitive lookups.

use crate::configuration::{Configuration, Filters, TraitMap};
use crate::reporter::{ReporterRegistry, RunnerReporter};
use crate::transform::{Transform, TransformRegistry};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock};
use tracing::warn;

pub const SWITCH_PREFIX: char = '-';

/// Which configuration a switch writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Project,
    Assembly,
}

pub type FlagField = fn(&mut Configuration) -> &mut Option<bool>;
pub type FilterField = fn(&mut Filters) -> &mut BTreeSet<String>;
pub type TraitField = fn(&mut Filters) -> &mut TraitMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Culture,
    MaxThreads,
    Parallel,
}

#[derive(Debug, Clone)]
pub enum SwitchKind {
    Flag { scope: Scope, field: FlagField },
    Value(ValueKind),
    Filter(FilterField),
    Trait(TraitField),
    Transform(Arc<dyn Transform>),
    Reporter(Arc<dyn RunnerReporter>),
}

#[derive(Debug, Clone)]
pub struct BuiltinSwitch {
    pub name: &'static str,
    pub argument: Option<&'static str>,
    pub description: &'static str,
    pub kind: SwitchKind,
}

fn flag(
    name: &'static str,
    scope: Scope,
    field: FlagField,
    description: &'static str,
) -> BuiltinSwitch {
    BuiltinSwitch {
        name,
        argument: None,
        description,
        kind: SwitchKind::Flag { scope, field },
    }
}

fn valued(
    name: &'static str,
    argument: &'static str,
    kind: SwitchKind,
    description: &'static str,
) -> BuiltinSwitch {
    BuiltinSwitch {
        name,
        argument: Some(argument),
        description,
        kind,
    }
}

#[rustfmt::skip]
pub static BUILTIN_SWITCHES: LazyLock<Vec<BuiltinSwitch>> = LazyLock::new(|| {
    use Scope::{Assembly, Project};

    vec![
        flag("-debug", Project, |c| &mut c.debug, "launch the debugger to debug the tests"),
        flag("-diagnostics", Assembly, |c| &mut c.diagnostic_messages, "enable diagnostics messages for all test assemblies"),
        flag("-failskips", Assembly, |c| &mut c.fail_skips, "convert skipped tests into failures"),
        flag("-ignorefailures", Assembly, |c| &mut c.ignore_failures, "if tests fail, do not return a failure exit code"),
        flag("-internaldiagnostics", Assembly, |c| &mut c.internal_diagnostic_messages, "enable internal diagnostics messages for all test assemblies"),
        flag("-noautoreporters", Project, |c| &mut c.no_auto_reporters, "do not allow reporters to be auto-enabled by environment"),
        flag("-nocolor", Project, |c| &mut c.no_color, "do not output results with colors"),
        flag("-nologo", Project, |c| &mut c.no_logo, "do not show the copyright message"),
        flag("-pause", Project, |c| &mut c.pause, "wait for input before running tests"),
        flag("-preenumeratetheories", Assembly, |c| &mut c.pre_enumerate_theories, "enable theory pre-enumeration (disabled by default)"),
        flag("-stoponfail", Assembly, |c| &mut c.stop_on_fail, "stop on first test failure"),
        flag("-wait", Project, |c| &mut c.wait, "wait for input after completion"),
        valued("-culture", "<option>", SwitchKind::Value(ValueKind::Culture), "run tests under the given culture: default, invariant, or a culture name"),
        valued("-maxthreads", "<option>", SwitchKind::Value(ValueKind::MaxThreads), "maximum thread count for collection parallelization: default, unlimited, a number, or a multiplier like 2x"),
        valued("-parallel", "<option>", SwitchKind::Value(ValueKind::Parallel), "set parallelization based on option: none or collections"),
        valued("-namespace", "<name>", SwitchKind::Filter(|f| &mut f.included_namespaces), "run all methods in a given namespace"),
        valued("-nonamespace", "<name>", SwitchKind::Filter(|f| &mut f.excluded_namespaces), "do not run any methods in a given namespace"),
        valued("-class", "<name>", SwitchKind::Filter(|f| &mut f.included_classes), "run all methods in a given test class"),
        valued("-noclass", "<name>", SwitchKind::Filter(|f| &mut f.excluded_classes), "do not run any methods in a given test class"),
        valued("-method", "<name>", SwitchKind::Filter(|f| &mut f.included_methods), "run a given test method"),
        valued("-nomethod", "<name>", SwitchKind::Filter(|f| &mut f.excluded_methods), "do not run a given test method"),
        valued("-trait", "\"name=value\"", SwitchKind::Trait(|f| &mut f.included_traits), "only run tests with matching name/value traits"),
        valued("-notrait", "\"name=value\"", SwitchKind::Trait(|f| &mut f.excluded_traits), "do not run tests with matching name/value traits"),
    ]
});

/// Case-insensitive switch lookup for one parse.
#[derive(Debug, Clone)]
pub struct SwitchTable {
    switches: HashMap<String, SwitchKind>,
}

impl SwitchTable {
    pub fn new(reporters: &ReporterRegistry, transforms: &TransformRegistry) -> Self {
        let mut table = Self {
            switches: HashMap::new(),
        };

        for switch in BUILTIN_SWITCHES.iter() {
            table.register(switch.name, switch.kind.clone());
        }
        for transform in transforms.transforms() {
            let name = format!("{}{}", SWITCH_PREFIX, transform.id());
            table.register(&name, SwitchKind::Transform(Arc::clone(transform)));
        }
        for reporter in reporters.reporters() {
            if let Some(switch) = reporter.switch_name() {
                let name = format!("{}{}", SWITCH_PREFIX, switch);
                table.register(&name, SwitchKind::Reporter(Arc::clone(reporter)));
            }
        }

        table
    }

    fn register(&mut self, name: &str, kind: SwitchKind) {
        let key = name.to_uppercase();
        if self.switches.contains_key(&key) {
            warn!(switch = name, "switch is already registered, ignoring duplicate");
            return;
        }
        self.switches.insert(key, kind);
    }

    pub fn lookup(&self, token: &str) -> Option<&SwitchKind> {
        self.switches.get(&token.to_uppercase())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.switches.len()
    }
}

/// `(switch with argument placeholder, description)` rows for the usage screen.
pub fn usage(reporters: &ReporterRegistry, transforms: &TransformRegistry) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = BUILTIN_SWITCHES
        .iter()
        .map(|s| {
            let switch = match s.argument {
                Some(argument) => format!("{} {}", s.name, argument),
                None => s.name.to_string(),
            };
            (switch, s.description.to_string())
        })
        .collect();

    rows.extend(reporters.reporters().iter().filter_map(|r| {
        r.switch_name()
            .map(|name| (format!("{}{}", SWITCH_PREFIX, name), r.description().to_string()))
    }));

    rows.extend(transforms.transforms().iter().map(|t| {
        (
            format!("{}{} <filename>", SWITCH_PREFIX, t.id()),
            t.description().to_string(),
        )
    }));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::testing::StubReporter;

    fn registries() -> (ReporterRegistry, TransformRegistry) {
        let reporters = ReporterRegistry::new(StubReporter::default_reporter())
            .with(StubReporter::new("verbose"))
            .with(StubReporter::new("nologo"));
        (reporters, TransformRegistry::builtin())
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (reporters, transforms) = registries();
        let table = SwitchTable::new(&reporters, &transforms);

        assert!(matches!(table.lookup("-maxthreads"), Some(SwitchKind::Value(ValueKind::MaxThreads))));
        assert!(matches!(table.lookup("-MAXTHREADS"), Some(SwitchKind::Value(ValueKind::MaxThreads))));
        assert!(matches!(table.lookup("-Xml"), Some(SwitchKind::Transform(_))));
        assert!(matches!(table.lookup("-VERBOSE"), Some(SwitchKind::Reporter(_))));
        assert!(table.lookup("-foo").is_none());
        assert!(table.lookup("maxthreads").is_none());
    }

    #[test]
    fn test_builtin_switch_shadows_reporter() {
        let (reporters, transforms) = registries();
        let table = SwitchTable::new(&reporters, &transforms);

        assert!(matches!(table.lookup("-nologo"), Some(SwitchKind::Flag { scope: Scope::Project, .. })));
        assert_eq!(
            table.len(),
            BUILTIN_SWITCHES.len() + transforms.transforms().len() + 1
        );
    }

    #[test]
    fn test_flag_field_targets_configuration() {
        let switch = BUILTIN_SWITCHES
            .iter()
            .find(|s| s.name == "-stoponfail")
            .unwrap();
        let mut config = Configuration::default();
        if let SwitchKind::Flag { field, scope } = &switch.kind {
            assert_eq!(*scope, Scope::Assembly);
            *field(&mut config) = Some(true);
        }
        assert_eq!(config.stop_on_fail, Some(true));
    }

    #[test]
    fn test_usage_lists_every_switch() {
        let (reporters, transforms) = registries();
        let rows = usage(&reporters, &transforms);

        assert_eq!(
            rows.len(),
            BUILTIN_SWITCHES.len() + reporters.reporters().len() + transforms.transforms().len()
        );
        assert!(rows.iter().any(|(s, _)| s == "-maxthreads <option>"));
        assert!(rows.iter().any(|(s, _)| s == "-trait \"name=value\""));
        assert!(rows.iter().any(|(s, _)| s == "-verbose"));
        assert!(rows.iter().any(|(s, _)| s == "-html <filename>"));
    }
}
