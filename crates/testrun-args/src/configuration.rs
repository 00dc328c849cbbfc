//! Parsed settings and test filters.
//!
//! Every setting is optional. `None` means the switch was never given, and the
//! `*_or_default()` accessors supply the value a runner should use in that case.

use std::collections::{BTreeMap, BTreeSet};

/// Trait name to the set of accepted (or rejected) values.
pub type TraitMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub debug: Option<bool>,
    pub diagnostic_messages: Option<bool>,
    pub fail_skips: Option<bool>,
    pub ignore_failures: Option<bool>,
    pub internal_diagnostic_messages: Option<bool>,
    pub no_auto_reporters: Option<bool>,
    pub no_color: Option<bool>,
    pub no_logo: Option<bool>,
    pub pause: Option<bool>,
    pub pre_enumerate_theories: Option<bool>,
    pub stop_on_fail: Option<bool>,
    pub wait: Option<bool>,
    /// `Some("")` selects the invariant culture.
    pub culture: Option<String>,
    /// `-1` means unlimited.
    pub max_parallel_threads: Option<i32>,
    pub parallelize_test_collections: Option<bool>,
    pub filters: Filters,
}

impl Configuration {
    pub fn debug_or_default(&self) -> bool {
        self.debug.unwrap_or(false)
    }

    pub fn diagnostic_messages_or_default(&self) -> bool {
        self.diagnostic_messages.unwrap_or(false)
    }

    pub fn fail_skips_or_default(&self) -> bool {
        self.fail_skips.unwrap_or(false)
    }

    pub fn ignore_failures_or_default(&self) -> bool {
        self.ignore_failures.unwrap_or(false)
    }

    pub fn internal_diagnostic_messages_or_default(&self) -> bool {
        self.internal_diagnostic_messages.unwrap_or(false)
    }

    pub fn no_auto_reporters_or_default(&self) -> bool {
        self.no_auto_reporters.unwrap_or(false)
    }

    pub fn no_color_or_default(&self) -> bool {
        self.no_color.unwrap_or(false)
    }

    pub fn no_logo_or_default(&self) -> bool {
        self.no_logo.unwrap_or(false)
    }

    pub fn pause_or_default(&self) -> bool {
        self.pause.unwrap_or(false)
    }

    pub fn pre_enumerate_theories_or_default(&self) -> bool {
        self.pre_enumerate_theories.unwrap_or(false)
    }

    pub fn stop_on_fail_or_default(&self) -> bool {
        self.stop_on_fail.unwrap_or(false)
    }

    pub fn wait_or_default(&self) -> bool {
        self.wait.unwrap_or(false)
    }

    pub fn parallelize_test_collections_or_default(&self) -> bool {
        self.parallelize_test_collections.unwrap_or(false)
    }
}

/// Include/exclude filters accumulated from repeated switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub included_namespaces: BTreeSet<String>,
    pub excluded_namespaces: BTreeSet<String>,
    pub included_classes: BTreeSet<String>,
    pub excluded_classes: BTreeSet<String>,
    pub included_methods: BTreeSet<String>,
    pub excluded_methods: BTreeSet<String>,
    pub included_traits: TraitMap,
    pub excluded_traits: TraitMap,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.included_namespaces.is_empty()
            && self.excluded_namespaces.is_empty()
            && self.included_classes.is_empty()
            && self.excluded_classes.is_empty()
            && self.included_methods.is_empty()
            && self.excluded_methods.is_empty()
            && self.included_traits.is_empty()
            && self.excluded_traits.is_empty()
    }
}

/// Add `value` under `name`, creating the entry on first use.
pub fn add_trait(traits: &mut TraitMap, name: &str, value: &str) {
    traits
        .entry(name.to_string())
        .or_default()
        .insert(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unset() {
        let config = Configuration::default();
        assert_eq!(config.culture, None);
        assert_eq!(config.max_parallel_threads, None);
        assert_eq!(config.parallelize_test_collections, None);
        assert!(!config.debug_or_default());
        assert!(!config.wait_or_default());
        assert!(config.filters.is_empty());
    }

    #[test]
    fn test_add_trait_accumulates_values() {
        let mut traits = TraitMap::new();
        add_trait(&mut traits, "foo", "bar");
        add_trait(&mut traits, "foo", "baz");
        add_trait(&mut traits, "foo", "bar");

        assert_eq!(traits.len(), 1);
        let values: Vec<_> = traits["foo"].iter().map(String::as_str).collect();
        assert_eq!(values, vec!["bar", "baz"]);
    }

    #[test]
    fn test_filters_not_empty_with_trait() {
        let mut filters = Filters::default();
        add_trait(&mut filters.excluded_traits, "category", "slow");
        assert!(!filters.is_empty());
    }
}
