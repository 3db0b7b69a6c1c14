//! Reconciler
//!
//! Merges desired grouping rules into an existing `BuildFile`. Only rules
//! carrying the managed tag are ever modified, and only their `srcs`.

use std::collections::BTreeMap;

use crate::domain::entities::{BuildFile, DesiredRule};

/// What one reconciliation did, by rule name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Managed rules whose `srcs` was overwritten
    pub patched: Vec<String>,
    /// Rules appended because no same-named rule existed
    pub added: Vec<String>,
    /// Same-named rules left alone because they lack the managed tag
    pub kept_unmanaged: Vec<String>,
}

/// Patches managed rules and appends missing ones
#[derive(Debug, Clone)]
pub struct Reconciler {
    kind: String,
    managed_tag: String,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new("filegroup", "automanaged")
    }
}

impl Reconciler {
    pub fn new(kind: impl Into<String>, managed_tag: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            managed_tag: managed_tag.into(),
        }
    }

    /// Merge `desired` into `file` in place
    ///
    /// Existing rules keep their position and every attribute except `srcs`.
    /// Unmatched desired rules are appended in the order given.
    pub fn reconcile(&self, file: &mut BuildFile, desired: &[DesiredRule]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut pending: BTreeMap<&str, &DesiredRule> =
            desired.iter().map(|r| (r.name.as_str(), r)).collect();

        for rule in file.rules_mut(&self.kind) {
            let Some(name) = rule.rule_name().map(str::to_string) else {
                continue;
            };
            let Some(wanted) = pending.remove(name.as_str()) else {
                continue;
            };

            if rule.attr_strings("tags").contains(&self.managed_tag.as_str()) {
                rule.set_attr("srcs", wanted.srcs.to_expr());
                report.patched.push(name);
            } else {
                report.kept_unmanaged.push(name);
            }
        }

        for rule in desired {
            if pending.contains_key(rule.name.as_str()) {
                file.push_rule(rule.to_call());
                report.added.push(rule.name.clone());
            }
        }

        report
    }
}
