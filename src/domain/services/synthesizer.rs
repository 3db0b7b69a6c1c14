//! Rule Synthesizer
//!
//! Computes the canonical grouping rules for one directory from the labels
//! its descendants resolved to. Pure; no I/O.

use crate::domain::entities::{DesiredRule, SrcsValue, RECURSIVE_SRCS_RULE, SRCS_RULE};
use crate::domain::value_objects::TargetLabel;

/// Builds `srcs` / `recursive-srcs` definitions for a directory
#[derive(Debug, Clone)]
pub struct RuleSynthesizer {
    kind: String,
    managed_tag: String,
}

impl Default for RuleSynthesizer {
    fn default() -> Self {
        Self::new("filegroup", "automanaged")
    }
}

impl RuleSynthesizer {
    pub fn new(kind: impl Into<String>, managed_tag: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            managed_tag: managed_tag.into(),
        }
    }

    /// Desired rules for a directory whose gardened descendants resolved to `children`
    ///
    /// Always yields `srcs`; yields `recursive-srcs` second when `children`
    /// is non-empty, listing the children in order and then `:srcs`.
    pub fn synthesize(&self, children: &[TargetLabel]) -> Vec<DesiredRule> {
        let mut rules = vec![self.rule(SRCS_RULE, SrcsValue::AllFiles)];

        if !children.is_empty() {
            let mut labels: Vec<String> = children.iter().map(ToString::to_string).collect();
            labels.push(format!(":{}", SRCS_RULE));
            rules.push(self.rule(RECURSIVE_SRCS_RULE, SrcsValue::Labels(labels)));
        }

        rules
    }

    /// Outward name for a directory: `srcs` for leaves, `recursive-srcs` otherwise
    pub fn exported_name(children: &[TargetLabel]) -> &'static str {
        if children.is_empty() {
            SRCS_RULE
        } else {
            RECURSIVE_SRCS_RULE
        }
    }

    fn rule(&self, name: &str, srcs: SrcsValue) -> DesiredRule {
        DesiredRule {
            kind: self.kind.clone(),
            name: name.to_string(),
            srcs,
            tags: vec![self.managed_tag.clone()],
        }
    }
}
