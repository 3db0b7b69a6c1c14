//! Desired grouping rules
//!
//! What a directory's build file must declare, independent of syntax.
//! Converted into a `CallExpr` only when appended or patched.

use super::build_file::{Arg, CallExpr, Expr, Seq};

/// Name of the rule covering every file under a directory
pub const SRCS_RULE: &str = "srcs";

/// Name of the rule covering a directory and all gardened descendants
pub const RECURSIVE_SRCS_RULE: &str = "recursive-srcs";

/// Glob pattern matching every file below the package
pub const ALL_FILES_PATTERN: &str = "**";

/// The two shapes a `srcs` attribute can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SrcsValue {
    /// `glob(["**"])`
    AllFiles,
    /// An ordered list of label references
    Labels(Vec<String>),
}

impl SrcsValue {
    pub fn to_expr(&self) -> Expr {
        match self {
            SrcsValue::AllFiles => Expr::Call(CallExpr {
                func: "glob".to_string(),
                args: vec![Arg::positional(Expr::string_list([ALL_FILES_PATTERN]))],
                trailing: Vec::new(),
            }),
            SrcsValue::Labels(labels) => {
                Expr::List(Seq::new(labels.iter().map(|l| Expr::str(l.as_str()))))
            }
        }
    }
}

/// A grouping rule the tool wants to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRule {
    pub kind: String,
    pub name: String,
    pub srcs: SrcsValue,
    pub tags: Vec<String>,
}

impl DesiredRule {
    /// Full rule statement: `kind(name = ..., srcs = ..., tags = [...])`
    pub fn to_call(&self) -> CallExpr {
        CallExpr {
            func: self.kind.clone(),
            args: vec![
                Arg::keyword("name", Expr::str(self.name.as_str())),
                Arg::keyword("srcs", self.srcs.to_expr()),
                Arg::keyword("tags", Expr::string_list(self.tags.iter().map(String::as_str))),
            ],
            trailing: Vec::new(),
        }
    }
}
