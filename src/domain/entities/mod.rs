//! Domain entities

pub mod build_file;
pub mod rule;

pub use build_file::{
    Arg, BuildFile, CallExpr, Comments, DictEntry, DictExpr, Expr, Item, Seq, Stmt, StmtKind,
};
pub use rule::{DesiredRule, SrcsValue, ALL_FILES_PATTERN, RECURSIVE_SRCS_RULE, SRCS_RULE};
