//! BuildFile entity
//!
//! The structured form of one BUILD file: an ordered list of statements plus
//! the comments attached to them. Reconciliation mutates it in place by
//! patching call arguments or appending new statements; nothing is reordered.

use std::path::{Path, PathBuf};

/// Comments attached to a statement, argument or list element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    /// Whole-line comments directly above the node, `#` included
    pub before: Vec<String>,
    /// Comment on the same line after the node
    pub suffix: Option<String>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.suffix.is_none()
    }
}

/// A parsed build file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFile {
    pub path: PathBuf,
    pub stmts: Vec<Stmt>,
    /// Comments after the last statement
    pub trailing_comments: Vec<String>,
}

/// One top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub comments: Comments,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self {
            comments: Comments::default(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// Bare expression, usually a rule call
    Expr(Expr),
    /// `NAME = value`
    Assign { target: String, value: Expr },
    /// Comment block separated from the next statement by a blank line;
    /// the lines live in `Stmt::comments.before`
    Comment,
}

/// Expression forms of the declarative BUILD dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Identifier or dotted name (`True`, `native.glob`)
    Ident(String),
    /// Integer literal, kept as written
    Int(String),
    /// String literal, unescaped
    Str(String),
    /// String literal printed exactly as written, quotes and prefix included:
    /// raw strings and strings holding byte escapes above `\x7f`
    Verbatim(String),
    List(Seq),
    Tuple(Seq),
    Dict(DictExpr),
    Call(CallExpr),
    Paren(Box<Expr>),
    Binary {
        lhs: Box<Expr>,
        op: String,
        rhs: Box<Expr>,
        /// Comments between the operator and the right operand
        comments: Vec<String>,
    },
}

impl Expr {
    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    /// A list of string literals
    pub fn string_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::List(Seq::new(values.into_iter().map(|v| Expr::Str(v.into()))))
    }

    /// Value of a string literal, when it is valid UTF-8 text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Str(s) => Some(s),
            Expr::Verbatim(token) => raw_string_value(token),
            _ => None,
        }
    }
}

/// Body of an `r`-prefixed literal, which is also its value
fn raw_string_value(token: &str) -> Option<&str> {
    let body = token.strip_prefix(|c: char| c == 'r' || c == 'R')?;
    ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find_map(|q| body.strip_prefix(q)?.strip_suffix(q))
}

/// Elements of a list or tuple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seq {
    pub items: Vec<Item>,
    /// Comments between the last element and the closing bracket
    pub trailing: Vec<String>,
}

impl Seq {
    pub fn new(values: impl IntoIterator<Item = Expr>) -> Self {
        Self {
            items: values.into_iter().map(Item::new).collect(),
            trailing: Vec::new(),
        }
    }

    pub fn has_comments(&self) -> bool {
        !self.trailing.is_empty() || self.items.iter().any(|i| !i.comments.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub comments: Comments,
    pub value: Expr,
}

impl Item {
    pub fn new(value: Expr) -> Self {
        Self {
            comments: Comments::default(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictExpr {
    pub entries: Vec<DictEntry>,
    pub trailing: Vec<String>,
}

impl DictExpr {
    pub fn has_comments(&self) -> bool {
        !self.trailing.is_empty() || self.entries.iter().any(|e| !e.comments.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub comments: Comments,
    pub key: Expr,
    pub value: Expr,
}

/// A function call; at statement level this is a rule declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallExpr {
    pub func: String,
    pub args: Vec<Arg>,
    pub trailing: Vec<String>,
}

/// Positional (`name == None`) or keyword argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub comments: Comments,
    pub name: Option<String>,
    pub value: Expr,
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Self {
            comments: Comments::default(),
            name: None,
            value,
        }
    }

    pub fn keyword(name: impl Into<String>, value: Expr) -> Self {
        Self {
            comments: Comments::default(),
            name: Some(name.into()),
            value,
        }
    }
}

impl CallExpr {
    pub fn new(func: impl Into<String>) -> Self {
        Self {
            func: func.into(),
            ..Self::default()
        }
    }

    pub fn has_comments(&self) -> bool {
        !self.trailing.is_empty() || self.args.iter().any(|a| !a.comments.is_empty())
    }

    /// Value of a keyword argument
    pub fn attr(&self, name: &str) -> Option<&Expr> {
        self.args
            .iter()
            .find(|a| a.name.as_deref() == Some(name))
            .map(|a| &a.value)
    }

    /// Replace a keyword argument's value in place, or append it if absent
    ///
    /// Comments on an existing argument stay where they are.
    pub fn set_attr(&mut self, name: &str, value: Expr) {
        match self
            .args
            .iter_mut()
            .find(|a| a.name.as_deref() == Some(name))
        {
            Some(arg) => arg.value = value,
            None => self.args.push(Arg::keyword(name, value)),
        }
    }

    /// The `name = "..."` attribute of a rule
    pub fn rule_name(&self) -> Option<&str> {
        self.attr("name").and_then(Expr::as_str)
    }

    /// String elements of a list attribute; empty if absent or not a list
    pub fn attr_strings(&self, name: &str) -> Vec<&str> {
        match self.attr(name) {
            Some(Expr::List(seq)) => seq.items.iter().filter_map(|i| i.value.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl BuildFile {
    pub fn new(path: impl AsRef<Path>, stmts: Vec<Stmt>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            stmts,
            trailing_comments: Vec::new(),
        }
    }

    /// Top-level calls to `kind`, in file order
    pub fn rules<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a CallExpr> + 'a {
        self.stmts.iter().filter_map(move |stmt| match &stmt.kind {
            StmtKind::Expr(Expr::Call(call)) if call.func == kind => Some(call),
            _ => None,
        })
    }

    /// Mutable view of [`BuildFile::rules`]
    pub fn rules_mut<'a>(
        &'a mut self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a mut CallExpr> + 'a {
        self.stmts.iter_mut().filter_map(move |stmt| match &mut stmt.kind {
            StmtKind::Expr(Expr::Call(call)) if call.func == kind => Some(call),
            _ => None,
        })
    }

    /// Append a rule declaration at the end of the file
    pub fn push_rule(&mut self, call: CallExpr) {
        self.stmts.push(Stmt::new(StmtKind::Expr(Expr::Call(call))));
    }
}
