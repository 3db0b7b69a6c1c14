//! Canonical BUILD file printer
//!
//! Layout rules:
//! - one blank line between top-level statements, four-space indentation
//! - rule calls with keyword arguments put one argument per line
//! - lists with more than one element, or with comments, put one element per line
//! - a call whose only argument is positional hugs it: `glob([...])`
//! - strings are always double quoted; raw strings are kept as written
//! - a comment block standing apart from the next statement keeps its blank line
//!
//! Printing the result of parsing printed output yields the same bytes.

use crate::domain::entities::{BuildFile, CallExpr, Comments, DictExpr, Expr, Seq, StmtKind};

const INDENT: &str = "    ";

/// Print a build file in canonical form
pub fn format_build_file(file: &BuildFile) -> String {
    let mut p = Printer::default();

    for (idx, stmt) in file.stmts.iter().enumerate() {
        if idx > 0 {
            p.out.push('\n');
        }
        p.comment_lines(&stmt.comments.before, 0);
        match &stmt.kind {
            StmtKind::Comment => continue,
            StmtKind::Expr(Expr::Call(call)) => p.call(call, 0, true),
            StmtKind::Expr(expr) => p.expr(expr, 0),
            StmtKind::Assign { target, value } => {
                p.out.push_str(target);
                p.out.push_str(" = ");
                p.expr(value, 0);
            }
        }
        p.suffix(&stmt.comments);
        p.out.push('\n');
    }

    if !file.trailing_comments.is_empty() {
        if !file.stmts.is_empty() {
            p.out.push('\n');
        }
        p.comment_lines(&file.trailing_comments, 0);
    }

    p.out
}

/// Whether an expression spans more than one line when printed
fn is_multiline(expr: &Expr) -> bool {
    match expr {
        Expr::List(seq) => {
            seq.items.len() > 1
                || seq.has_comments()
                || seq.items.iter().any(|i| is_multiline(&i.value))
        }
        Expr::Tuple(seq) => seq.has_comments() || seq.items.iter().any(|i| is_multiline(&i.value)),
        Expr::Dict(dict) => {
            dict.entries.len() > 1
                || dict.has_comments()
                || dict.entries.iter().any(|e| is_multiline(&e.value))
        }
        Expr::Call(call) => call_is_broken(call, false),
        Expr::Paren(inner) => is_multiline(inner),
        Expr::Binary {
            lhs, rhs, comments, ..
        } => !comments.is_empty() || is_multiline(lhs) || is_multiline(rhs),
        Expr::Ident(_) | Expr::Int(_) | Expr::Str(_) | Expr::Verbatim(_) => false,
    }
}

fn call_is_broken(call: &CallExpr, statement: bool) -> bool {
    call.has_comments()
        || call.args.iter().any(|a| is_multiline(&a.value))
        || (statement && call.args.iter().any(|a| a.name.is_some()))
}

/// Double-quoted string literal
///
/// Control characters other than newline, tab and carriage return are
/// written as three-digit octal escapes, so a following digit is never
/// absorbed into the escape.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
    }

    fn comment_lines(&mut self, comments: &[String], level: usize) {
        for c in comments {
            self.indent(level);
            self.out.push_str(c);
            self.out.push('\n');
        }
    }

    fn suffix(&mut self, comments: &Comments) {
        if let Some(c) = &comments.suffix {
            self.out.push_str("  ");
            self.out.push_str(c);
        }
    }

    fn expr(&mut self, expr: &Expr, level: usize) {
        match expr {
            Expr::Ident(s) | Expr::Int(s) => self.out.push_str(s),
            Expr::Str(s) => self.out.push_str(&quote(s)),
            Expr::Verbatim(token) => self.out.push_str(token),
            Expr::List(seq) => self.seq(seq, '[', ']', is_multiline(expr), level),
            Expr::Tuple(seq) => {
                if !is_multiline(expr) && seq.items.len() == 1 {
                    self.out.push('(');
                    self.expr(&seq.items[0].value, level);
                    self.out.push_str(",)");
                } else {
                    self.seq(seq, '(', ')', is_multiline(expr), level);
                }
            }
            Expr::Dict(dict) => self.dict(dict, is_multiline(expr), level),
            Expr::Call(call) => self.call(call, level, false),
            Expr::Paren(inner) => {
                self.out.push('(');
                self.expr(inner, level);
                self.out.push(')');
            }
            Expr::Binary {
                lhs,
                op,
                rhs,
                comments,
            } => {
                self.expr(lhs, level);
                self.out.push(' ');
                self.out.push_str(op);
                match comments.split_first() {
                    None => {
                        self.out.push(' ');
                        self.expr(rhs, level);
                    }
                    Some((first, rest)) => {
                        self.out.push_str("  ");
                        self.out.push_str(first);
                        self.out.push('\n');
                        self.comment_lines(rest, level + 1);
                        self.indent(level + 1);
                        self.expr(rhs, level + 1);
                    }
                }
            }
        }
    }

    fn seq(&mut self, seq: &Seq, open: char, close: char, multiline: bool, level: usize) {
        self.out.push(open);
        if multiline {
            self.out.push('\n');
            for item in &seq.items {
                self.comment_lines(&item.comments.before, level + 1);
                self.indent(level + 1);
                self.expr(&item.value, level + 1);
                self.out.push(',');
                self.suffix(&item.comments);
                self.out.push('\n');
            }
            self.comment_lines(&seq.trailing, level + 1);
            self.indent(level);
        } else {
            for (idx, item) in seq.items.iter().enumerate() {
                if idx > 0 {
                    self.out.push_str(", ");
                }
                self.expr(&item.value, level);
            }
        }
        self.out.push(close);
    }

    fn dict(&mut self, dict: &DictExpr, multiline: bool, level: usize) {
        self.out.push('{');
        if multiline {
            self.out.push('\n');
            for entry in &dict.entries {
                self.comment_lines(&entry.comments.before, level + 1);
                self.indent(level + 1);
                self.expr(&entry.key, level + 1);
                self.out.push_str(": ");
                self.expr(&entry.value, level + 1);
                self.out.push(',');
                self.suffix(&entry.comments);
                self.out.push('\n');
            }
            self.comment_lines(&dict.trailing, level + 1);
            self.indent(level);
        } else {
            for (idx, entry) in dict.entries.iter().enumerate() {
                if idx > 0 {
                    self.out.push_str(", ");
                }
                self.expr(&entry.key, level);
                self.out.push_str(": ");
                self.expr(&entry.value, level);
            }
        }
        self.out.push('}');
    }

    fn call(&mut self, call: &CallExpr, level: usize, statement: bool) {
        self.out.push_str(&call.func);
        self.out.push('(');

        if !call_is_broken(call, statement) {
            for (idx, arg) in call.args.iter().enumerate() {
                if idx > 0 {
                    self.out.push_str(", ");
                }
                if let Some(name) = &arg.name {
                    self.out.push_str(name);
                    self.out.push_str(" = ");
                }
                self.expr(&arg.value, level);
            }
            self.out.push(')');
            return;
        }

        if let [only] = call.args.as_slice() {
            if only.name.is_none() && only.comments.is_empty() && call.trailing.is_empty() {
                self.expr(&only.value, level);
                self.out.push(')');
                return;
            }
        }

        self.out.push('\n');
        for arg in &call.args {
            self.comment_lines(&arg.comments.before, level + 1);
            self.indent(level + 1);
            if let Some(name) = &arg.name {
                self.out.push_str(name);
                self.out.push_str(" = ");
            }
            self.expr(&arg.value, level + 1);
            self.out.push(',');
            self.suffix(&arg.comments);
            self.out.push('\n');
        }
        self.comment_lines(&call.trailing, level + 1);
        self.indent(level);
        self.out.push(')');
    }
}
