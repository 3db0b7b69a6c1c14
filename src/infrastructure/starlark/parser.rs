//! BUILD file parser
//!
//! Parses the declarative subset of the BUILD language into `BuildFile`
//! statements. Comments are collected and attached to the statement,
//! argument or element that follows them (or trails them on the same line).
//! A comment block separated from the next statement by a blank line stays
//! a statement of its own.
//!
//! ## Grammar
//!
//! ```text
//! file      := (trivia statement suffix (newline | eof))* trivia
//! statement := IDENT '=' expr | expr
//! expr      := primary (op primary)*
//! primary   := STRING | INT | name call? | list | dict | tuple-or-paren
//! call      := '(' (arg (',' arg)* ','?)? ')'
//! arg       := IDENT '=' expr | expr
//! STRING    := ('r' | 'R')? (quote | triple-quote) ... closing quote
//! ```

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{
        char, digit1, line_ending, multispace0, not_line_ending, satisfy, space0,
    },
    combinator::{cut, eof, map, not, opt, peek, recognize},
    error::{context, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::domain::entities::{
    Arg, CallExpr, Comments, DictEntry, DictExpr, Expr, Item, Seq, Stmt, StmtKind,
};
use crate::domain::ports::ParseError;

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Statement keywords that are not allowed in BUILD files
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "def", "if", "elif", "else", "for", "while", "return", "lambda", "class", "try", "with",
];

/// Binary operators, longest first
const OPERATORS: &[&str] = &["//", "+", "-", "*", "/", "%", "|"];

/// String delimiters, triple quotes first
const QUOTES: &[&str] = &["\"\"\"", "'''", "\"", "'"];

// ============================================================================
// Public API
// ============================================================================

/// Parsed statements plus comments after the last statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub stmts: Vec<Stmt>,
    pub trailing_comments: Vec<String>,
}

/// Parse a complete BUILD file
pub fn parse_build_file(input: &str) -> Result<ParsedFile, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    match file(input) {
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(to_parse_error(input, &e)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::new(1, 1, "incomplete input")),
    }
}

fn to_parse_error(input: &str, err: &VerboseError<&str>) -> ParseError {
    let Some((rest, _)) = err.errors.first() else {
        return ParseError::new(1, 1, "invalid syntax");
    };

    let message = err
        .errors
        .iter()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(ctx) => Some(format!("expected {}", ctx)),
            _ => None,
        })
        .or_else(|| {
            err.errors.iter().find_map(|(_, kind)| match kind {
                VerboseErrorKind::Char(c) => Some(format!("expected '{}'", c)),
                _ => None,
            })
        })
        .unwrap_or_else(|| "invalid syntax".to_string());

    let offset = input.len() - rest.len();
    let consumed = &input[..offset];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count() + 1)
        .unwrap_or(1);

    ParseError::new(line, column, message)
}

fn fail<'a, T>(input: &'a str, ctx: &'static str) -> Res<'a, T> {
    Err(nom::Err::Failure(VerboseError {
        errors: vec![(input, VerboseErrorKind::Context(ctx))],
    }))
}

fn mismatch<'a, T>(input: &'a str, ctx: &'static str) -> Res<'a, T> {
    Err(nom::Err::Error(VerboseError {
        errors: vec![(input, VerboseErrorKind::Context(ctx))],
    }))
}

// ============================================================================
// Trivia (whitespace and comments)
// ============================================================================

fn comment(input: &str) -> Res<'_, String> {
    map(recognize(pair(char('#'), not_line_ending)), |c: &str| {
        c.trim_end().to_string()
    })(input)
}

/// Whitespace including newlines; returns the comments found on the way
fn trivia(mut input: &str) -> Res<'_, Vec<String>> {
    let mut comments = Vec::new();
    loop {
        let (rest, _) = multispace0(input)?;
        if rest.starts_with('#') {
            let (rest, c) = comment(rest)?;
            comments.push(c);
            input = rest;
        } else {
            return Ok((rest, comments));
        }
    }
}

/// Comment lines before a top-level statement, split into blocks at blank lines
///
/// The last block sits directly above the statement. It is empty when a
/// blank line separates the statement from the comments above it.
fn comment_blocks(mut input: &str) -> Res<'_, Vec<Vec<String>>> {
    let mut blocks: Vec<Vec<String>> = vec![Vec::new()];
    let mut newlines = 0;
    loop {
        let (rest, _) = take_while(|c: char| matches!(c, ' ' | '\t' | '\r' | '\x0c'))(input)?;
        if let Some(rest) = rest.strip_prefix('\n') {
            newlines += 1;
            if newlines == 2 && blocks.last().is_some_and(|b| !b.is_empty()) {
                blocks.push(Vec::new());
            }
            input = rest;
        } else if rest.starts_with('#') {
            let (rest, c) = comment(rest)?;
            if let Some(block) = blocks.last_mut() {
                block.push(c);
            }
            newlines = 0;
            input = rest;
        } else {
            return Ok((rest, blocks));
        }
    }
}

/// A comment on the remainder of the current line
fn suffix_comment(input: &str) -> Res<'_, Option<String>> {
    preceded(space0, opt(comment))(input)
}

// ============================================================================
// File and statements
// ============================================================================

fn file(mut input: &str) -> Res<'_, ParsedFile> {
    let mut stmts = Vec::new();
    loop {
        let (rest, mut blocks) = comment_blocks(input)?;
        if rest.is_empty() {
            blocks.retain(|b| !b.is_empty());
            let trailing_comments = blocks.pop().unwrap_or_default();
            stmts.extend(blocks.into_iter().map(detached_comment));
            return Ok((
                rest,
                ParsedFile {
                    stmts,
                    trailing_comments,
                },
            ));
        }

        let mut before = blocks.pop().unwrap_or_default();
        stmts.extend(
            blocks
                .into_iter()
                .filter(|b| !b.is_empty())
                .map(detached_comment),
        );

        let (rest, (kind, inner)) = statement(rest)?;
        before.extend(inner);
        let (rest, _) = space0(rest)?;
        let (rest, _) = opt(char(';'))(rest)?;
        let (rest, suffix) = suffix_comment(rest)?;
        let (rest, _) = cut(context("end of statement", alt((line_ending, eof))))(rest)?;

        stmts.push(Stmt {
            comments: Comments { before, suffix },
            kind,
        });
        input = rest;
    }
}

fn detached_comment(lines: Vec<String>) -> Stmt {
    Stmt {
        comments: Comments {
            before: lines,
            suffix: None,
        },
        kind: StmtKind::Comment,
    }
}

/// A statement plus comments found inside it that have no closer owner
fn statement(input: &str) -> Res<'_, (StmtKind, Vec<String>)> {
    if let Ok((_, word)) = identifier(input) {
        if UNSUPPORTED_KEYWORDS.contains(&word) {
            return fail(input, "a call or assignment (def/if/for are not allowed in BUILD files)");
        }
    }

    alt((
        assignment,
        map(cut(context("statement", expr)), |e| {
            (StmtKind::Expr(e), Vec::new())
        }),
    ))(input)
}

fn assignment(input: &str) -> Res<'_, (StmtKind, Vec<String>)> {
    let (input, target) = identifier(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = not(char('='))(input)?;
    let (input, comments) = trivia(input)?;
    let (input, value) = cut(context("expression", expr))(input)?;
    Ok((
        input,
        (
            StmtKind::Assign {
                target: target.to_string(),
                value,
            },
            comments,
        ),
    ))
}

// ============================================================================
// Expressions
// ============================================================================

fn expr(input: &str) -> Res<'_, Expr> {
    let (mut input, mut lhs) = primary(input)?;
    loop {
        match opt(pair(trivia, operator))(input)? {
            (rest, Some((mut comments, op))) => {
                let (rest, after) = trivia(rest)?;
                comments.extend(after);
                let (rest, rhs) = cut(context("expression", primary))(rest)?;
                lhs = Expr::Binary {
                    lhs: Box::new(lhs),
                    op: op.to_string(),
                    rhs: Box::new(rhs),
                    comments,
                };
                input = rest;
            }
            (rest, None) => return Ok((rest, lhs)),
        }
    }
}

fn operator(input: &str) -> Res<'_, &str> {
    for op in OPERATORS {
        if let Some(rest) = input.strip_prefix(op) {
            // augmented assignment, not an operator
            if rest.starts_with('=') {
                break;
            }
            return Ok((rest, &input[..op.len()]));
        }
    }
    mismatch(input, "operator")
}

fn primary(input: &str) -> Res<'_, Expr> {
    alt((
        string_expr,
        map(integer, |s: &str| Expr::Int(s.to_string())),
        list,
        dict,
        paren_or_tuple,
        name_or_call,
    ))(input)
}

fn integer(input: &str) -> Res<'_, &str> {
    recognize(tuple((
        opt(char('-')),
        digit1,
        not(satisfy(|c| c.is_alphanumeric() || c == '_')),
    )))(input)
}

fn identifier(input: &str) -> Res<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// `name`, `a.b.c`, optionally followed by call arguments
fn name_or_call(input: &str) -> Res<'_, Expr> {
    let (input, name) = recognize(pair(identifier, many0(pair(char('.'), identifier))))(input)?;
    let (input, open) = opt(peek(preceded(space0, char('('))))(input)?;
    if open.is_none() {
        return Ok((input, Expr::Ident(name.to_string())));
    }

    let (input, _) = preceded(space0, char('('))(input)?;
    let (input, (args, trailing)) = call_args(input)?;
    Ok((
        input,
        Expr::Call(CallExpr {
            func: name.to_string(),
            args,
            trailing,
        }),
    ))
}

/// Arguments after `(`, consuming the closing `)`
fn call_args(mut input: &str) -> Res<'_, (Vec<Arg>, Vec<String>)> {
    let mut args = Vec::new();
    loop {
        let (rest, mut before) = trivia(input)?;
        if let Some(rest) = rest.strip_prefix(')') {
            return Ok((rest, (args, before)));
        }

        let (rest, keyword) = opt(keyword_name)(rest)?;
        let name = match keyword {
            Some((name, comments)) => {
                before.extend(comments);
                Some(name.to_string())
            }
            None => None,
        };
        let (rest, value) = cut(context("argument", expr))(rest)?;
        let (rest, (comma, stray)) = separator(rest)?;
        before.extend(stray);
        let (rest, suffix) = suffix_comment(rest)?;
        args.push(Arg {
            comments: Comments { before, suffix },
            name,
            value,
        });

        if !comma {
            let (rest, trailing) = trivia(rest)?;
            let (rest, _) = cut(context("')'", char(')')))(rest)?;
            return Ok((rest, (args, trailing)));
        }
        input = rest;
    }
}

/// `name =` (but not `name ==`), with the comments around the `=`
fn keyword_name(input: &str) -> Res<'_, (&str, Vec<String>)> {
    let (input, name) = identifier(input)?;
    let (input, mut comments) = trivia(input)?;
    let (input, _) = char('=')(input)?;
    let (input, _) = not(char('='))(input)?;
    let (input, after) = trivia(input)?;
    comments.extend(after);
    Ok((input, (name, comments)))
}

/// Optional `,` after an element; newlines and comments before it are allowed
///
/// Comments are only consumed when a comma follows them.
fn separator(input: &str) -> Res<'_, (bool, Vec<String>)> {
    let (after, comments) = trivia(input)?;
    if let Some(rest) = after.strip_prefix(',') {
        return Ok((rest, (true, comments)));
    }
    let (rest, _) = space0(input)?;
    Ok((rest, (false, Vec::new())))
}

/// Elements up to `close`, consuming it; also reports whether the last element had a comma
fn seq_items(mut input: &str, close: char) -> Res<'_, (Seq, bool)> {
    let mut items = Vec::new();
    loop {
        let (rest, mut before) = trivia(input)?;
        if let Some(rest) = rest.strip_prefix(close) {
            let had_comma = !items.is_empty();
            return Ok((
                rest,
                (
                    Seq {
                        items,
                        trailing: before,
                    },
                    had_comma,
                ),
            ));
        }

        let (rest, value) = cut(context("element", expr))(rest)?;
        let (rest, (comma, stray)) = separator(rest)?;
        before.extend(stray);
        let (rest, suffix) = suffix_comment(rest)?;
        items.push(Item {
            comments: Comments { before, suffix },
            value,
        });

        if !comma {
            let (rest, trailing) = trivia(rest)?;
            let (rest, _) = cut(context("closing bracket", char(close)))(rest)?;
            return Ok((rest, (Seq { items, trailing }, false)));
        }
        input = rest;
    }
}

fn list(input: &str) -> Res<'_, Expr> {
    let (input, _) = char('[')(input)?;
    let (input, (seq, _)) = seq_items(input, ']')?;
    Ok((input, Expr::List(seq)))
}

fn paren_or_tuple(input: &str) -> Res<'_, Expr> {
    let (input, _) = char('(')(input)?;
    let (input, (mut seq, had_comma)) = seq_items(input, ')')?;
    if seq.items.len() == 1 && !had_comma {
        let item = seq.items.remove(0);
        return Ok((input, Expr::Paren(Box::new(item.value))));
    }
    Ok((input, Expr::Tuple(seq)))
}

fn dict(mut input: &str) -> Res<'_, Expr> {
    input = char('{')(input)?.0;
    let mut entries = Vec::new();
    loop {
        let (rest, mut before) = trivia(input)?;
        if let Some(rest) = rest.strip_prefix('}') {
            return Ok((
                rest,
                Expr::Dict(DictExpr {
                    entries,
                    trailing: before,
                }),
            ));
        }

        let (rest, key) = cut(context("dict key", expr))(rest)?;
        let (rest, around_colon) = trivia(rest)?;
        let (rest, _) = cut(context("':'", char(':')))(rest)?;
        let (rest, after_colon) = trivia(rest)?;
        let (rest, value) = cut(context("dict value", expr))(rest)?;
        let (rest, (comma, stray)) = separator(rest)?;
        before.extend(around_colon);
        before.extend(after_colon);
        before.extend(stray);
        let (rest, suffix) = suffix_comment(rest)?;
        entries.push(DictEntry {
            comments: Comments { before, suffix },
            key,
            value,
        });

        if !comma {
            let (rest, trailing) = trivia(rest)?;
            let (rest, _) = cut(context("'}'", char('}')))(rest)?;
            return Ok((rest, Expr::Dict(DictExpr { entries, trailing })));
        }
        input = rest;
    }
}

// ============================================================================
// Strings
// ============================================================================

/// What one escape sequence stands for
enum Escape {
    Char(char),
    /// Backslash-newline: nothing
    Continuation,
    /// A byte above `\x7f`; not representable as a `char`
    Byte,
}

/// String literal, optionally `r`-prefixed
///
/// Raw strings and strings holding byte escapes keep their source spelling.
fn string_expr(input: &str) -> Res<'_, Expr> {
    let (body, raw) = match input.strip_prefix(|c: char| c == 'r' || c == 'R') {
        Some(body) => (body, true),
        None => (input, false),
    };
    let (rest, value) = string_body(body, raw)?;
    match value {
        Some(value) if !raw => Ok((rest, Expr::Str(value))),
        _ => {
            let token = &input[..input.len() - rest.len()];
            Ok((rest, Expr::Verbatim(token.to_string())))
        }
    }
}

/// Quoted body; yields the decoded value, or `None` when it holds raw bytes
fn string_body(input: &str, raw: bool) -> Res<'_, Option<String>> {
    let Some(quote) = QUOTES.iter().copied().find(|q| input.starts_with(q)) else {
        return mismatch(input, "string");
    };
    let triple = quote.len() == 3;

    let mut rest = &input[quote.len()..];
    let mut out = String::new();
    let mut text = true;
    loop {
        if let Some(after) = rest.strip_prefix(quote) {
            return Ok((after, text.then_some(out)));
        }

        let mut chars = rest.chars();
        match chars.next() {
            None => return fail(input, "closing quote"),
            Some('\n') if !triple => return fail(input, "closing quote on the same line"),
            // In raw strings a backslash keeps the next character, quotes included
            Some('\\') if raw => match chars.next() {
                Some(c) => {
                    out.push('\\');
                    out.push(c);
                }
                None => return fail(input, "closing quote"),
            },
            Some('\\') => {
                let (after, escape) = escape_sequence(input, chars.as_str())?;
                match escape {
                    Escape::Char(c) => out.push(c),
                    Escape::Continuation => {}
                    Escape::Byte => text = false,
                }
                rest = after;
                continue;
            }
            Some(c) => out.push(c),
        }
        rest = chars.as_str();
    }
}

/// Decode the escape sequence starting right after a backslash
///
/// Unknown escapes keep the backslash; the next character is read normally.
fn escape_sequence<'a>(literal: &'a str, input: &'a str) -> Res<'a, Escape> {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return fail(literal, "closing quote");
    };
    let rest = chars.as_str();

    let decoded = match first {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '\\' | '\'' | '"' => first,
        '\n' => return Ok((rest, Escape::Continuation)),
        '\r' if rest.starts_with('\n') => return Ok((&rest[1..], Escape::Continuation)),
        '0'..='7' => {
            let len = 1 + rest
                .chars()
                .take(2)
                .take_while(|c| ('0'..='7').contains(c))
                .count();
            return match u32::from_str_radix(&input[..len], 8) {
                Ok(code) => Ok((&input[len..], byte_escape(code))),
                Err(_) => fail(literal, "octal escape"),
            };
        }
        'x' => return code_escape(literal, rest, 2, true),
        'u' => return code_escape(literal, rest, 4, false),
        'U' => return code_escape(literal, rest, 8, false),
        _ => return Ok((input, Escape::Char('\\'))),
    };
    Ok((rest, Escape::Char(decoded)))
}

/// `\xHH`, `\uXXXX` or `\UXXXXXXXX`, after the letter
fn code_escape<'a>(literal: &'a str, input: &'a str, digits: usize, byte: bool) -> Res<'a, Escape> {
    let Some(hex) = input
        .get(..digits)
        .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
    else {
        return fail(literal, "hex digits in escape");
    };
    let Ok(code) = u32::from_str_radix(hex, 16) else {
        return fail(literal, "hex digits in escape");
    };
    let rest = &input[digits..];

    if byte {
        return Ok((rest, byte_escape(code)));
    }
    match char::from_u32(code) {
        Some(c) => Ok((rest, Escape::Char(c))),
        None => fail(literal, "a valid unicode escape"),
    }
}

fn byte_escape(code: u32) -> Escape {
    match char::from_u32(code) {
        Some(c) if c.is_ascii() => Escape::Char(c),
        _ => Escape::Byte,
    }
}
