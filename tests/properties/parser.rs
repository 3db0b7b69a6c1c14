//! Property tests for the BUILD parser and printer.

use std::path::Path;

use proptest::prelude::*;

use gardener::domain::entities::StmtKind;
use gardener::domain::ports::BuildFormat;
use gardener::infrastructure::starlark::quote;
use gardener::infrastructure::StarlarkFormat;

const KEYWORDS: &[&str] = &[
    "and", "class", "def", "elif", "else", "for", "if", "in", "lambda", "not", "or", "pass",
    "return", "try", "while", "with",
];

fn ident() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_][a-z0-9_]{0,8}")
        .unwrap()
        .prop_filter("not a keyword", |s| !KEYWORDS.contains(&s.as_str()))
}

fn string_lit() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex("[A-Za-z0-9_/:.* \\-]{0,12}")
            .unwrap()
            .prop_map(|s| format!("{:?}", s)),
        // raw: every backslash is followed by a character
        proptest::string::string_regex("([a-z./' ]|\\\\[a-z.\"]){0,8}")
            .unwrap()
            .prop_map(|s| format!("r\"{}\"", s)),
        proptest::string::string_regex("([a-z]|\\\\x[2-7][0-9a-f]|\\\\[0-3][0-7]{2}|\\\\[abfvnt]){0,6}")
            .unwrap()
            .prop_map(|s| format!("\"{}\"", s)),
    ]
}

fn value() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        string_lit(),
        (0u32..1000).prop_map(|n| n.to_string()),
        ident().prop_map(|s| s.to_uppercase()),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            (ident(), proptest::collection::vec(inner.clone(), 0..3))
                .prop_map(|(f, args)| format!("{}({})", f, args.join(", "))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{} + {}", a, b)),
            (inner.clone(), comment(), inner)
                .prop_map(|(a, c, b)| format!("{} +  {}\n    {}", a, c, b)),
        ]
    })
}

fn comment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("# [a-z ]{0,10}").unwrap()
}

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        (ident(), proptest::collection::vec((ident(), value()), 0..4)).prop_map(|(f, kwargs)| {
            let args: Vec<String> = kwargs.iter().map(|(k, v)| format!("{} = {}", k, v)).collect();
            format!("{}({})", f, args.join(", "))
        }),
        (ident(), value()).prop_map(|(n, v)| format!("{} = {}", n.to_uppercase(), v)),
    ]
}

fn build_file() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        (proptest::option::of(comment()), statement(), proptest::option::of(comment())),
        0..6,
    )
    .prop_map(|stmts| {
        let mut out = String::new();
        for (before, stmt, suffix) in stmts {
            if let Some(c) = before {
                out.push_str(&c);
                out.push('\n');
            }
            out.push_str(&stmt);
            if let Some(c) = suffix {
                out.push_str("  ");
                out.push_str(&c);
            }
            out.push('\n');
        }
        out
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing arbitrary text returns Ok or Err, never panics.
    #[test]
    fn property_parser_never_panics(input in any::<String>()) {
        let _ = StarlarkFormat::new().parse(Path::new("BUILD"), &input);
    }

    /// PROPERTY: near-miss BUILD text never panics either.
    #[test]
    fn property_parser_never_panics_on_build_like_text(
        input in proptest::string::string_regex("[a-z_()\\[\\]{},=:+#\"' \n]{0,80}").unwrap()
    ) {
        let _ = StarlarkFormat::new().parse(Path::new("BUILD"), &input);
    }

    /// PROPERTY: a quoted string parses back to the same value.
    #[test]
    fn property_quoted_strings_keep_their_value(value in any::<String>()) {
        let text = format!("X = {}\n", quote(&value));
        let parsed = StarlarkFormat::new().parse(Path::new("BUILD"), &text);
        prop_assert!(parsed.is_ok(), "failed to parse: {:?}", text);

        let file = parsed.unwrap();
        let parsed_value = match &file.stmts[0].kind {
            StmtKind::Assign { value, .. } => value.as_str().map(str::to_string),
            _ => None,
        };
        prop_assert_eq!(parsed_value, Some(value));
    }

    /// PROPERTY: well-formed files parse, and printing is a fixed point.
    #[test]
    fn property_format_is_a_fixed_point(input in build_file()) {
        let format = StarlarkFormat::new();
        let parsed = format.parse(Path::new("BUILD"), &input);
        prop_assert!(parsed.is_ok(), "failed to parse:\n{}\n{:?}", input, parsed.err());

        let once = format.format(&parsed.unwrap());
        let reparsed = format.parse(Path::new("BUILD"), &once);
        prop_assert!(reparsed.is_ok(), "failed to reparse:\n{}", once);
        let twice = format.format(&reparsed.unwrap());

        prop_assert_eq!(once, twice);
    }
}
