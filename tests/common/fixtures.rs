//! Reusable BUILD file content.

#![allow(dead_code)]

/// What a freshly gardened leaf BUILD file contains
pub const SRCS_RULE: &str = r#"filegroup(
    name = "srcs",
    srcs = glob(["**"]),
    tags = ["automanaged"],
)
"#;

/// A hand-written rule that must never be touched
pub const UNMANAGED_SRCS: &str = r#"filegroup(
    name = "srcs",
    srcs = ["README.md"],
)
"#;

/// Build the `recursive-srcs` rule text for the given labels
pub fn recursive_srcs_rule(children: &[&str]) -> String {
    let mut out = String::from("filegroup(\n    name = \"recursive-srcs\",\n    srcs = [\n");
    for child in children {
        out.push_str(&format!("        \"{}\",\n", child));
    }
    out.push_str("        \":srcs\",\n    ],\n    tags = [\"automanaged\"],\n)\n");
    out
}
