//! Property tests for whole-tree gardening.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::TempDir;

use gardener::domain::ports::NoopEventSink;
use gardener::infrastructure::{LocalFs, StarlarkFormat};
use gardener::{GardenOptions, GardenUseCase};

/// Relative directories that hold a BUILD file, e.g. {"", "a", "a/b"}
fn tree() -> impl Strategy<Value = BTreeSet<String>> {
    let segment = prop_oneof![Just("a"), Just("b"), Just("c")];
    let dir = proptest::collection::vec(segment, 0..4).prop_map(|parts| parts.join("/"));
    proptest::collection::btree_set(dir, 0..8)
}

fn build(root: &Path, dirs: &BTreeSet<String>) {
    for dir in dirs {
        let path = root.join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("BUILD"), "").unwrap();
    }
}

fn contents(root: &Path, dirs: &BTreeSet<String>) -> Vec<String> {
    dirs.iter()
        .map(|d| fs::read_to_string(root.join(d).join("BUILD")).unwrap())
        .collect()
}

fn garden(root: &Path) -> Vec<String> {
    GardenUseCase::new(LocalFs::new(), StarlarkFormat::new())
        .execute(&GardenOptions::new(root), &NoopEventSink)
        .unwrap()
        .label_strings()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a second run leaves every BUILD file byte-identical.
    #[test]
    fn property_gardening_is_idempotent(dirs in tree()) {
        let tmp = TempDir::new().unwrap();
        build(tmp.path(), &dirs);

        let first_labels = garden(tmp.path());
        let first = contents(tmp.path(), &dirs);
        let second_labels = garden(tmp.path());
        let second = contents(tmp.path(), &dirs);

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_labels, second_labels);
    }

    /// PROPERTY: every BUILD file gets exactly one `srcs` rule, and a
    /// `recursive-srcs` rule exactly when a descendant has a BUILD file.
    #[test]
    fn property_rules_match_tree_shape(dirs in tree()) {
        let tmp = TempDir::new().unwrap();
        build(tmp.path(), &dirs);
        garden(tmp.path());

        for dir in &dirs {
            let content = fs::read_to_string(tmp.path().join(dir).join("BUILD")).unwrap();
            let has_descendant = dirs.iter().any(|other| {
                other != dir && (dir.is_empty() || other.starts_with(&format!("{}/", dir)))
            });

            prop_assert_eq!(content.matches("name = \"srcs\"").count(), 1);
            prop_assert_eq!(
                content.contains("name = \"recursive-srcs\""),
                has_descendant,
                "{}:\n{}", dir, content
            );
        }
    }

    /// PROPERTY: the root resolves to nothing only when no BUILD file exists.
    #[test]
    fn property_root_labels_are_empty_iff_tree_is_bare(dirs in tree()) {
        let tmp = TempDir::new().unwrap();
        build(tmp.path(), &dirs);

        let labels = garden(tmp.path());

        prop_assert_eq!(labels.is_empty(), dirs.is_empty());
        if dirs.contains("") {
            prop_assert_eq!(labels.len(), 1);
        }
    }
}
