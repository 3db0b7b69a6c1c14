//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{GardenerError, GardenerResult};

use super::types::{project_config_path, Config, Verbosity};

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> GardenerResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| GardenerError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GardenerError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.split('.').next_back().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                file: path.to_path_buf(),
                line: find_line_number(&content, &leaf),
                suggestion: suggest_key(&leaf),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
///
/// The first config file found wins; environment overrides are applied on
/// top and the result is validated.
pub fn load_or_default(root: &Path) -> GardenerResult<(Config, Vec<ConfigWarning>)> {
    let candidates = [Some(project_config_path(root)), user_config_path()];

    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            let (config, warnings) = load_with_warnings(&path)?;
            let config = config.with_env_overrides();
            config.validate(&path)?;
            return Ok((config, warnings));
        }
    }

    let config = Config::default().with_env_overrides();
    config.validate(Path::new("<environment>"))?;
    Ok((config, Vec::new()))
}

/// User-level config file, e.g. `~/.config/gardener/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gardener").join("config.toml"))
}

/// Apply `GARDENER_*` overrides read through `lookup`
pub fn with_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // GARDENER_BUILD_FILE_NAMES (comma-separated, priority order)
    if let Some(names) = lookup("GARDENER_BUILD_FILE_NAMES") {
        let parsed: Vec<String> = names
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.build.file_names = parsed;
        }
    }

    if let Some(kind) = lookup("GARDENER_RULE_KIND") {
        config.build.rule_kind = kind.trim().to_string();
    }

    if let Some(tag) = lookup("GARDENER_MANAGED_TAG") {
        config.build.managed_tag = tag.trim().to_string();
    }

    if let Some(val) = lookup("GARDENER_FOLLOW_SYMLINKS") {
        config.walk.follow_symlinks = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(verbosity) = lookup("GARDENER_VERBOSITY") {
        config.output.verbosity = Verbosity::parse(&verbosity).unwrap_or_default();
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "file_names",
        "rule_kind",
        "managed_tag",
        "walk",
        "follow_symlinks",
        "exclude",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
