//! Garden Use Case
//!
//! Orchestrates the tree walk.

use std::path::{Path, PathBuf};

use crate::domain::entities::DesiredRule;
use crate::domain::ports::{BuildFormat, DirEntry, FileSystem, GardenEvent, GardenEventSink};
use crate::domain::services::{ReconcileReport, Reconciler, RuleSynthesizer};
use crate::domain::value_objects::{ExcludePatterns, TargetLabel};
use crate::error::{GardenerError, GardenerResult};

use super::options::GardenOptions;
use super::result::GardenResult;

/// Garden use case - keeps grouping rules current across a tree
pub struct GardenUseCase<FS, BF>
where
    FS: FileSystem,
    BF: BuildFormat,
{
    fs: FS,
    format: BF,
}

/// Per-walk state; nothing survives between `execute` calls
struct Walk<'a> {
    options: &'a GardenOptions,
    events: &'a dyn GardenEventSink,
    excludes: ExcludePatterns,
    synthesizer: RuleSynthesizer,
    reconciler: Reconciler,
    /// Canonical paths of the directories being visited, root first
    ancestors: Vec<PathBuf>,
    written: Vec<PathBuf>,
}

impl<FS, BF> GardenUseCase<FS, BF>
where
    FS: FileSystem,
    BF: BuildFormat,
{
    /// Create a new garden use case
    pub fn new(fs: FS, format: BF) -> Self {
        Self { fs, format }
    }

    /// Walk `options.root` and rewrite every build file found
    ///
    /// Stops at the first error; files written before it stay written.
    pub fn execute(
        &self,
        options: &GardenOptions,
        events: &dyn GardenEventSink,
    ) -> GardenerResult<GardenResult> {
        events.on_event(GardenEvent::Started {
            root: options.root.clone(),
        });

        let mut walk = Walk {
            options,
            events,
            excludes: ExcludePatterns::new(&options.root, &options.exclude)?,
            synthesizer: RuleSynthesizer::new(&options.rule_kind, &options.managed_tag),
            reconciler: Reconciler::new(&options.rule_kind, &options.managed_tag),
            ancestors: Vec::new(),
            written: Vec::new(),
        };

        let labels = self.walk(&mut walk, &options.root)?;

        events.on_event(GardenEvent::Completed {
            labels: labels.iter().map(ToString::to_string).collect(),
            written_count: walk.written.len(),
        });

        Ok(GardenResult {
            labels,
            written: walk.written,
        })
    }

    /// Post-order visit of `dir`; returns the labels `dir` resolves to
    fn walk(&self, walk: &mut Walk<'_>, dir: &Path) -> GardenerResult<Vec<TargetLabel>> {
        if walk.options.follow_symlinks {
            let canonical = self
                .fs
                .canonicalize(dir)
                .map_err(|source| GardenerError::Listing {
                    path: dir.to_path_buf(),
                    source,
                })?;
            if walk.ancestors.contains(&canonical) {
                return Err(GardenerError::SymlinkLoop {
                    path: dir.to_path_buf(),
                });
            }
            walk.ancestors.push(canonical);
        }

        let entries = self
            .fs
            .list_dir(dir)
            .map_err(|source| GardenerError::Listing {
                path: dir.to_path_buf(),
                source,
            })?;

        let mut children = Vec::new();
        for entry in entries.iter().filter(|e| e.is_dir() || e.is_dir_symlink()) {
            if self.is_excluded(walk, entry) {
                continue;
            }
            if entry.is_dir_symlink() && !walk.options.follow_symlinks {
                if walk.events.wants_detailed_events() {
                    walk.events.on_event(GardenEvent::SymlinkSkipped {
                        path: entry.path.clone(),
                    });
                }
                continue;
            }
            children.extend(self.walk(walk, &entry.path)?);
        }

        let labels = match select_build_file(walk, dir, &entries) {
            None => children,
            Some(build_file) => {
                let package = TargetLabel::package_for(&walk.options.root, dir);
                let own = TargetLabel::new(package, RuleSynthesizer::exported_name(&children));
                self.fix_build_file(walk, &build_file, &children)?;
                vec![own]
            }
        };

        if walk.options.follow_symlinks {
            walk.ancestors.pop();
        }
        Ok(labels)
    }

    fn is_excluded(&self, walk: &Walk<'_>, entry: &DirEntry) -> bool {
        let relative = entry
            .path
            .strip_prefix(&walk.options.root)
            .unwrap_or(&entry.path);
        if !walk.excludes.is_excluded(relative) {
            return false;
        }
        if walk.events.wants_detailed_events() {
            walk.events.on_event(GardenEvent::DirectoryExcluded {
                path: entry.path.clone(),
            });
        }
        true
    }

    /// Read, reconcile and rewrite one build file
    fn fix_build_file(
        &self,
        walk: &mut Walk<'_>,
        path: &Path,
        children: &[TargetLabel],
    ) -> GardenerResult<()> {
        walk.events.on_event(GardenEvent::BuildFileOpened {
            path: path.to_path_buf(),
        });

        let content = self
            .fs
            .read(path)
            .map_err(|source| GardenerError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let mut file = self
            .format
            .parse(path, &content)
            .map_err(|source| GardenerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let desired: Vec<DesiredRule> = walk.synthesizer.synthesize(children);
        let report = walk.reconciler.reconcile(&mut file, &desired);
        report_changes(walk.events, path, report);

        let output = self.format.format(&file);
        self.fs
            .write(path, &output)
            .map_err(|source| GardenerError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        walk.events.on_event(GardenEvent::BuildFileWritten {
            path: path.to_path_buf(),
        });
        walk.written.push(path.to_path_buf());
        Ok(())
    }
}

/// Pick the build file of `dir`: the first configured name present wins
fn select_build_file(walk: &Walk<'_>, dir: &Path, entries: &[DirEntry]) -> Option<PathBuf> {
    let mut present = walk.options.build_file_names.iter().filter_map(|name| {
        entries
            .iter()
            .find(|e| &e.name == name && e.is_file_like())
    });

    let chosen = present.next()?;
    let ignored: Vec<String> = present.map(|e| e.name.clone()).collect();
    if !ignored.is_empty() {
        walk.events.on_event(GardenEvent::BuildFileShadowed {
            dir: dir.to_path_buf(),
            used: chosen.name.clone(),
            ignored,
        });
    }
    Some(chosen.path.clone())
}

fn report_changes(events: &dyn GardenEventSink, path: &Path, report: ReconcileReport) {
    if events.wants_detailed_events() {
        for name in report.patched {
            events.on_event(GardenEvent::RulePatched {
                path: path.to_path_buf(),
                name,
            });
        }
        for name in report.kept_unmanaged {
            events.on_event(GardenEvent::UnmanagedRuleKept {
                path: path.to_path_buf(),
                name,
            });
        }
    }
    for name in report.added {
        events.on_event(GardenEvent::RuleAdded {
            path: path.to_path_buf(),
            name,
        });
    }
}
