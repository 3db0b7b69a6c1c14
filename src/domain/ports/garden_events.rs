//! Garden Event Port
//!
//! Provides an observable interface for the tree walk.
//! Console output, NDJSON streams and tests all listen here.

use std::path::PathBuf;

/// Event emitted while gardening a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenEvent {
    /// Walk started
    Started { root: PathBuf },

    /// A build file was read and is about to be reconciled
    BuildFileOpened { path: PathBuf },

    /// A synthesized rule had no counterpart and was appended
    RuleAdded { path: PathBuf, name: String },

    /// A managed rule had its `srcs` refreshed
    RulePatched { path: PathBuf, name: String },

    /// A same-named rule without the managed tag was left alone
    UnmanagedRuleKept { path: PathBuf, name: String },

    /// A build file was written back
    BuildFileWritten { path: PathBuf },

    /// More than one accepted build file name exists in a directory
    BuildFileShadowed {
        dir: PathBuf,
        used: String,
        ignored: Vec<String>,
    },

    /// A symlinked directory was not followed
    SymlinkSkipped { path: PathBuf },

    /// A directory matched an exclude pattern
    DirectoryExcluded { path: PathBuf },

    /// Walk completed
    Completed {
        labels: Vec<String>,
        written_count: usize,
    },
}

/// Trait for receiving garden events
///
/// Implementations:
/// - ConsoleEventSink: human readable progress
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait GardenEventSink: Send + Sync {
    /// Handle a garden event
    fn on_event(&self, event: GardenEvent);

    /// Check if this sink wants per-rule events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl GardenEventSink for NoopEventSink {
    fn on_event(&self, _event: GardenEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
