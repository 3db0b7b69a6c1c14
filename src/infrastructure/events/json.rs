//! JSON Event Sink
//!
//! Outputs garden events as NDJSON for CI/automation consumption.

use crate::domain::ports::{GardenEvent, GardenEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl GardenEventSink for JsonEventSink {
    fn on_event(&self, event: GardenEvent) {
        let json = match event {
            GardenEvent::Started { root } => serde_json::json!({
                "event": "start",
                "root": root.display().to_string(),
            }),

            GardenEvent::BuildFileOpened { path } => serde_json::json!({
                "event": "build_file_opened",
                "path": path.display().to_string(),
            }),

            GardenEvent::RuleAdded { path, name } => serde_json::json!({
                "event": "rule_added",
                "path": path.display().to_string(),
                "name": name,
            }),

            GardenEvent::RulePatched { path, name } => serde_json::json!({
                "event": "rule_patched",
                "path": path.display().to_string(),
                "name": name,
            }),

            GardenEvent::UnmanagedRuleKept { path, name } => serde_json::json!({
                "event": "rule_unmanaged",
                "path": path.display().to_string(),
                "name": name,
            }),

            GardenEvent::BuildFileWritten { path } => serde_json::json!({
                "event": "build_file_written",
                "path": path.display().to_string(),
            }),

            GardenEvent::BuildFileShadowed { dir, used, ignored } => serde_json::json!({
                "event": "build_file_shadowed",
                "dir": dir.display().to_string(),
                "used": used,
                "ignored": ignored,
            }),

            GardenEvent::SymlinkSkipped { path } => serde_json::json!({
                "event": "symlink_skipped",
                "path": path.display().to_string(),
            }),

            GardenEvent::DirectoryExcluded { path } => serde_json::json!({
                "event": "directory_excluded",
                "path": path.display().to_string(),
            }),

            GardenEvent::Completed {
                labels,
                written_count,
            } => serde_json::json!({
                "event": "complete",
                "status": "success",
                "labels": labels,
                "written": written_count,
            }),
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
