//! Console Event Sink
//!
//! Human readable progress lines, filtered by verbosity.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::config::Verbosity;
use crate::domain::ports::{GardenEvent, GardenEventSink};

/// Event sink that prints one line per event to stdout
///
/// Shadowed build file warnings go to stderr regardless of verbosity.
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    warnings: Mutex<Box<dyn Write + Send>>,
    verbosity: Verbosity,
}

impl ConsoleEventSink {
    /// Create a console sink writing to stdout / stderr
    pub fn stdout(verbosity: Verbosity) -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            warnings: Mutex::new(Box::new(io::stderr())),
            verbosity,
        }
    }

    /// Create a console sink writing everything to one writer (for testing)
    #[cfg(test)]
    pub fn with_writer<W: Write + Send + Clone + 'static>(writer: W, verbosity: Verbosity) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer.clone())),
            warnings: Mutex::new(Box::new(writer)),
            verbosity,
        }
    }

    fn line(&self, min: Verbosity, text: String) {
        if self.verbosity < min {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }

    fn warn(&self, text: String) {
        if let Ok(mut writer) = self.warnings.lock() {
            let _ = writeln!(writer, "warning: {}", text);
            let _ = writer.flush();
        }
    }
}

impl GardenEventSink for ConsoleEventSink {
    fn on_event(&self, event: GardenEvent) {
        match event {
            GardenEvent::Started { root } => {
                self.line(
                    Verbosity::Verbose,
                    format!("Gardening {}", root.display()),
                );
            }
            GardenEvent::BuildFileOpened { path } => {
                self.line(Verbosity::Normal, format!("Opening {}", path.display()));
            }
            GardenEvent::RuleAdded { path, name } => {
                self.line(
                    Verbosity::Normal,
                    format!("adding {}:{}", path.display(), name),
                );
            }
            GardenEvent::RulePatched { path, name } => {
                self.line(
                    Verbosity::Verbose,
                    format!("updating {}:{}", path.display(), name),
                );
            }
            GardenEvent::UnmanagedRuleKept { path, name } => {
                self.line(
                    Verbosity::Verbose,
                    format!("keeping unmanaged {}:{}", path.display(), name),
                );
            }
            GardenEvent::BuildFileWritten { path } => {
                self.line(
                    Verbosity::Normal,
                    format!("Wrote BUILD file for {}", path.display()),
                );
            }
            GardenEvent::BuildFileShadowed { dir, used, ignored } => {
                self.warn(format!(
                    "{}: using {}, ignoring {}",
                    dir.display(),
                    used,
                    ignored.join(", ")
                ));
            }
            GardenEvent::SymlinkSkipped { path } => {
                self.line(
                    Verbosity::Verbose,
                    format!("skipping symlink {}", path.display()),
                );
            }
            GardenEvent::DirectoryExcluded { path } => {
                self.line(
                    Verbosity::Verbose,
                    format!("excluding {}", path.display()),
                );
            }
            GardenEvent::Completed {
                labels,
                written_count,
            } => {
                self.line(
                    Verbosity::Verbose,
                    format!(
                        "Done: {} build file(s) written, top-level labels: {}",
                        written_count,
                        if labels.is_empty() {
                            "(none)".to_string()
                        } else {
                            labels.join(" ")
                        }
                    ),
                );
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }
}
