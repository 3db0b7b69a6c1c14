//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, in-memory for tests)
//! - `starlark/` - BUILD file parser and canonical printer
//! - `events/` - Event sinks (console, NDJSON)

pub mod events;
pub mod fs;
pub mod starlark;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use starlark::StarlarkFormat;
