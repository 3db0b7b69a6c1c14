//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_format;
pub mod file_system;
pub mod garden_events;

pub use build_format::{BuildFormat, ParseError};
pub use file_system::{DirEntry, EntryKind, FileSystem, FsError, FsResult};
pub use garden_events::{GardenEvent, GardenEventSink, NoopEventSink};
