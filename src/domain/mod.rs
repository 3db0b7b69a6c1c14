//! Domain Layer
//!
//! The core of Gardener - rule synthesis and reconciliation without I/O.
//!
//! ## Structure
//!
//! - `entities/` - The parsed build file and desired rule definitions
//! - `value_objects/` - Target labels, exclude patterns, config warnings
//! - `services/` - RuleSynthesizer and Reconciler
//! - `ports/` - Interfaces for the filesystem, build format and events
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
