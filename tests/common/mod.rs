//! Common test utilities for gardener CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated source tree plus config home
//! - Fixtures: canonical rule text

pub mod env;
pub mod fixtures;

pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
