//! Domain Services
//!
//! Stateless services that contain business logic.

mod reconciler;
mod synthesizer;

pub use reconciler::{ReconcileReport, Reconciler};
pub use synthesizer::RuleSynthesizer;
