//! Report eligibility.
//!
//! Decides per student and subject what the report shows:
//! - whether a subject appears at all (elective rules)
//! - whether the competence breakdown is replaced by the level text
//! - which topics and competences pass the class-wide selection

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{ClassContext, EligibilityResolver};
pub use types::*;
