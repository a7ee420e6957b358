//! Deterministic medical safety guardrails for MedAssist Engine
//!
//! This crate implements the safety policy that runs before and after
//! answer generation:
//! - **Pre-check**: blocks requests asking for diagnosis, prescriptions,
//!   dosages, or emergency/self-harm guidance before any model is called
//! - **Soft warnings**: annotates treatment/medication phrasing without
//!   blocking
//! - **Post-check**: flags overconfident phrasing, overrides answers that
//!   contain explicit numeric dosage recommendations, and appends the
//!   educational-use disclaimer when missing
//!
//! Every rule is an explicit `SafetyRule { id, pattern, severity }`
//! record evaluated by a single engine routine, so rules are additive and
//! independently testable. No learned component is involved; identical
//! input always produces an identical verdict.
//!
//! # Example
//!
//! ```rust
//! use guardrail_engine::GuardrailEngine;
//!
//! # fn main() -> Result<(), guardrail_engine::GuardrailError> {
//! let engine = GuardrailEngine::new()?;
//!
//! let verdict = engine.pre_check("Should I take ibuprofen?");
//! assert!(verdict.blocked);
//! assert!(verdict.reasons.iter().any(|r| r.starts_with("hard_block:")));
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod rules;
pub mod verdict;

pub use engine::*;
pub use error::*;
pub use rules::*;
pub use verdict::*;
