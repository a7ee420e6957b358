//! Safety rule tables.
//!
//! Rules are plain records so that policy changes are additive data
//! changes, not code changes. Patterns are compiled case-insensitively
//! once, when the engine is constructed.

use serde::{Deserialize, Serialize};

/// How a pre-check rule match affects the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Halts the pipeline before retrieval and generation
    HardBlock,
    /// Recorded in the verdict reasons, never blocks
    SoftWarning,
}

/// How a post-check rule match affects the generated answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostAction {
    /// Annotate only; the answer is unmodified by this rule alone
    Flag,
    /// Replace the entire answer with the fixed refusal text
    Override,
}

/// A single deterministic safety rule evaluated against user input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyRule {
    /// Stable identifier, surfaced in verdict reasons
    pub id: String,
    /// Regex pattern, evaluated case-insensitively
    pub pattern: String,
    pub severity: Severity,
}

/// A single deterministic safety rule evaluated against generated answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRule {
    /// Stable identifier, surfaced as a safety flag
    pub id: String,
    /// Regex pattern, evaluated case-insensitively
    pub pattern: String,
    pub action: PostAction,
}

impl SafetyRule {
    pub fn new(id: &str, pattern: &str, severity: Severity) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            severity,
        }
    }
}

impl PostRule {
    pub fn new(id: &str, pattern: &str, action: PostAction) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            action,
        }
    }
}

/// Default pre-generation rule table.
///
/// Hard blocks cover diagnosis, prescription, dosage-quantity phrasing,
/// direct "should I take" questions, emergencies, and self-harm terms.
/// Soft warnings cover treatment and medication phrasing that is allowed
/// but worth annotating.
pub fn default_pre_rules() -> Vec<SafetyRule> {
    vec![
        SafetyRule::new("diagnose", r"\bdiagnose\b", Severity::HardBlock),
        SafetyRule::new("diagnosis", r"\bdiagnosis\b", Severity::HardBlock),
        SafetyRule::new("prescribe", r"\bprescribe\b", Severity::HardBlock),
        SafetyRule::new("dosage", r"\bdosage\b", Severity::HardBlock),
        SafetyRule::new("dosage_quantity", r"\bhow much (mg|ml)\b", Severity::HardBlock),
        SafetyRule::new("should_i_take", r"\bshould i take\b", Severity::HardBlock),
        SafetyRule::new("emergency", r"\bemergency\b", Severity::HardBlock),
        SafetyRule::new("suicide", r"\bsuicide\b", Severity::HardBlock),
        SafetyRule::new("self_harm", r"\bkill myself\b", Severity::HardBlock),
        SafetyRule::new("treatment", r"\btreatment\b", Severity::SoftWarning),
        SafetyRule::new("cure", r"\bcure\b", Severity::SoftWarning),
        SafetyRule::new("best_medicine", r"\bbest medicine\b", Severity::SoftWarning),
        SafetyRule::new("medication", r"\bmedication\b", Severity::SoftWarning),
    ]
}

/// Default post-generation rule table.
pub fn default_post_rules() -> Vec<PostRule> {
    vec![
        PostRule::new("overconfident_language", r"\byou should\b", PostAction::Flag),
        PostRule::new("dosage_detected", r"\btake \d+ ?(mg|ml)\b", PostAction::Override),
    ]
}
