//! Rule evaluation engine.
//!
//! All matching rules are collected on every pass; evaluation never
//! short-circuits after the first match, so verdict reasons are complete
//! regardless of table order. The single exception is the dosage
//! override, which skips the disclaimer step once triggered.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::{GuardrailError, GuardrailResult};
use crate::rules::{default_post_rules, default_pre_rules, PostAction, PostRule, SafetyRule, Severity};
use crate::verdict::SafetyVerdict;

/// Fixed refusal returned when a hard-block rule matches user input
pub const HARD_BLOCK_MESSAGE: &str = "I can't help with diagnosis, prescriptions, or emergency medical decisions. \
     Please consult a qualified healthcare professional.";

/// Fixed refusal that replaces an answer containing a numeric dosage
pub const DOSAGE_REFUSAL_MESSAGE: &str = "I can’t provide specific medication dosages. \
     Please consult a licensed medical professional.";

/// Educational-use notice appended to medical answers
pub const DISCLAIMER_TEXT: &str = "This information is for educational purposes only and \
     is not a medical diagnosis. Please consult a qualified \
     healthcare professional for personalized advice.";

/// Flag added when the disclaimer was appended by the post-check
pub const DISCLAIMER_ADDED_FLAG: &str = "disclaimer_added";

#[derive(Debug)]
struct CompiledSafetyRule {
    rule: SafetyRule,
    regex: Regex,
}

#[derive(Debug)]
struct CompiledPostRule {
    rule: PostRule,
    regex: Regex,
}

/// Deterministic safety engine evaluating the pre- and post-generation
/// rule tables. Patterns compile once at construction; checks are pure
/// functions of their input.
#[derive(Debug)]
pub struct GuardrailEngine {
    pre_rules: Vec<CompiledSafetyRule>,
    post_rules: Vec<CompiledPostRule>,
}

impl GuardrailEngine {
    /// Build an engine with the default medical rule tables
    pub fn new() -> GuardrailResult<Self> {
        Self::with_rules(default_pre_rules(), default_post_rules())
    }

    /// Build an engine with custom rule tables
    pub fn with_rules(
        pre: Vec<SafetyRule>,
        post: Vec<PostRule>,
    ) -> GuardrailResult<Self> {
        let mut seen: Vec<&str> = Vec::new();
        for id in pre.iter().map(|r| r.id.as_str()).chain(post.iter().map(|r| r.id.as_str())) {
            if seen.contains(&id) {
                return Err(GuardrailError::DuplicateRule(id.to_string()));
            }
            seen.push(id);
        }

        let pre_rules = pre
            .into_iter()
            .map(|rule| {
                compile(&rule.id, &rule.pattern).map(|regex| CompiledSafetyRule { rule, regex })
            })
            .collect::<GuardrailResult<Vec<_>>>()?;

        let post_rules = post
            .into_iter()
            .map(|rule| {
                compile(&rule.id, &rule.pattern).map(|regex| CompiledPostRule { rule, regex })
            })
            .collect::<GuardrailResult<Vec<_>>>()?;

        Ok(Self {
            pre_rules,
            post_rules,
        })
    }

    /// Check user input for unsafe medical intent before any model call.
    ///
    /// Any hard-block match blocks the request; all matching rule ids are
    /// accumulated into the verdict reasons either way.
    pub fn pre_check(&self, text: &str) -> SafetyVerdict {
        let hard: Vec<String> = self
            .pre_rules
            .iter()
            .filter(|c| c.rule.severity == Severity::HardBlock && c.regex.is_match(text))
            .map(|c| format!("hard_block:{}", c.rule.id))
            .collect();

        if !hard.is_empty() {
            warn!(reasons = ?hard, "request blocked by safety pre-check");
            return SafetyVerdict::block(HARD_BLOCK_MESSAGE, hard);
        }

        let soft: Vec<String> = self
            .pre_rules
            .iter()
            .filter(|c| c.rule.severity == Severity::SoftWarning && c.regex.is_match(text))
            .map(|c| format!("soft_warning:{}", c.rule.id))
            .collect();

        if !soft.is_empty() {
            debug!(reasons = ?soft, "soft warnings recorded");
        }

        SafetyVerdict::pass(soft)
    }

    /// Sanitize a generated answer.
    ///
    /// Returns the sanitized answer and the flags raised. A matched
    /// override rule replaces the whole answer with the fixed dosage
    /// refusal and skips the disclaimer step; flags from other rules in
    /// the same pass are still reported. Idempotent: re-running on its
    /// own output changes nothing.
    pub fn post_check(&self, answer: &str) -> (String, Vec<String>) {
        let mut flags: Vec<String> = Vec::new();
        let mut overridden = false;

        for compiled in &self.post_rules {
            if compiled.regex.is_match(answer) {
                flags.push(compiled.rule.id.clone());
                if compiled.rule.action == PostAction::Override {
                    overridden = true;
                }
            }
        }

        if overridden {
            warn!(flags = ?flags, "answer overridden by safety post-check");
            return (DOSAGE_REFUSAL_MESSAGE.to_string(), flags);
        }

        if answer.to_lowercase().contains(&DISCLAIMER_TEXT.to_lowercase()) {
            (answer.to_string(), flags)
        } else {
            flags.push(DISCLAIMER_ADDED_FLAG.to_string());
            (format!("{}\n\n{}", answer, DISCLAIMER_TEXT), flags)
        }
    }
}

fn compile(id: &str, pattern: &str) -> GuardrailResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| GuardrailError::InvalidPattern {
            id: id.to_string(),
            source,
        })
}
