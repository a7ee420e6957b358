//! The request pipeline.
//!
//! `Validating → Enriching → PreChecking → {Blocked | Retrieving} →
//! Generating → PostChecking → Logging → Completed`. Each stage's
//! external call runs under its configured deadline. Downstream
//! failures degrade the response and mark it in `safety_notes`; the
//! pipeline never aborts without constructing a response.

use std::sync::Arc;
use std::time::Instant;

use audit_trail::{AuditEntry, AuditSink};
use generation_engine::GenerationProvider;
use guardrail_engine::GuardrailEngine;
use retrieval_engine::{RetrievalResult, Retriever};
use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::request::{AssistRequest, AssistResponse, NO_INPUT_MESSAGE};
use crate::state::PipelineState;

/// Safety note recorded when a request carries no usable input
pub const NO_INPUT_FLAG: &str = "no_input";

/// Safety note recorded when retrieval failed and generation ran
/// without corpus context
pub const DEGRADED_RETRIEVAL_FLAG: &str = "degraded:retrieval";

/// Safety note recorded when generation failed and the fixed fallback
/// answer was substituted
pub const DEGRADED_GENERATION_FLAG: &str = "degraded:generation";

/// Fixed answer substituted when the generation call fails or times out
pub const GENERATION_FALLBACK_MESSAGE: &str = "I wasn't able to generate an answer just now. Please try again in a moment.";

/// Composes guardrails, retrieval, generation, and auditing into one
/// request-handling pipeline.
///
/// All collaborators are injected once at construction and shared
/// across requests; the pipeline itself holds no per-request state.
pub struct Orchestrator {
    guardrails: GuardrailEngine,
    retriever: Retriever,
    generation: Arc<dyn GenerationProvider>,
    audit: Arc<dyn AuditSink>,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(
        guardrails: GuardrailEngine,
        retriever: Retriever,
        generation: Arc<dyn GenerationProvider>,
        audit: Arc<dyn AuditSink>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            guardrails,
            retriever,
            generation,
            audit,
            config,
        }
    }

    /// Handle one request end to end.
    ///
    /// Never fails: no-input requests, safety blocks, and downstream
    /// failures all resolve to a complete [`AssistResponse`].
    pub async fn handle(&self, request: AssistRequest) -> AssistResponse {
        let start = Instant::now();
        let mut state = PipelineState::Validating;

        if request.is_empty() {
            info!("request rejected: no usable input");
            return AssistResponse {
                answer: NO_INPUT_MESSAGE.to_string(),
                sources: Vec::new(),
                safety_notes: vec![NO_INPUT_FLAG.to_string()],
                latency_ms: 0,
            };
        }

        advance(&mut state, PipelineState::Enriching);
        let enriched = request.enriched_query();

        advance(&mut state, PipelineState::PreChecking);
        let verdict = self.guardrails.pre_check(&enriched);

        if verdict.blocked {
            advance(&mut state, PipelineState::Blocked);
            return AssistResponse {
                answer: verdict
                    .message
                    .unwrap_or_else(|| guardrail_engine::HARD_BLOCK_MESSAGE.to_string()),
                sources: Vec::new(),
                safety_notes: verdict.reasons,
                latency_ms: elapsed_ms(start),
            };
        }

        // Soft warnings never block and never surface in the response;
        // they are recorded on the audit event
        let pre_warnings = verdict.reasons;
        let mut degradations: Vec<String> = Vec::new();

        // Retrieval is unconditional for now; a routing decision point
        // may gate it later
        advance(&mut state, PipelineState::Retrieving);
        let retrieval = match timeout(
            self.config.retrieval_timeout(),
            self.retriever.retrieve(&enriched, self.config.top_k),
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => {
                warn!(%error, "retrieval failed; continuing without context");
                degradations.push(DEGRADED_RETRIEVAL_FLAG.to_string());
                RetrievalResult::empty()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.retrieval_timeout_ms,
                    "retrieval timed out; continuing without context"
                );
                degradations.push(DEGRADED_RETRIEVAL_FLAG.to_string());
                RetrievalResult::empty()
            }
        };

        // Generation sees the user's original question, not the
        // enriched internal query
        advance(&mut state, PipelineState::Generating);
        let raw_answer = match timeout(
            self.config.generation_timeout(),
            self.generation
                .generate(request.user_text_trimmed(), &retrieval.context),
        )
        .await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(error)) => {
                warn!(%error, "generation failed; substituting fallback answer");
                degradations.push(DEGRADED_GENERATION_FLAG.to_string());
                GENERATION_FALLBACK_MESSAGE.to_string()
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.generation_timeout_ms,
                    "generation timed out; substituting fallback answer"
                );
                degradations.push(DEGRADED_GENERATION_FLAG.to_string());
                GENERATION_FALLBACK_MESSAGE.to_string()
            }
        };

        advance(&mut state, PipelineState::PostChecking);
        let (answer, post_flags) = self.guardrails.post_check(&raw_answer);

        let mut safety_notes = post_flags;
        safety_notes.extend(degradations);

        advance(&mut state, PipelineState::Logging);
        let entry = AuditEntry::new(
            "orchestration",
            json!({
                "used_rag": true,
                "num_sources": retrieval.sources.len(),
                "safety_flags": &safety_notes,
                "pre_check_warnings": pre_warnings,
            }),
        );
        match timeout(self.config.audit_timeout(), self.audit.log(entry)).await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(%error, "audit write failed for orchestration event"),
            Err(_) => warn!("audit write timed out for orchestration event"),
        }

        advance(&mut state, PipelineState::Completed);
        let latency_ms = elapsed_ms(start);
        info!(
            latency_ms,
            num_sources = retrieval.sources.len(),
            notes = safety_notes.len(),
            "request completed"
        );

        AssistResponse {
            answer,
            sources: retrieval.sources.into_iter().collect(),
            safety_notes,
            latency_ms,
        }
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    debug!(from = %state, to = %next, "pipeline transition");
    *state = next;
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
