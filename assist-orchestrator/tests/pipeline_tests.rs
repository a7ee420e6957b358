//! End-to-end pipeline tests against the response contract.
//!
//! Collaborators are in-process fakes implementing the provider seams,
//! so every path through the state machine is exercised without any
//! external service.

use std::sync::Arc;
use std::time::Duration;

use assist_orchestrator::{
    AssistRequest, Orchestrator, PipelineConfig, GENERATION_FALLBACK_MESSAGE, NO_INPUT_MESSAGE,
};
use async_trait::async_trait;
use audit_trail::{AuditEntry, AuditError, AuditResult, AuditSink, MemorySink};
use generation_engine::GenerationProvider;
use guardrail_engine::{GuardrailEngine, DISCLAIMER_TEXT, DOSAGE_REFUSAL_MESSAGE, HARD_BLOCK_MESSAGE};
use retrieval_engine::{
    ChunkMetadata, EmbeddingProvider, MemoryVectorIndex, Retriever, VectorIndex,
};
use tokio::sync::Mutex;

// ---------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------

struct ConstantEmbedding;

#[async_trait]
impl EmbeddingProvider for ConstantEmbedding {
    async fn embed(&self, _text: &str) -> retrieval_engine::Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }
}

struct FailingEmbedding;

#[async_trait]
impl EmbeddingProvider for FailingEmbedding {
    async fn embed(&self, _text: &str) -> retrieval_engine::Result<Vec<f32>> {
        Err(retrieval_engine::RetrievalError::Embedding(
            "embedding service unavailable".to_string(),
        ))
    }
}

/// Records the query/context it was called with and returns a canned answer
struct CapturingGeneration {
    answer: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl CapturingGeneration {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl GenerationProvider for CapturingGeneration {
    async fn generate(&self, query: &str, context: &str) -> generation_engine::Result<String> {
        self.calls
            .lock()
            .await
            .push((query.to_string(), context.to_string()));
        Ok(self.answer.clone())
    }
}

struct FailingGeneration;

#[async_trait]
impl GenerationProvider for FailingGeneration {
    async fn generate(&self, _query: &str, _context: &str) -> generation_engine::Result<String> {
        Err(generation_engine::GenerationError::Provider(
            "completion service unavailable".to_string(),
        ))
    }
}

struct SlowGeneration;

#[async_trait]
impl GenerationProvider for SlowGeneration {
    async fn generate(&self, _query: &str, _context: &str) -> generation_engine::Result<String> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("too late".to_string())
    }
}

struct FailingSink;

#[async_trait]
impl AuditSink for FailingSink {
    async fn log(&self, _entry: AuditEntry) -> AuditResult<()> {
        Err(AuditError::Sink("audit store unreachable".to_string()))
    }
}

// ---------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------

async fn seeded_index() -> Arc<MemoryVectorIndex> {
    let index = MemoryVectorIndex::new();
    let chunks = [
        ("c1", "Influenza is a contagious respiratory illness.", "flu_overview.txt"),
        ("c2", "Flu symptoms include fever, cough, and fatigue.", "flu_overview.txt"),
        ("c3", "Rest and hydration support recovery from the flu.", "self_care.txt"),
    ];
    for (id, text, source) in chunks {
        index
            .upsert(
                id,
                vec![1.0, 0.0],
                ChunkMetadata {
                    text: text.to_string(),
                    source: source.to_string(),
                },
            )
            .await
            .unwrap();
    }
    Arc::new(index)
}

fn orchestrator(
    embedding: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    generation: Arc<dyn GenerationProvider>,
    audit: Arc<dyn AuditSink>,
    config: PipelineConfig,
) -> Orchestrator {
    let retriever = Retriever::new(embedding, index, audit.clone());
    Orchestrator::new(
        GuardrailEngine::new().unwrap(),
        retriever,
        generation,
        audit,
        config,
    )
}

async fn default_orchestrator(
    generation: Arc<dyn GenerationProvider>,
    audit: Arc<dyn AuditSink>,
) -> Orchestrator {
    orchestrator(
        Arc::new(ConstantEmbedding),
        seeded_index().await,
        generation,
        audit,
        PipelineConfig::default(),
    )
}

// ---------------------------------------------------------------------
// Terminal short-circuits
// ---------------------------------------------------------------------

#[tokio::test]
async fn empty_request_short_circuits_with_zero_latency() {
    let audit = Arc::new(MemorySink::new());
    let orchestrator = default_orchestrator(
        Arc::new(CapturingGeneration::new("unused")),
        audit.clone(),
    )
    .await;

    let response = orchestrator.handle(AssistRequest::default()).await;

    assert_eq!(response.answer, NO_INPUT_MESSAGE);
    assert!(response.sources.is_empty());
    assert_eq!(response.safety_notes, vec!["no_input".to_string()]);
    assert_eq!(response.latency_ms, 0);
    // All downstream stages were skipped
    assert!(audit.entries().await.is_empty());
}

#[tokio::test]
async fn blank_whitespace_inputs_count_as_no_input() {
    let orchestrator = default_orchestrator(
        Arc::new(CapturingGeneration::new("unused")),
        Arc::new(MemorySink::new()),
    )
    .await;

    let request = AssistRequest::new(Some("   ".to_string()), Some("\n\t".to_string()));
    let response = orchestrator.handle(request).await;

    assert_eq!(response.answer, NO_INPUT_MESSAGE);
    assert_eq!(response.latency_ms, 0);
}

#[tokio::test]
async fn hard_block_skips_retrieval_and_generation() {
    let audit = Arc::new(MemorySink::new());
    let generation = Arc::new(CapturingGeneration::new("unused"));
    let orchestrator = default_orchestrator(generation.clone(), audit.clone()).await;

    let response = orchestrator
        .handle(AssistRequest::text("What dosage of ibuprofen should I take?"))
        .await;

    assert_eq!(response.answer, HARD_BLOCK_MESSAGE);
    assert!(response.sources.is_empty());
    assert!(response
        .safety_notes
        .iter()
        .any(|n| n.starts_with("hard_block:")));
    assert!(generation.calls().await.is_empty());
    assert!(audit.entries().await.is_empty());
}

#[tokio::test]
async fn image_summary_alone_can_trigger_a_block() {
    let orchestrator = default_orchestrator(
        Arc::new(CapturingGeneration::new("unused")),
        Arc::new(MemorySink::new()),
    )
    .await;

    // The enriched query carries the image block, so the pre-check sees it
    let request = AssistRequest::new(None, Some("Label reads: emergency use only".to_string()));
    let response = orchestrator.handle(request).await;

    assert_eq!(response.answer, HARD_BLOCK_MESSAGE);
    assert!(response
        .safety_notes
        .contains(&"hard_block:emergency".to_string()));
}

// ---------------------------------------------------------------------
// The full path
// ---------------------------------------------------------------------

#[tokio::test]
async fn soft_warning_question_proceeds_to_generation() {
    let audit = Arc::new(MemorySink::new());
    let generation = Arc::new(CapturingGeneration::new("Flu care centers on rest and fluids."));
    let orchestrator = default_orchestrator(generation.clone(), audit.clone()).await;

    let response = orchestrator
        .handle(AssistRequest::text("What treatment options exist for the flu?"))
        .await;

    // Not blocked; generation ran
    assert_eq!(generation.calls().await.len(), 1);
    assert!(response.answer.starts_with("Flu care centers on rest and fluids."));
    // Soft warnings stay off the response but land on the audit event
    assert!(!response.safety_notes.iter().any(|n| n.starts_with("soft_warning:")));
    let entries = audit.entries().await;
    let orchestration = entries
        .iter()
        .find(|e| e.event_type == "orchestration")
        .unwrap();
    assert_eq!(
        orchestration.payload["pre_check_warnings"][0],
        "soft_warning:treatment"
    );
}

#[tokio::test]
async fn generation_receives_original_text_and_retrieved_context() {
    let generation = Arc::new(CapturingGeneration::new("An educational answer."));
    let orchestrator = default_orchestrator(generation.clone(), Arc::new(MemorySink::new())).await;

    let request = AssistRequest::new(
        Some("What is this rash?".to_string()),
        Some("Flat red patch, roughly 2 cm, no swelling.".to_string()),
    );
    orchestrator.handle(request).await;

    let calls = generation.calls().await;
    assert_eq!(calls.len(), 1);
    let (query, context) = &calls[0];
    // The original question, not the enriched internal query
    assert_eq!(query, "What is this rash?");
    assert!(!query.contains("Image findings"));
    // Ranked context joined with blank lines
    assert!(context.contains("\n\n"));
    assert!(context.contains("Influenza is a contagious respiratory illness."));
}

#[tokio::test]
async fn sources_are_deduplicated() {
    // The seeded index holds three chunks over two source documents
    let generation = Arc::new(CapturingGeneration::new("Answer."));
    let orchestrator = default_orchestrator(generation, Arc::new(MemorySink::new())).await;

    let response = orchestrator
        .handle(AssistRequest::text("Tell me about the flu"))
        .await;

    assert_eq!(response.sources.len(), 2);
    assert!(response.sources.contains(&"flu_overview.txt".to_string()));
    assert!(response.sources.contains(&"self_care.txt".to_string()));
}

#[tokio::test]
async fn clean_answer_gains_disclaimer() {
    let generation = Arc::new(CapturingGeneration::new("Influenza is a seasonal virus."));
    let orchestrator = default_orchestrator(generation, Arc::new(MemorySink::new())).await;

    let response = orchestrator
        .handle(AssistRequest::text("What is influenza?"))
        .await;

    assert_eq!(
        response.answer,
        format!("Influenza is a seasonal virus.\n\n{}", DISCLAIMER_TEXT)
    );
    assert!(response
        .safety_notes
        .contains(&"disclaimer_added".to_string()));
}

#[tokio::test]
async fn dosage_answer_is_replaced_entirely() {
    let generation = Arc::new(CapturingGeneration::new("You should take 500 mg of drug X."));
    let orchestrator = default_orchestrator(generation, Arc::new(MemorySink::new())).await;

    let response = orchestrator
        .handle(AssistRequest::text("Tell me about drug X"))
        .await;

    assert_eq!(response.answer, DOSAGE_REFUSAL_MESSAGE);
    assert!(response.safety_notes.contains(&"dosage_detected".to_string()));
    assert!(!response.safety_notes.contains(&"disclaimer_added".to_string()));
}

#[tokio::test]
async fn orchestration_event_is_audited() {
    let audit = Arc::new(MemorySink::new());
    let generation = Arc::new(CapturingGeneration::new("Answer."));
    let orchestrator = default_orchestrator(generation, audit.clone()).await;

    orchestrator
        .handle(AssistRequest::text("What is influenza?"))
        .await;

    let entries = audit.entries().await;
    // One retrieval event, one orchestration event
    assert_eq!(entries.len(), 2);
    let orchestration = entries
        .iter()
        .find(|e| e.event_type == "orchestration")
        .unwrap();
    assert_eq!(orchestration.payload["used_rag"], serde_json::json!(true));
    assert_eq!(orchestration.payload["num_sources"], serde_json::json!(2));
}

// ---------------------------------------------------------------------
// Degradation paths
// ---------------------------------------------------------------------

#[tokio::test]
async fn retrieval_failure_degrades_to_empty_context() {
    let generation = Arc::new(CapturingGeneration::new("Answer without context."));
    let orchestrator = orchestrator(
        Arc::new(FailingEmbedding),
        seeded_index().await,
        generation.clone(),
        Arc::new(MemorySink::new()),
        PipelineConfig::default(),
    );

    let response = orchestrator
        .handle(AssistRequest::text("What is influenza?"))
        .await;

    assert!(response
        .safety_notes
        .contains(&"degraded:retrieval".to_string()));
    assert!(response.sources.is_empty());
    // Generation still ran, with no context
    let calls = generation.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "");
    assert!(response.answer.starts_with("Answer without context."));
}

#[tokio::test]
async fn generation_failure_substitutes_fallback_answer() {
    let orchestrator = default_orchestrator(
        Arc::new(FailingGeneration),
        Arc::new(MemorySink::new()),
    )
    .await;

    let response = orchestrator
        .handle(AssistRequest::text("What is influenza?"))
        .await;

    assert!(response
        .safety_notes
        .contains(&"degraded:generation".to_string()));
    // The fallback answer still passes through the post-check
    assert_eq!(
        response.answer,
        format!("{}\n\n{}", GENERATION_FALLBACK_MESSAGE, DISCLAIMER_TEXT)
    );
    // Retrieval succeeded, so sources are still reported
    assert!(!response.sources.is_empty());
}

#[tokio::test]
async fn generation_timeout_degrades_instead_of_hanging() {
    let config = PipelineConfig {
        generation_timeout_ms: 50,
        ..PipelineConfig::default()
    };
    let orchestrator = orchestrator(
        Arc::new(ConstantEmbedding),
        seeded_index().await,
        Arc::new(SlowGeneration),
        Arc::new(MemorySink::new()),
        config,
    );

    let response = orchestrator
        .handle(AssistRequest::text("What is influenza?"))
        .await;

    assert!(response
        .safety_notes
        .contains(&"degraded:generation".to_string()));
    assert!(response.answer.starts_with(GENERATION_FALLBACK_MESSAGE));
}

#[tokio::test]
async fn audit_failure_never_alters_the_response() {
    let generation = Arc::new(CapturingGeneration::new("Answer."));
    let orchestrator = orchestrator(
        Arc::new(ConstantEmbedding),
        seeded_index().await,
        generation,
        Arc::new(FailingSink),
        PipelineConfig::default(),
    );

    let response = orchestrator
        .handle(AssistRequest::text("What is influenza?"))
        .await;

    assert!(response.answer.starts_with("Answer."));
    assert!(!response.safety_notes.iter().any(|n| n.starts_with("degraded:")));
}
