//! MedAssist command-line interface.
//!
//! `medassist ask` runs one request through the full pipeline and
//! prints the response JSON; `medassist ingest` loads a plain-text
//! corpus into the configured vector index. Configuration comes from
//! the environment (`.env` is honored); note that without
//! `VECTOR_INDEX_URL` the in-memory index is used, which lives only as
//! long as the process.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use assist_orchestrator::{AssistRequest, Orchestrator, PipelineConfig};
use audit_trail::TracingSink;
use generation_engine::GenerationConfig;
use guardrail_engine::GuardrailEngine;
use multimodal_gateway::GatewayConfig;
use retrieval_engine::{CorpusIngestor, RetrievalConfig, Retriever};

#[derive(Parser)]
#[command(name = "medassist", about = "Medical question answering with deterministic safety policy", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the response JSON
    Ask {
        /// Question text
        #[arg(long)]
        text: Option<String>,
        /// Audio file to transcribe into the question text
        #[arg(long, conflicts_with = "text")]
        audio: Option<PathBuf>,
        /// Pre-extracted image summary to attach as context
        #[arg(long)]
        image_summary: Option<String>,
        /// Image file to describe via the configured vision service
        #[arg(long, conflicts_with = "image_summary")]
        image: Option<PathBuf>,
        /// Synthesize the answer to this audio file
        #[arg(long, value_name = "FILE")]
        speak: Option<PathBuf>,
    },
    /// Ingest every .txt/.md file in a directory into the vector index
    Ingest {
        /// Corpus directory
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            text,
            audio,
            image_summary,
            image,
            speak,
        } => ask(text, audio, image_summary, image, speak).await,
        Commands::Ingest { dir } => ingest(dir).await,
    }
}

async fn ask(
    text: Option<String>,
    audio: Option<PathBuf>,
    image_summary: Option<String>,
    image: Option<PathBuf>,
    speak: Option<PathBuf>,
) -> Result<()> {
    let retrieval_config = RetrievalConfig::from_env().context("retrieval configuration")?;
    let generation_config = GenerationConfig::from_env().context("generation configuration")?;
    let pipeline_config = PipelineConfig::from_env();
    let gateway = GatewayConfig::from_env().context("gateway configuration")?;

    let text = match audio {
        Some(path) => {
            let provider = gateway
                .transcription_provider()?
                .context("TRANSCRIPTION_API_URL is not configured")?;
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            Some(provider.transcribe(&bytes).await?)
        }
        None => text,
    };

    let image_summary = match image {
        Some(path) => {
            let provider = gateway
                .image_provider()?
                .context("VISION_API_URL is not configured")?;
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            Some(provider.describe(&bytes).await?)
        }
        None => image_summary,
    };

    let audit = Arc::new(TracingSink::new());
    let retriever = Retriever::new(
        retrieval_config.embedding_provider(),
        retrieval_config.vector_index(),
        audit.clone(),
    );
    let orchestrator = Orchestrator::new(
        GuardrailEngine::new()?,
        retriever,
        generation_config.provider(),
        audit,
        pipeline_config,
    );

    let response = orchestrator
        .handle(AssistRequest::new(text, image_summary))
        .await;

    if let Some(path) = speak {
        let provider = gateway
            .speech_provider()?
            .context("SPEECH_API_URL is not configured")?;
        let bytes = provider.synthesize(&response.answer).await?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(file = %path.display(), "answer audio written");
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn ingest(dir: PathBuf) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let config = RetrievalConfig::from_env().context("retrieval configuration")?;
    let embedding = config.embedding_provider();
    let index = config.vector_index();

    let ingestor = CorpusIngestor::new(embedding.as_ref(), index.as_ref())
        .with_chunking(config.chunk_size, config.chunk_overlap)
        .with_min_document_length(config.min_document_length);

    let report = ingestor.ingest_dir(&dir).await?;

    info!(
        documents = report.documents_loaded,
        skipped = report.documents_skipped,
        chunks = report.chunks_upserted,
        "ingestion finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
