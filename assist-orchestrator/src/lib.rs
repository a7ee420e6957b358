//! Request orchestration pipeline for MedAssist Engine
//!
//! The orchestrator owns the one piece of real decision logic in the
//! system: the state machine that takes a multimodal request through
//! validation, query enrichment, safety pre-checking, retrieval,
//! generation, safety post-checking, and audit logging, and always
//! produces a structured [`AssistResponse`].
//!
//! Guarantees:
//! - `handle` never fails: empty input, safety blocks, and downstream
//!   failures all resolve to a complete response
//! - the safety pre-check runs before any external model call and can
//!   short-circuit the pipeline
//! - every external call carries a deadline; a slow collaborator
//!   degrades the response instead of hanging the request
//! - no state survives a request; concurrent requests never interact
//!
//! # Example
//!
//! ```rust,no_run
//! use assist_orchestrator::{AssistRequest, Orchestrator};
//!
//! # async fn example(orchestrator: Orchestrator) {
//! let response = orchestrator
//!     .handle(AssistRequest::text("What are common flu symptoms?"))
//!     .await;
//!
//! println!("{}", response.answer);
//! # }
//! ```

pub mod config;
pub mod pipeline;
pub mod request;
pub mod state;

pub use config::*;
pub use pipeline::*;
pub use request::*;
pub use state::*;
