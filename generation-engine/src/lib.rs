//! Answer generation provider seam for MedAssist Engine
//!
//! Generation is stateless: a query plus retrieved context goes in, an
//! answer string comes out. Prompt construction is configuration, not
//! logic — a [`PromptTemplate`] with context and question slots — and
//! the completion service sits behind the [`GenerationProvider`] seam
//! so the pipeline never knows which model answered.

pub mod config;
pub mod error;
pub mod prompt;
pub mod providers;

pub use config::*;
pub use error::*;
pub use prompt::*;
pub use providers::*;
