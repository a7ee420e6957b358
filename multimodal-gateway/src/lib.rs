//! Transcription, image description, and speech synthesis seams for
//! MedAssist Engine
//!
//! These collaborators live outside the core answer pipeline: audio
//! becomes text before a request enters it, and the response's answer
//! may be synthesized to audio after it leaves. The core trusts the
//! image-description provider to emit neutral descriptive text with no
//! diagnostic claims — the fixed instruction in [`vision`] enforces
//! that at the prompt level.
//!
//! All providers are HTTP adapters in the same style: constructed once
//! from configuration, holding a single `reqwest` client.

pub mod config;
pub mod error;
pub mod speech;
pub mod transcription;
pub mod vision;

pub use config::*;
pub use error::*;
pub use speech::*;
pub use transcription::*;
pub use vision::*;
