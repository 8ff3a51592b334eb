//! Housr match - property matching and call copilot service
//!
//! Ranks a property catalog against a student's budget, areas and vibe,
//! writes reply and summary copy from the matches, and wraps the ElevenLabs
//! speech APIs used by the call copilot.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, ReplyWizard};
pub use models::{Property, RecommendRequest, ScoredProperty, StudentProfile};
pub use services::{ElevenLabsClient, RecommendationService, SpeechProvider, StaticCatalog};
