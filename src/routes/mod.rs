// Route exports
pub mod copilot;
pub mod error;
pub mod matches;

use std::sync::Arc;

use actix_web::web;

use crate::services::{RecommendationService, SampleCallLibrary, SpeechProvider};

pub use error::{handle_json_payload_error, ApiError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<RecommendationService>,
    pub speech: Arc<dyn SpeechProvider>,
    pub samples: Arc<SampleCallLibrary>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(copilot::configure)
            .configure(matches::configure),
    );
}
