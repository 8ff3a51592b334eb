// Service exports
pub mod catalog;
pub mod eleven;
pub mod recommender;
pub mod samples;

pub use catalog::{CatalogError, PropertyCatalog, StaticCatalog};
pub use eleven::{ElevenLabsClient, ProviderError, SpeechProvider};
pub use recommender::{RecommendError, RecommendationService};
pub use samples::{SampleCall, SampleCallLibrary, TranscriptSource};
