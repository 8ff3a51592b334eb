use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use housr_match::config::Settings;
use housr_match::core::Matcher;
use housr_match::routes::{self, handle_json_payload_error, AppState};
use housr_match::services::{
    ElevenLabsClient, PropertyCatalog, RecommendationService, SampleCallLibrary, SpeechProvider,
    StaticCatalog,
};

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn load_catalog(settings: &Settings) -> std::io::Result<Arc<dyn PropertyCatalog>> {
    let catalog = match &settings.catalog.path {
        Some(path) => StaticCatalog::from_path(path).map_err(|e| {
            error!("Failed to load catalog from {}: {}", path.display(), e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?,
        None => StaticCatalog::builtin(),
    };

    Ok(Arc::new(catalog))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Housr match service...");

    let catalog = load_catalog(&settings)?;
    info!("Catalog ready with {} properties", catalog.len());

    let matcher = Matcher::new(
        settings.match_weights(),
        settings.recommender.area_matching,
        settings.recommender.tie_break,
    );
    info!("Matcher initialized with weights: {:?}", matcher.weights());

    let recommender = Arc::new(RecommendationService::new(catalog, matcher, &settings.recommender));

    let speech: Arc<dyn SpeechProvider> = Arc::new(
        ElevenLabsClient::new(&settings.provider, settings.voice.clone()).map_err(|e| {
            error!("Failed to build ElevenLabs client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?,
    );

    if !speech.has_credentials() {
        error!("ElevenLabs API key is not set; voice endpoints will fail and transcripts will fall back");
    }

    let samples = Arc::new(SampleCallLibrary::new(settings.samples.audio_dir.clone()));

    let app_state = AppState {
        recommender,
        speech,
        samples,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
