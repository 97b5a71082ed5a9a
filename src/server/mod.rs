mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use handlers::AppState;
pub use types::{PredictResponse, QuestionRequest, QuestionResponse, UploadResponse};

use crate::classifier::OnnxClassifier;
use crate::config::Config;
use crate::glyphs::{ClassMap, GlyphTranslator};
use crate::qa::QaService;
use crate::{Result, imaging};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

// Leaves headroom above the validator's byte cap so oversized uploads are
// rejected with the validator's message rather than a framing error.
const BODY_LIMIT: usize = 2 * imaging::MAX_IMAGE_SIZE;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .route("/api/v1/upload", post(handlers::upload))
        .route("/api/v1/upload/health", get(handlers::upload_health))
        .route("/api/v1/question", post(handlers::question))
        .route("/api/v1/question/health", get(handlers::question_health))
        .route("/api/v1/question/example", get(handlers::question_example))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Lookup tables and the model artifact must all be present before the
    // listener binds; any failure here aborts startup.
    let class_map = ClassMap::load(&config.model.class_map_path)?;
    let translator = GlyphTranslator::load(&config.glyphs.mapping_path)?;
    let classifier = OnnxClassifier::load(&config.model.path, config.model.input_size).await?;
    let qa = QaService::new(&config.qa);

    let state = AppState {
        class_map: Arc::new(class_map),
        translator: Arc::new(translator),
        classifier: Arc::new(classifier),
        qa: Arc::new(qa),
        input_size: config.model.input_size,
    };

    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
