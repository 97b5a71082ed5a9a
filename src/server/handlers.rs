use super::error::ApiError;
use super::types::{PredictResponse, QuestionRequest, QuestionResponse, UploadResponse};
use crate::classifier::{Classifier, Prediction};
use crate::glyphs::{ClassMap, GlyphTranslator};
use crate::qa::QaService;
use crate::{Error, imaging};
use axum::extract::{Multipart, State};
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub class_map: Arc<ClassMap>,
    pub translator: Arc<GlyphTranslator>,
    pub classifier: Arc<dyn Classifier>,
    pub qa: Arc<QaService>,
    pub input_size: u32,
}

struct ImageUpload {
    bytes: Vec<u8>,
    filename: Option<String>,
}

/// Pulls the "file" part out of a multipart body, enforcing an image
/// content-type on it. Other parts are ignored.
async fn read_image_field(
    mut multipart: Multipart,
    type_error: &str,
) -> Result<ImageUpload, ApiError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                let is_image = field
                    .content_type()
                    .map(|c| c.starts_with("image/"))
                    .unwrap_or(false);
                if !is_image {
                    return Err(ApiError::BadRequest(type_error.to_string()));
                }

                let filename = field.file_name().map(|n| n.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec();
                upload = Some(ImageUpload { bytes, filename });
            }
            _ => {} // ignore unknown fields
        }
    }

    upload.ok_or_else(|| ApiError::BadRequest("Missing file in multipart form".to_string()))
}

/// Preprocessing and inference both run off the async worker threads; the
/// model call is synchronous and CPU-bound.
async fn run_classifier(state: &AppState, bytes: Vec<u8>) -> crate::Result<Prediction> {
    let classifier = state.classifier.clone();
    let input_size = state.input_size;

    tokio::task::spawn_blocking(move || {
        let image = imaging::for_inference(&bytes, input_size)?;
        classifier.classify(&image)
    })
    .await
    .map_err(|e| Error::processing(format!("Inference task failed: {}", e)))?
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_image_field(multipart, "File must be an image (JPEG, PNG, etc.)").await?;

    imaging::validate(&upload.bytes)?;

    info!(
        "Processing image: {} ({} bytes)",
        upload.filename.as_deref().unwrap_or("<unnamed>"),
        upload.bytes.len()
    );

    let file_size = upload.bytes.len();
    let prediction = run_classifier(&state, upload.bytes).await.map_err(|e| {
        error!("Glyph recognition failed: {}", e);
        ApiError::Internal(format!("Failed to recognize glyph: {}", e))
    })?;

    let label = state
        .class_map
        .label_for(prediction.class_index as u32)
        .unwrap_or("unknown")
        .to_string();
    info!("Recognized glyph: {}", label);

    let translation = state.translator.translate(&label);
    info!("Translated {} to '{}'", label, translation);

    info!(
        "Successfully processed image: {} -> {} (confidence {:.4})",
        label, translation, prediction.confidence
    );

    Ok(Json(UploadResponse {
        success: true,
        label,
        translation,
        filename: upload.filename,
        file_size,
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let upload = read_image_field(multipart, "File must be an image (.jpg, .png)").await?;

    imaging::validate(&upload.bytes)?;

    let prediction = run_classifier(&state, upload.bytes).await.map_err(|e| {
        error!("Prediction failed: {}", e);
        ApiError::Internal(format!("Prediction failed: {}", e))
    })?;

    let label = state
        .class_map
        .label_for(prediction.class_index as u32)
        .unwrap_or("unknown")
        .to_string();
    let meaning = state
        .class_map
        .meaning_for(&label)
        .unwrap_or("unknown")
        .to_string();

    Ok(Json(PredictResponse {
        predicted_class: label,
        meaning,
        confidence: round4(prediction.confidence),
    }))
}

fn round4(confidence: f32) -> f64 {
    (f64::from(confidence) * 10_000.0).round() / 10_000.0
}

pub async fn question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    validate_question(&request)?;

    if !state.qa.is_available() {
        error!("Question answering service is not available");
        return Err(ApiError::ServiceUnavailable(
            "Question answering service is currently unavailable. Please check your OpenAI API configuration."
                .to_string(),
        ));
    }

    info!(
        "Processing question about '{}': {}",
        request.glyph_translation, request.question
    );

    let context = if request.context.is_empty() {
        None
    } else {
        Some(request.context.as_str())
    };
    let answer = state
        .qa
        .answer(&request.question, &request.glyph_translation, context)
        .await;

    info!(
        "Successfully answered question about '{}'",
        request.glyph_translation
    );

    Ok(Json(QuestionResponse {
        success: true,
        answer,
        question: request.question,
        glyph_translation: request.glyph_translation,
    }))
}

fn validate_question(request: &QuestionRequest) -> Result<(), ApiError> {
    let question_len = request.question.chars().count();
    if question_len == 0 || question_len > 1000 {
        return Err(ApiError::BadRequest(
            "question must be between 1 and 1000 characters".to_string(),
        ));
    }

    let translation_len = request.glyph_translation.chars().count();
    if translation_len == 0 || translation_len > 100 {
        return Err(ApiError::BadRequest(
            "glyph_translation must be between 1 and 100 characters".to_string(),
        ));
    }

    if request.context.chars().count() > 500 {
        return Err(ApiError::BadRequest(
            "context must be at most 500 characters".to_string(),
        ));
    }

    Ok(())
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Athar Backend API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "athar-backend"
    }))
}

pub async fn upload_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "upload",
        "model_available": true,
        "translator_available": true
    }))
}

pub async fn question_health(State(state): State<AppState>) -> Json<Value> {
    let service_available = state.qa.is_available();
    Json(json!({
        "status": if service_available { "healthy" } else { "unhealthy" },
        "service": "question_answering",
        "openai_available": service_available,
        "message": if service_available { "Service is ready" } else { "OpenAI API not configured" }
    }))
}

pub async fn question_example() -> Json<Value> {
    Json(json!({
        "question": "What does this hieroglyph represent and what was its significance in ancient Egypt?",
        "glyph_translation": "sun",
        "context": "This is the G17 hieroglyph, commonly found in royal names and religious texts."
    }))
}
