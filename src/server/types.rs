use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub glyph_translation: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub success: bool,
    pub answer: String,
    pub question: String,
    pub glyph_translation: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub label: String,
    pub translation: String,
    pub filename: Option<String>,
    pub file_size: usize,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_class: String,
    pub meaning: String,
    pub confidence: f64,
}
