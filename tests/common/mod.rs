#![allow(dead_code)]

use async_trait::async_trait;
use athar_backend::classifier::{Classifier, Prediction};
use athar_backend::config::QaConfig;
use athar_backend::glyphs::{ClassMap, GlyphTranslator};
use athar_backend::qa::{CompletionClient, QaService};
use athar_backend::server::{self, AppState};
use athar_backend::{Error, Result};
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use image::RgbImage;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

pub const CLASS_MAP: &str = "class_id,label,meaning\n0,G17,owl\n1,N5,sun\n2,A1,seated man\n";

pub const BOUNDARY: &str = "athar-test-boundary";

/// Classifier that always reports the same outcome.
pub struct StubClassifier {
    pub prediction: Prediction,
}

impl StubClassifier {
    pub fn predicting(class_index: usize, confidence: f32) -> Arc<Self> {
        Arc::new(Self {
            prediction: Prediction {
                class_index,
                confidence,
            },
        })
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, _image: &RgbImage) -> Result<Prediction> {
        Ok(self.prediction)
    }
}

/// Classifier that always fails, for exercising the 500 paths.
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _image: &RgbImage) -> Result<Prediction> {
        Err(Error::processing("model exploded"))
    }
}

/// Completion backend that answers every prompt with the same text.
pub struct CannedClient(pub &'static str);

#[async_trait]
impl CompletionClient for CannedClient {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Completion backend whose calls always fail.
pub struct FailingCompletionClient;

#[async_trait]
impl CompletionClient for FailingCompletionClient {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        Err(Error::processing("connection refused"))
    }
}

pub fn disabled_qa() -> QaService {
    QaService::new(&QaConfig::default())
}

pub fn canned_qa(answer: &'static str) -> QaService {
    QaService::with_client(Box::new(CannedClient(answer)))
}

pub fn test_state(classifier: Arc<dyn Classifier>, qa: QaService) -> AppState {
    let mapping = HashMap::from([
        ("G17".to_string(), "owl".to_string()),
        ("N5".to_string(), "sun".to_string()),
    ]);

    AppState {
        class_map: Arc::new(ClassMap::parse(CLASS_MAP).unwrap()),
        translator: Arc::new(GlyphTranslator::from_mapping(mapping)),
        classifier,
        qa: Arc::new(qa),
        input_size: 224,
    }
}

pub fn test_app(classifier: Arc<dyn Classifier>, qa: QaService) -> Router {
    server::router(test_state(classifier, qa))
}

/// PNG filled with deterministic noise so the encoded file clears the
/// minimum-size bound.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut seed = 0x2545_f491_u32;
    let img = RgbImage::from_fn(width, height, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let b = seed.to_le_bytes();
        image::Rgb([b[0], b[1], b[2]])
    });

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// BMP padded with trailing zeros up to `min_len`; header checks never read
/// the padding.
pub fn padded_bmp_bytes(width: u32, height: u32, min_len: usize) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Bmp).unwrap();

    let mut bytes = out.into_inner();
    if bytes.len() < min_len {
        bytes.resize(min_len, 0);
    }
    bytes
}

pub fn multipart_body(filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(
    uri: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(filename, content_type, bytes)))
        .unwrap()
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
