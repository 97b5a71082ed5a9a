use crate::{Error, Result};
use image::RgbImage;
use ndarray::Array;
use ort::{Session, SessionBuilder, inputs};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Single classification outcome: the winning class index and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    pub confidence: f32,
}

impl Prediction {
    /// Winning class for a raw score vector. The first occurrence wins ties
    /// and the score is clamped into [0.0, 1.0].
    pub fn from_scores(scores: &[f32]) -> Option<Self> {
        scores
            .iter()
            .copied()
            .enumerate()
            .reduce(|accum, row| if row.1 > accum.1 { row } else { accum })
            .map(|(class_index, confidence)| Self {
                class_index,
                confidence: confidence.clamp(0.0, 1.0),
            })
    }
}

/// Anything that can score a preprocessed RGB image against the glyph
/// classes. The ONNX-backed implementation below is the production one;
/// tests substitute their own.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &RgbImage) -> Result<Prediction>;
}

/// ONNX Runtime session wrapper holding the tensor names discovered from the
/// model itself, so exports with different layer naming all work.
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    output_name: String,
    input_size: u32,
}

impl OnnxClassifier {
    pub async fn load(model_path: impl AsRef<Path>, input_size: u32) -> Result<Self> {
        let model_path = model_path.as_ref();

        if matches!(fs::metadata(model_path).await, Err(e) if e.kind() == std::io::ErrorKind::NotFound)
        {
            return Err(Error::ModelNotFound(Box::from(model_path)));
        }

        let session = SessionBuilder::new()?
            .with_parallel_execution(true)?
            .with_memory_pattern(true)?
            .with_model_from_file(model_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| Error::config("Model declares no input tensors"))?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| Error::config("Model declares no output tensors"))?;

        info!(
            "Loaded classifier model from {} (input '{}', output '{}')",
            model_path.display(),
            input_name,
            output_name
        );

        Ok(Self {
            session,
            input_name,
            output_name,
            input_size,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, image: &RgbImage) -> Result<Prediction> {
        let size = self.input_size as usize;
        let mut input = Array::zeros((1, 3, size, size));
        for (x, y, pixel) in image.enumerate_pixels() {
            let x = x as usize;
            let y = y as usize;
            let [r, g, b] = pixel.0;
            input[[0, 0, y, x]] = (r as f32) / 255.;
            input[[0, 1, y, x]] = (g as f32) / 255.;
            input[[0, 2, y, x]] = (b as f32) / 255.;
        }

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => input.view()]?)?;
        let tensor = outputs[self.output_name.as_str()].extract_tensor::<f32>()?;
        let scores: Vec<f32> = tensor.view().iter().copied().collect();

        Prediction::from_scores(&scores)
            .ok_or_else(|| Error::processing("Model returned an empty output tensor"))
    }
}
