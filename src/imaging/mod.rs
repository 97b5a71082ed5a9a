mod preprocess;
mod validate;

pub use preprocess::{for_inference, preview};
pub use validate::{
    ImageInfo, MAX_DIMENSION, MAX_IMAGE_SIZE, MIN_DIMENSION, MIN_IMAGE_SIZE, validate,
};
