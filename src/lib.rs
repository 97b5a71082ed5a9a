pub mod classifier;
pub mod config;
pub mod error;
pub mod glyphs;
pub mod imaging;
pub mod qa;
pub mod server;

pub use error::{Error, Result};
