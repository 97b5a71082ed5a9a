use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Glyph-code to translation lookup, loaded eagerly at startup and shared
/// through application state. Unknown codes resolve to a sentinel string
/// rather than an error.
#[derive(Debug, Default)]
pub struct GlyphTranslator {
    mapping: HashMap<String, String>,
}

impl GlyphTranslator {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read glyph mapping {}: {}",
                path.display(),
                e
            ))
        })?;

        let mapping: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
            Error::config(format!(
                "Glyph mapping {} is not a flat JSON object of strings: {}",
                path.display(),
                e
            ))
        })?;

        info!("Loaded {} glyph translations from {}", mapping.len(), path.display());
        Ok(Self { mapping })
    }

    pub fn from_mapping(mapping: HashMap<String, String>) -> Self {
        Self { mapping }
    }

    /// Translation for a glyph code, or the unknown-glyph sentinel.
    pub fn translate(&self, code: &str) -> String {
        self.mapping
            .get(code)
            .cloned()
            .unwrap_or_else(|| format!("Unknown glyph: {}", code))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
