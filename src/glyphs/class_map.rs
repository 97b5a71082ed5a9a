use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const EXPECTED_HEADER: [&str; 3] = ["class_id", "label", "meaning"];

/// Immutable table mapping model class indices to glyph labels and labels to
/// display meanings. Built once at startup from a comma-delimited resource
/// with a `class_id,label,meaning` header; a missing file or malformed row
/// aborts startup.
#[derive(Debug, Default)]
pub struct ClassMap {
    label_by_id: HashMap<u32, String>,
    meaning_by_label: HashMap<String, String>,
}

impl ClassMap {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read class map {}: {}", path.display(), e))
        })?;

        let map = Self::parse(&raw)?;
        info!("Loaded {} classes from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut lines = raw.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| Error::config("Class map is empty".to_string()))?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != EXPECTED_HEADER {
            return Err(Error::config(format!(
                "Class map header must be 'class_id,label,meaning', got '{}'",
                header.trim()
            )));
        }

        let mut label_by_id = HashMap::new();
        let mut meaning_by_label = HashMap::new();

        for (idx, line) in lines {
            let line_no = idx + 1;
            // splitn keeps commas inside the meaning column intact
            let mut fields = line.splitn(3, ',');
            let (Some(class_id), Some(label), Some(meaning)) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(Error::config(format!(
                    "Class map line {} has fewer than 3 columns: '{}'",
                    line_no, line
                )));
            };

            let class_id: u32 = class_id.trim().parse().map_err(|_| {
                Error::config(format!(
                    "Class map line {} has non-integer class_id '{}'",
                    line_no,
                    class_id.trim()
                ))
            })?;
            let label = label.trim().to_string();
            let meaning = meaning.trim().to_string();

            if label_by_id.contains_key(&class_id) {
                return Err(Error::config(format!(
                    "Class map line {} repeats class_id {}",
                    line_no, class_id
                )));
            }
            if meaning_by_label.contains_key(&label) {
                return Err(Error::config(format!(
                    "Class map line {} repeats label '{}'",
                    line_no, label
                )));
            }

            label_by_id.insert(class_id, label.clone());
            meaning_by_label.insert(label, meaning);
        }

        Ok(Self {
            label_by_id,
            meaning_by_label,
        })
    }

    /// Glyph label for a model class index.
    pub fn label_for(&self, class_id: u32) -> Option<&str> {
        self.label_by_id.get(&class_id).map(String::as_str)
    }

    /// Display meaning for a glyph label.
    pub fn meaning_for(&self, label: &str) -> Option<&str> {
        self.meaning_by_label.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.label_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label_by_id.is_empty()
    }
}
