//! Model card document: YAML front matter followed by a markdown body.
//!
//! A card on disk has the format:
//! ```text
//! ---
//! license: apache-2.0
//! library_name: diffusers
//! ---
//! # model-name
//! ...
//! ```
//!
//! Files without a front matter block, or with one that does not parse as a
//! YAML mapping, are read as a card with no metadata and the whole text as body.

use serde_yaml::Value;
use std::path::Path;

use super::data::ModelCardData;
use crate::error::CardError;

const DELIMITER: &str = "---";

/// In-memory model card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCard {
    pub data: ModelCardData,
    /// Markdown body following the metadata block.
    pub content: String,
}

impl ModelCard {
    pub fn new(data: ModelCardData, content: impl Into<String>) -> Self {
        Self {
            data,
            content: content.into(),
        }
    }

    /// Parse card text. Never fails: unreadable metadata degrades to none.
    pub fn parse(text: &str) -> Self {
        let Some((yaml, body)) = split_front_matter(text) else {
            return Self::new(ModelCardData::default(), text);
        };

        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(map)) => Self::new(ModelCardData::from_mapping(map), body),
            Ok(Value::Null) => Self::new(ModelCardData::default(), body),
            Ok(other) => {
                tracing::warn!(
                    kind = yaml_kind(&other),
                    "Model card front matter is not a mapping; treating it as body text"
                );
                Self::new(ModelCardData::default(), text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable model card front matter; treating it as body text");
                Self::new(ModelCardData::default(), text)
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, CardError> {
        let text = std::fs::read_to_string(path).map_err(|e| CardError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Load the card at `path`, or start an empty one if no file exists.
    pub fn load_or_default(path: &Path) -> Result<Self, CardError> {
        if path.is_file() {
            tracing::debug!(path = %path.display(), "Loading existing model card");
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No model card found, starting empty");
            Ok(Self::default())
        }
    }

    /// Serialize metadata and body back into card text.
    pub fn to_markdown(&self) -> Result<String, CardError> {
        if self.data.is_empty() {
            return Ok(self.content.clone());
        }
        let yaml = serde_yaml::to_string(&Value::Mapping(self.data.to_mapping()))?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", self.content))
    }

    /// Write the card to `path`, creating parent directories and overwriting.
    pub fn save(&self, path: &Path) -> Result<(), CardError> {
        let text = self.to_markdown()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CardError::io(parent, e))?;
            }
        }
        std::fs::write(path, text).map_err(|e| CardError::io(path, e))
    }
}

/// Split `---` delimited front matter from the body.
///
/// The opening delimiter must be the first non-whitespace line; the block ends
/// at the next line consisting of `---` alone.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = text.trim_start().strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
