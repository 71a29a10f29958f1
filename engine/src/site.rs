use std::path::{Component, Path};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GenerationError, ImageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt_text: String,
}

impl GenerationRequest {
    pub fn new(prompt_text: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
        }
    }
}

/// The html/css/js triple plus image manifest returned by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteBundle {
    pub html: String,
    pub css: String,
    pub js: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ImageSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub filename: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ImageSpec>, D::Error> {
    Ok(Option::<Vec<ImageSpec>>::deserialize(d)?.unwrap_or_default())
}

impl SiteBundle {
    pub fn from_json(fragment: &str) -> Result<Self, GenerationError> {
        let invalid = |reason: String| GenerationError::InvalidJson {
            fragment: fragment.to_string(),
            reason,
        };

        let bundle: SiteBundle = serde_json::from_str(fragment).map_err(|e| invalid(e.to_string()))?;

        for (field, value) in [("html", &bundle.html), ("css", &bundle.css), ("js", &bundle.js)] {
            if value.is_empty() {
                return Err(invalid(format!("field `{field}` is empty")));
            }
        }

        Ok(bundle)
    }

    /// Takes the first candidate that is a valid bundle. If none is, the
    /// error for the longest candidate is returned, since that is most likely
    /// the payload the model meant to send.
    pub fn from_candidates(candidates: &[&str]) -> Result<Self, GenerationError> {
        let mut best_err: Option<(usize, GenerationError)> = None;

        for candidate in candidates {
            match Self::from_json(candidate) {
                Ok(bundle) => return Ok(bundle),
                Err(e) => {
                    if best_err.as_ref().is_none_or(|(len, _)| candidate.len() > *len) {
                        best_err = Some((candidate.len(), e));
                    }
                }
            }
        }

        Err(best_err.map(|(_, e)| e).unwrap_or_else(|| GenerationError::InvalidJson {
            fragment: String::new(),
            reason: "no candidate JSON object".into(),
        }))
    }
}

impl ImageSpec {
    /// The filename as a path relative to the images directory. Anything that
    /// could escape it (`..`, absolute paths, drive prefixes) is rejected.
    pub fn relative_path(&self) -> Result<&Path, ImageError> {
        let path = Path::new(&self.filename);
        let safe = !self.filename.is_empty()
            && path.components().all(|c| matches!(c, Component::Normal(_)));

        if safe {
            Ok(path)
        } else {
            Err(ImageError::UnsafeFilename(self.filename.clone()))
        }
    }
}
