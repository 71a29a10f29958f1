use std::{io, path::PathBuf};

use thiserror::Error;

use crate::generator::Stage;

/// Run-level failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Text generation call failed: {0:#}")]
    TextCallFailed(color_eyre::Report),

    #[error("No JSON object found in the model response. Full response:\n{raw}")]
    NoJsonFound { raw: String },

    #[error("Model response contained invalid site JSON ({reason}). Offending fragment:\n{fragment}")]
    InvalidJson { fragment: String, reason: String },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },
}

impl GenerationError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::TextCallFailed(_) => Stage::RequestText,
            Self::NoJsonFound { .. } => Stage::ExtractJson,
            Self::InvalidJson { .. } => Stage::ParseJson,
            Self::WriteFailed { .. } => Stage::WriteSiteFiles,
        }
    }
}

/// Failures confined to a single image. These are reported and skipped.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image generation call failed: {0:#}")]
    CallFailed(color_eyre::Report),

    #[error("Response contained no inline image data")]
    MissingInlineData,

    #[error("Inline image data is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsafe image filename: {0:?}")]
    UnsafeFilename(String),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },
}
