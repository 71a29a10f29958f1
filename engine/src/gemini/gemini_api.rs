use color_eyre::{
    Result,
    eyre::{WrapErr, bail, eyre},
};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

mod error;
pub use error::GeminiApiError;

use crate::image_model::{ImageResponse, ResponsePart};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    /// base64
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<Modality>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl RequestBody {
    pub fn user_prompt(prompt: &str, modalities: Option<Vec<Modality>>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                    inline_data: None,
                }],
            }],
            generation_config: modalities.map(|response_modalities| GenerationConfig {
                response_modalities,
            }),
        }
    }
}

impl GenerateContentResponse {
    fn first_candidate(&self) -> Result<&Candidate> {
        self.candidates.first().ok_or_else(|| {
            match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                Some(reason) => eyre!("Gemini returned no candidates, prompt blocked: {reason}"),
                None => eyre!("Gemini returned no candidates"),
            }
        })
    }

    fn parts(&self) -> Result<&[Part]> {
        Ok(self
            .first_candidate()?
            .content
            .as_ref()
            .map(|c| c.parts.as_slice())
            .unwrap_or_default())
    }

    /// All text parts of the first candidate, concatenated.
    pub fn text(&self) -> Result<String> {
        let text: String = self.parts()?.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            let reason = self.candidates[0].finish_reason.as_deref().unwrap_or("unknown");
            bail!("Gemini response contained no text (finish reason: {reason})");
        }
        Ok(text)
    }

    /// The first candidate's parts. A response without candidates is an
    /// image-less response, not an error.
    pub fn into_image_response(self) -> ImageResponse {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        ImageResponse {
            parts: parts
                .into_iter()
                .filter_map(|part| match part {
                    Part {
                        inline_data: Some(blob),
                        ..
                    } => Some(ResponsePart::InlineData {
                        mime_type: blob.mime_type,
                        data: blob.data,
                    }),
                    Part {
                        text: Some(text), ..
                    } => Some(ResponsePart::Text(text)),
                    _ => None,
                })
                .collect(),
        }
    }
}

pub async fn generate_content(
    base_url: &str,
    model: &str,
    api_key: &str,
    body: &RequestBody,
    client: &Client,
) -> Result<GenerateContentResponse> {
    let url = format!("{}/models/{model}:generateContent", base_url.trim_end_matches('/'));
    debug!("POST {url}\n{}", serde_json::to_string(body)?);

    let resp = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(body)
        .send()
        .await
        .wrap_err("sending generateContent request")?;

    let status = resp.status();
    let text = resp.text().await.wrap_err("reading generateContent response")?;

    if !status.is_success() {
        return Err(GeminiApiError::from_response(status.as_u16(), &text).into());
    }

    serde_json::from_str(&text).wrap_err_with(|| format!("parsing generateContent response:\n{text}"))
}
