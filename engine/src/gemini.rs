use log::debug;

use crate::{
    image_model::{ImageFuture, ImageModel},
    llm::{LLM, LLMFuture},
};

pub mod gemini_api;
use gemini_api::{Modality, RequestBody};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google's Generative Language API. One instance talks to one model; clone
/// it and use [`Gemini::with_model`] to talk to another model over the same
/// connection pool.
#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl Gemini {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl LLM for Gemini {
    fn generate<'a>(&'a self, prompt: &'a str) -> LLMFuture<'a> {
        Box::pin(async move {
            let body = RequestBody::user_prompt(prompt, None);
            let response = gemini_api::generate_content(
                &self.base_url,
                &self.model,
                &self.api_key,
                &body,
                &self.client,
            )
            .await?;
            debug!("Text response: {response:#?}");
            response.text()
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

impl ImageModel for Gemini {
    fn get_image<'a>(&'a self, prompt: &'a str) -> ImageFuture<'a> {
        Box::pin(async move {
            let body = RequestBody::user_prompt(prompt, Some(vec![Modality::Text, Modality::Image]));
            let response = gemini_api::generate_content(
                &self.base_url,
                &self.model,
                &self.api_key,
                &body,
                &self.client,
            )
            .await?;
            Ok(response.into_image_response())
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
