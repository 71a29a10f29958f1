use std::pin::Pin;

use color_eyre::Result;

pub type ImageFuture<'a> = Pin<Box<dyn Future<Output = Result<ImageResponse>> + Send + 'a>>;

/// A remote image-generation capability. The response may or may not carry
/// an image; deciding what to do about a missing one is up to the caller.
pub trait ImageModel {
    fn get_image<'a>(&'a self, prompt: &'a str) -> ImageFuture<'a>;
    fn model(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResponse {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    /// `data` is base64, exactly as the provider sent it.
    InlineData { mime_type: String, data: String },
}

impl ImageResponse {
    /// Returns `(mime_type, base64_data)` of the first part carrying inline data.
    pub fn first_inline_data(&self) -> Option<(&str, &str)> {
        self.parts.iter().find_map(|part| match part {
            ResponsePart::InlineData { mime_type, data } => Some((mime_type.as_str(), data.as_str())),
            ResponsePart::Text(_) => None,
        })
    }

    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                ResponsePart::Text(t) => Some(t.as_str()),
                ResponsePart::InlineData { .. } => None,
            })
            .collect()
    }
}
