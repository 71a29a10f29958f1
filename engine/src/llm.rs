use std::pin::Pin;

use color_eyre::Result;

pub type LLMFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// A remote text-generation capability: one prompt in, free-form text out.
pub trait LLM {
    fn generate<'a>(&'a self, prompt: &'a str) -> LLMFuture<'a>;
    fn model(&self) -> &str;
}
