use crate::{image_model::ImageModel, llm::LLM};

pub mod error;
pub mod extract;
pub mod gemini;
pub mod generator;
pub mod image_model;
pub mod llm;
pub mod site;

pub use error::{GenerationError, ImageError};
pub use generator::{GenerationReport, ImageFailure, SiteGenerator, Stage};
pub use site::{GenerationRequest, ImageSpec, SiteBundle};

pub type LLMBox = Box<dyn LLM + Send + Sync>;
pub type ImgModBox = Box<dyn ImageModel + Send + Sync>;

pub const INDEX_HTML: &str = "index.html";
pub const STYLE_CSS: &str = "style.css";
pub const SCRIPT_JS: &str = "script.js";
pub const IMAGES_DIR: &str = "images";
