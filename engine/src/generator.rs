//! The site generation pipeline.
//!
//! A run moves through [`Stage`]s in a fixed order. Failures in the first
//! four stages abort the run before anything is written past that point;
//! failures while generating an individual image are logged, recorded in the
//! [`GenerationReport`] and skipped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use indoc::formatdoc;
use log::{debug, info, warn};
use strum::Display;

use crate::{
    IMAGES_DIR, INDEX_HTML, ImgModBox, LLMBox, SCRIPT_JS, STYLE_CSS,
    error::{GenerationError, ImageError},
    extract,
    image_model::ImageModel as _,
    llm::LLM as _,
    site::{GeneratedImage, GenerationRequest, ImageSpec, SiteBundle},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(to_string = "requesting site from text model")]
    RequestText,
    #[strum(to_string = "extracting JSON from response")]
    ExtractJson,
    #[strum(to_string = "parsing site JSON")]
    ParseJson,
    #[strum(to_string = "writing site files")]
    WriteSiteFiles,
    #[strum(to_string = "generating images")]
    GenerateImages,
    #[strum(to_string = "done")]
    Done,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub site_files: Vec<PathBuf>,
    pub images_written: Vec<PathBuf>,
    pub image_failures: Vec<ImageFailure>,
}

#[derive(Debug)]
pub struct ImageFailure {
    pub filename: String,
    pub error: ImageError,
}

pub struct SiteGenerator {
    llm: LLMBox,
    imgmod: ImgModBox,
    output_dir: PathBuf,
}

impl SiteGenerator {
    pub fn new(llm: LLMBox, imgmod: ImgModBox, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            llm,
            imgmod,
            output_dir: output_dir.into(),
        }
    }

    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationReport, GenerationError> {
        info!("{} ({})", Stage::RequestText, self.llm.model());
        let raw = self
            .llm
            .generate(&site_prompt(&request.prompt_text))
            .await
            .map_err(GenerationError::TextCallFailed)?;
        debug!("Raw text response:\n{raw}");

        info!("{}", Stage::ExtractJson);
        let candidates = extract::json_candidates(&raw);
        if candidates.is_empty() {
            return Err(GenerationError::NoJsonFound { raw });
        }

        info!("{}", Stage::ParseJson);
        let bundle = SiteBundle::from_candidates(&candidates)?;
        info!("Site bundle parsed, {} image(s) requested", bundle.images.len());

        info!("{} to {}", Stage::WriteSiteFiles, self.output_dir.display());
        let site_files = self.write_site_files(&bundle)?;

        let mut report = GenerationReport {
            output_dir: self.output_dir.clone(),
            site_files,
            images_written: vec![],
            image_failures: vec![],
        };

        if !bundle.images.is_empty() {
            info!("{} ({})", Stage::GenerateImages, self.imgmod.model());
            let images_dir = self.output_dir.join(IMAGES_DIR);

            for spec in &bundle.images {
                match self.generate_image(&images_dir, spec).await {
                    Ok(path) => {
                        info!("Wrote {}", path.display());
                        report.images_written.push(path);
                    }
                    Err(error) => {
                        warn!("No image generated for {}: {error}", spec.filename);
                        report.image_failures.push(ImageFailure {
                            filename: spec.filename.clone(),
                            error,
                        });
                    }
                }
            }
        }

        info!("{}", Stage::Done);
        Ok(report)
    }

    fn write_site_files(&self, bundle: &SiteBundle) -> Result<Vec<PathBuf>, GenerationError> {
        let images_dir = self.output_dir.join(IMAGES_DIR);
        fs::create_dir_all(&images_dir).map_err(|source| GenerationError::WriteFailed {
            path: images_dir,
            source,
        })?;

        let mut written = Vec::with_capacity(3);
        for (name, content) in [
            (INDEX_HTML, &bundle.html),
            (STYLE_CSS, &bundle.css),
            (SCRIPT_JS, &bundle.js),
        ] {
            let path = self.output_dir.join(name);
            if let Err(source) = fs::write(&path, content) {
                return Err(GenerationError::WriteFailed { path, source });
            }
            info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    async fn generate_image(&self, images_dir: &Path, spec: &ImageSpec) -> Result<PathBuf, ImageError> {
        let relative = spec.relative_path()?;

        let response = self
            .imgmod
            .get_image(&image_prompt(&spec.description))
            .await
            .map_err(ImageError::CallFailed)?;

        let Some((mime_type, data)) = response.first_inline_data() else {
            let text = response.text();
            if !text.is_empty() {
                debug!("Image model replied for {} with text only:\n{text}", spec.filename);
            }
            return Err(ImageError::MissingInlineData);
        };

        let image = GeneratedImage {
            filename: spec.filename.clone(),
            bytes: BASE64.decode(data)?,
        };
        debug!("{}: {} bytes of {mime_type}", image.filename, image.bytes.len());

        let path = images_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ImageError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &image.bytes).map_err(|source| ImageError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

pub fn site_prompt(prompt_text: &str) -> String {
    formatdoc! {r#"
        Based on this description: "{prompt_text}", generate a complete static website with
        index.html, style.css, and script.js.

        Make it professional, responsive using Bootstrap 5 (include the CDN links in the HTML),
        aesthetic with modern design, clean typography, appealing colors and smooth layouts.
        Include JavaScript for interactivity such as animations, form handling or dynamic elements.
        Include relevant images in the HTML with relative src paths like "images/image1.png",
        and provide a description for each image so it can be generated.

        Output strictly in JSON format:
        {{ "html": "<full HTML code here>", "css": "<full CSS code here>", "js": "<full JS code here>", "images": [{{"filename": "image1.png", "description": "detailed description for image generation"}}] }}
    "#}
}

pub fn image_prompt(description: &str) -> String {
    format!("Generate a high-quality, aesthetic image: {description}")
}
