use clap::Parser;
use color_eyre::Result;
use engine::{GenerationRequest, SiteGenerator, gemini::Gemini};
use log::{LevelFilter, debug};
use sitesmith::{API_KEY_VAR, Settings, cli::Cli, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    color_eyre::install()?;
    let dotenv = dotenv::dotenv();
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded {}", path.display()),
        Err(_) => debug!("No .env file found, using process environment"),
    }

    let settings = Settings::resolve(args, std::env::var(API_KEY_VAR).ok(), load_config()?)?;

    let mut text = Gemini::new(settings.api_key, settings.text_model);
    if let Some(base_url) = settings.base_url {
        text = text.with_base_url(base_url);
    }
    let image = text.clone().with_model(settings.image_model);

    let generator = SiteGenerator::new(Box::new(text), Box::new(image), settings.output_dir);
    let report = generator.run(&GenerationRequest::new(settings.prompt)).await?;

    println!(
        "Site generated in {} ({} files, {} images)",
        report.output_dir.display(),
        report.site_files.len(),
        report.images_written.len()
    );
    if !report.image_failures.is_empty() {
        let skipped: Vec<_> = report.image_failures.iter().map(|f| f.filename.as_str()).collect();
        println!("Skipped {} image(s): {}", skipped.len(), skipped.join(", "));
    }

    Ok(())
}
