use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use engine::{
    gemini::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, Gemini},
    generator::image_prompt,
    image_model::ImageModel,
    llm::LLM,
};

#[derive(clap::Parser)]
struct Cli {
    api_key: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Send a prompt to the text model and print the raw reply
    Text {
        prompt: String,
        #[arg(long, default_value = DEFAULT_TEXT_MODEL)]
        model: String,
    },
    /// Generate one image the same way the site generator does
    Image {
        description: String,
        #[arg(long, default_value = DEFAULT_IMAGE_MODEL)]
        model: String,
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    pretty_env_logger::init();
    color_eyre::install()?;

    match args.command {
        Command::Text { prompt, model } => {
            let llm = Gemini::new(args.api_key, model);
            println!("{}", llm.generate(&prompt).await?);
        }
        Command::Image {
            description,
            model,
            output,
        } => {
            let imgmod = Gemini::new(args.api_key, model);
            let response = imgmod.get_image(&image_prompt(&description)).await?;
            let text = response.text();
            if !text.is_empty() {
                println!("{text}");
            }

            let (mime_type, data) = response
                .first_inline_data()
                .ok_or(eyre!("Response contained no inline image data"))?;
            let bytes = STANDARD.decode(data)?;
            std::fs::write(&output, &bytes)?;
            println!("Saved {mime_type} image to {}, {} bytes", output.display(), bytes.len());
        }
    }

    Ok(())
}
