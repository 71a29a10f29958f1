use std::path::PathBuf;

/// Generate a static website (HTML, CSS, JS and images) from a text prompt
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Cli {
    /// What the site should be about
    #[arg(short, long)]
    pub prompt: String,

    /// Output directory [default: output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gemini API key. Falls back to $GEMINI_API_KEY, then the config file
    #[arg(long)]
    pub api_key: Option<String>,

    /// Model used to write the HTML, CSS and JS
    #[arg(long)]
    pub text_model: Option<String>,

    /// Model used to draw the images
    #[arg(long)]
    pub image_model: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::{Parser, error::ErrorKind};

    use super::Cli;

    #[test]
    fn prompt_is_required() {
        let err = Cli::try_parse_from(["sitesmith"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "sitesmith",
            "--prompt",
            "A portfolio for a potter",
            "-o",
            "site",
            "--text-model",
            "gemini-2.5-flash",
        ])
        .unwrap();

        assert_eq!(cli.prompt, "A portfolio for a potter");
        assert_eq!(cli.output, Some("site".into()));
        assert_eq!(cli.text_model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(cli.image_model, None);
        assert_eq!(cli.api_key, None);
    }
}
