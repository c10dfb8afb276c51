use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Turn a pantry photo and/or a description into recipe suggestions.
#[derive(Debug, Clone, Parser)]
#[command(name = "pantrycam")]
#[command(about = "Detect ingredients from a photo or prompt and look up matching recipes.")]
pub struct Cli {
    /// JSON config file with endpoints and retry policy.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Override the ingredient-detection endpoint.
    #[arg(long, global = true)]
    pub detection_endpoint: Option<String>,

    /// Override the recipe-lookup endpoint.
    #[arg(long, global = true)]
    pub recipe_endpoint: Option<String>,

    /// Debug logging.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run detection and recipe lookup once.
    Analyze(AnalyzeArgs),
    /// Check that the backend answers its health endpoint.
    Health,
    /// Write the effective config as JSON to a file (or stdout).
    InitConfig {
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct AnalyzeArgs {
    /// Photo of the ingredients.
    #[arg(long, short = 'i')]
    pub image: Option<PathBuf>,

    /// Free-text description of what you have.
    #[arg(long, short = 'p')]
    pub prompt: Option<String>,

    /// Write the final markup here instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pantrycam",
            "analyze",
            "--prompt",
            "eggs and milk",
            "--format",
            "json",
            "--recipe-endpoint",
            "http://10.0.0.2/get_recipes",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.recipe_endpoint.as_deref(), Some("http://10.0.0.2/get_recipes"));
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.prompt.as_deref(), Some("eggs and milk"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.image.is_none());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["pantrycam"]).is_err());
    }
}
