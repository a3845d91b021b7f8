//! Command-line interface definition using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use prism_models::{AnalysisMode, SummaryLength};

/// Prism - client for the Prism content-analysis service
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Base URL of the Prism service
    #[arg(long, env = "PRISM_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Tracing level implied by the verbosity flags.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the issued tokens
    Login {
        #[arg(required = true)]
        username: String,

        /// Password (or set PRISM_PASSWORD)
        #[arg(long, env = "PRISM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Revoke the refresh token and clear the local session
    Logout,

    /// Show the logged-in user's profile
    Me,

    /// List the library of ingested content
    Library {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Extract text from a web URL or local document
    Extract {
        /// A URL (http/https) or a path to a PDF/text file
        #[arg(required = true)]
        target: String,
    },

    /// List the videos of a playlist
    Playlist {
        #[arg(required = true)]
        url: String,

        /// Also fetch transcripts for the listed videos
        #[arg(short, long)]
        transcripts: bool,
    },

    /// Run an analysis
    #[command(subcommand)]
    Analyze(AnalyzeCommand),

    /// Show or change display preferences
    Config {
        /// Set the compact-output preference
        #[arg(long)]
        compact: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeCommand {
    /// Summarize content
    Summary {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "standard")]
        length: LengthArg,
    },

    /// Analyze rhetorical techniques
    Rhetorical {
        #[command(flatten)]
        input: InputArgs,

        /// Cross-check factual claims
        #[arg(long)]
        verify_claims: bool,

        /// Analysis sections to include (repeatable)
        #[arg(long = "type")]
        analysis_types: Vec<String>,
    },

    /// Analyze manipulation tactics
    Manipulation {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, default_value = "deep")]
        mode: ModeArg,
    },

    /// Draw cross-domain discovery connections
    Discovery {
        #[command(flatten)]
        input: InputArgs,

        /// Domains to prioritize (repeatable)
        #[arg(long = "focus")]
        focus_domains: Vec<String>,
    },

    /// Generate prompts from content
    Prompts {
        #[command(flatten)]
        input: InputArgs,

        /// Target prompt categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
    },
}

/// Where the content to analyze comes from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Content ID of already-ingested content
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub content_id: Option<String>,

    /// Pasted text to analyze
    #[arg(long)]
    pub text: Option<String>,

    /// Read the text to analyze from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Tag inline text with a content ID so the result is cached
    #[arg(long, conflicts_with = "content_id")]
    pub save_as: Option<String>,

    /// Skip cache hydration and force a fresh analysis
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LengthArg {
    Brief,
    Standard,
    Detailed,
}

impl From<LengthArg> for SummaryLength {
    fn from(value: LengthArg) -> Self {
        match value {
            LengthArg::Brief => SummaryLength::Brief,
            LengthArg::Standard => SummaryLength::Standard,
            LengthArg::Detailed => SummaryLength::Detailed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Quick,
    Deep,
}

impl From<ModeArg> for AnalysisMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Quick => AnalysisMode::Quick,
            ModeArg::Deep => AnalysisMode::Deep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_analyze_manipulation() {
        let cli = Cli::parse_from([
            "prism",
            "analyze",
            "manipulation",
            "--content-id",
            "vid-1",
            "--mode",
            "quick",
        ]);
        match cli.command {
            Commands::Analyze(AnalyzeCommand::Manipulation { input, mode }) => {
                assert_eq!(input.content_id.as_deref(), Some("vid-1"));
                assert!(matches!(mode, ModeArg::Quick));
            }
            _ => panic!("Expected Manipulation command"),
        }
    }

    #[test]
    fn test_cli_parse_discovery_focus() {
        let cli = Cli::parse_from([
            "prism",
            "analyze",
            "discovery",
            "--text",
            "some text",
            "--focus",
            "ecology",
            "--focus",
            "economics",
        ]);
        match cli.command {
            Commands::Analyze(AnalyzeCommand::Discovery {
                focus_domains, ..
            }) => {
                assert_eq!(focus_domains, vec!["ecology", "economics"]);
            }
            _ => panic!("Expected Discovery command"),
        }
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["prism", "-vv", "me"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        // Verify help can be generated without panic
        Cli::command().debug_assert();
    }
}
