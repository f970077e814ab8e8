//! CLI argument definitions for the PD Risk Console client.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pdrisk",
    version,
    about = "PD Risk Console - proteomics-based Parkinson's risk prediction client",
    long_about = "Upload a CSV/Excel file of 50 protein biomarker measurements to the\n\
                  prediction service and display aggregate risk statistics.\n\n\
                  Backend URLs are taken from PDRISK_API_URL (prediction) and\n\
                  PDRISK_AUTH_URL (auth), falling back to the local development setup."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Bearer token for authorized calls (falls back to PDRISK_TOKEN).
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a biomarker file and print the aggregated risk verdict.
    Predict(PredictArgs),

    /// List the feature names the model requires.
    Features,

    /// Show a sample of the expected input format.
    Sample,

    /// Show global feature importance.
    Importance(ImportanceArgs),

    /// Show biomarker details.
    Biomarkers,

    /// Show protein categories.
    Categories,

    /// Register a new account and print the access token.
    Signup(SignupArgs),

    /// Log in and print the access token.
    Login(LoginArgs),

    /// Show the current user's profile.
    Profile,

    /// Log out, clearing the session even when the server is unreachable.
    Logout,
}

#[derive(Parser)]
pub struct PredictArgs {
    /// Path to the biomarker CSV/Excel file (or a URL with --url).
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Treat FILE as a remote reference instead of a local path.
    #[arg(long = "url")]
    pub url: bool,

    /// File name reported to the server (default: the file's own name).
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// MIME type reported to the server (default: text/csv).
    #[arg(long = "mime-type", value_name = "MIME")]
    pub mime_type: Option<String>,

    /// Skip the local header check against the required features.
    #[arg(long = "no-preflight")]
    pub no_preflight: bool,

    /// Print the aggregated result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ImportanceArgs {
    /// Number of top features to request.
    #[arg(long = "top-n", value_name = "N", default_value_t = 50)]
    pub top_n: usize,
}

#[derive(Parser)]
pub struct SignupArgs {
    /// Display name for the new account.
    #[arg(long = "name")]
    pub name: String,

    /// Email address.
    #[arg(long = "email")]
    pub email: String,

    /// Password (sent with confirmation filled in automatically).
    #[arg(long = "password")]
    pub password: String,
}

#[derive(Parser)]
pub struct LoginArgs {
    /// Email address.
    #[arg(long = "email")]
    pub email: String,

    /// Password.
    #[arg(long = "password")]
    pub password: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_predict_args_parse() {
        let cli = Cli::try_parse_from([
            "pdrisk",
            "predict",
            "cohort.csv",
            "--no-preflight",
            "--json",
        ])
        .expect("parse");
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.file, "cohort.csv");
                assert!(args.no_preflight);
                assert!(args.json);
                assert!(!args.url);
            }
            _ => panic!("expected predict command"),
        }
    }

    #[test]
    fn test_importance_top_n_default() {
        let cli = Cli::try_parse_from(["pdrisk", "importance"]).expect("parse");
        match cli.command {
            Command::Importance(args) => assert_eq!(args.top_n, 50),
            _ => panic!("expected importance command"),
        }
    }

    #[test]
    fn test_global_token_flag() {
        let cli = Cli::try_parse_from(["pdrisk", "profile", "--token", "tok_1"]).expect("parse");
        assert_eq!(cli.token.as_deref(), Some("tok_1"));
    }
}
