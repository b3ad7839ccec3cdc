use std::path::PathBuf;

use clap::{Parser, Subcommand};
use healthvitals_core::domain::common::{DEFAULT_GEMINI_MODEL, HealthVitalsConfig, LLMConfig};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "healthvitals",
    version,
    about = "Symptom analysis backed by Gemini, with a tolerant reply parser"
)]
pub struct Args {
    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Identity recorded in the audit log lines
    #[arg(long, env = "HEALTHVITALS_REQUESTER", global = true)]
    pub requester: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LLMArgs {
    #[arg(
        long = "gemini-api-key",
        env = "GOOGLE_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub gemini_api_key: Option<String>,

    #[arg(
        long = "gemini-model",
        env = "GEMINI_MODEL",
        default_value = DEFAULT_GEMINI_MODEL,
        global = true
    )]
    pub gemini_model: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Default filter when RUST_LOG is not set
    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "info", global = true)]
    pub level: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false, global = true)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse a saved generator reply (file or stdin) without calling the API
    Parse {
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Run a full analysis from a JSON request file
    Analyze {
        #[arg(long, value_name = "FILE")]
        request: PathBuf,
    },
    /// Run the short analysis on a free-text description
    Quick {
        #[arg(long)]
        symptoms: String,
        #[arg(long)]
        age: Option<u32>,
    },
    /// Re-analyse an earlier record in light of a new document
    FollowUp {
        #[arg(long, value_name = "FILE")]
        previous: PathBuf,
        #[arg(long, value_name = "FILE")]
        request: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        document: PathBuf,
    },
}

impl From<Args> for HealthVitalsConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from([
            "healthvitals",
            "quick",
            "--symptoms",
            "sore throat",
            "--age",
            "30",
            "--gemini-api-key",
            "key",
        ])
        .unwrap();

        assert!(matches!(
            args.command,
            Command::Quick { ref symptoms, age: Some(30) } if symptoms == "sore throat"
        ));
        let config = HealthVitalsConfig::from(args);
        assert_eq!(config.llm.gemini_api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_follow_up_is_kebab_case() {
        let args = Args::try_parse_from([
            "healthvitals",
            "follow-up",
            "--previous",
            "record.json",
            "--document",
            "notes.txt",
        ])
        .unwrap();

        assert!(matches!(args.command, Command::FollowUp { request: None, .. }));
    }
}
