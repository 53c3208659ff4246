use clap::{Parser, Subcommand};
use kaizen_utils::args::api::Api;
use kaizen_utils::args::assistant::Assistant;
use kaizen_utils::args::quiz::Quiz;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kaizen", about = "Terminal client for the kaizen learning platform")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Client configuration file
    #[arg(long, global = true, env = "KAIZEN_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    #[arg(long, global = true, env = "SENTRY_DSN", hide_env_values = true)]
    pub(crate) sentry_dsn: Option<String>,

    #[command(flatten)]
    pub(crate) api: Api,

    #[command(flatten)]
    pub(crate) quiz: Quiz,

    #[command(flatten)]
    pub(crate) assistant: Assistant,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Show the health of the platform
    Status,

    /// Take the quiz of a module
    Quiz(QuizRun),

    /// Ask the course assistant
    Ask(Ask),

    /// Check client configuration files
    Validate(Validate),
}

#[derive(Debug, Parser)]
pub(crate) struct QuizRun {
    #[arg(short, long)]
    pub(crate) course: String,
    #[arg(short, long)]
    pub(crate) module: String,
    /// Only list past attempts
    #[arg(long)]
    pub(crate) history: bool,
}

#[derive(Debug, Parser)]
pub(crate) struct Ask {
    #[arg(short, long)]
    pub(crate) course: String,
    #[arg(short, long)]
    pub(crate) module: Option<String>,
    #[arg(long, requires = "module")]
    pub(crate) module_name: Option<String>,
    /// Text file with the material the question is about
    #[arg(short, long)]
    pub(crate) excerpt: Option<PathBuf>,
    /// Ask a single question instead of starting a conversation
    pub(crate) question: Option<String>,
}

#[derive(Debug, Parser)]
pub(crate) struct Validate {
    #[arg(required = true)]
    pub(crate) paths: Vec<PathBuf>,
}
