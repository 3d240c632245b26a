//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

fn section(help: &mut String, title: &str) {
    use crate::display::theme::Theme;
    use console::style;

    if Theme::should_disable_colors() {
        help.push_str(&format!("{title}:\n"));
    } else {
        help.push_str(&format!("{}\n", style(format!("{title}:")).cyan().bold()));
    }
}

/// Create custom help text with consistent styling
fn create_custom_help() -> String {
    let mut help = String::new();

    section(&mut help, "Quick Start");
    help.push_str("  $ qsim init                                   # Create .qsim/settings.toml\n");
    help.push_str("  $ qsim compare \"How to learn Rust?\" \"Best way to learn Rust?\" --vocab vocab.json\n");
    help.push_str("  $ qsim features \"Q1\" \"Q2\" --json              # All 23 features as JSON\n");
    help.push_str("  $ qsim batch pairs.jsonl --threads 8          # Score JSON lines in parallel\n\n");

    help.push_str("Detect duplicate questions from lexical, fuzzy and bag-of-words similarity.\n\n");

    section(&mut help, "Usage");
    help.push_str("  qsim [OPTIONS] <COMMAND>\n\n");

    section(&mut help, "Commands");
    help.push_str("  init          Set up .qsim directory\n");
    help.push_str("  config        Display active settings\n");
    help.push_str("  compare       Score a question pair and decide if it is a duplicate\n");
    help.push_str("  features      Show the full feature vector for a question pair\n");
    help.push_str("  batch         Score question pairs from a JSON lines file\n");
    help.push_str("  normalize     Show how a question is normalized\n");
    help.push_str("  help          Print this message or the help of the given subcommand(s)\n\n");

    help.push_str("See 'qsim help <command>' for more information on a specific command.\n\n");

    section(&mut help, "Options");
    help.push_str("  -c, --config <CONFIG>  Path to custom settings.toml file\n");
    help.push_str("      --info             Show detailed loading information\n");
    help.push_str("  -h, --help             Print help\n");
    help.push_str("  -V, --version          Print version\n");

    help
}

/// Duplicate question detection
#[derive(Parser)]
#[command(
    name = "qsim",
    version = env!("CARGO_PKG_VERSION"),
    about = "Duplicate question detection",
    long_about = "Detect duplicate questions from lexical, fuzzy and bag-of-words similarity.",
    next_line_help = true,
    styles = clap_cargo_style(),
    override_help = create_custom_help()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show detailed loading information
    #[arg(long, global = true)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .qsim directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration
    #[command(about = "Display active settings")]
    Config,

    /// Score a question pair
    #[command(
        about = "Score a question pair and decide if it is a duplicate",
        after_help = "Examples:\n  qsim compare \"What is the capital of France?\" \"Capital of France?\" --vocab vocab.json\n  qsim compare \"Q1\" \"Q2\" --threshold 0.9 --json"
    )]
    Compare {
        /// First question
        question_a: String,

        /// Second question
        question_b: String,

        /// Duplicate threshold (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Vocabulary file (overrides config)
        #[arg(long, value_name = "PATH")]
        vocab: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show all features for a question pair
    #[command(
        about = "Show the full feature vector for a question pair",
        after_help = "Examples:\n  qsim features \"How to learn Rust?\" \"How do I learn Rust?\"\n  qsim features \"Q1\" \"Q2\" --json"
    )]
    Features {
        /// First question
        question_a: String,

        /// Second question
        question_b: String,

        /// Vocabulary file (overrides config)
        #[arg(long, value_name = "PATH")]
        vocab: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Score pairs from a JSON lines file
    #[command(
        about = "Score question pairs from a JSON lines file",
        after_help = "Input lines look like {\"question_a\": \"...\", \"question_b\": \"...\"} (q1/q2 also accepted).\nOne JSON result per line is written to stdout, or to --output.\n\nExamples:\n  qsim batch pairs.jsonl\n  qsim batch pairs.jsonl --threads 4 --features -o scored.jsonl"
    )]
    Batch {
        /// Input file, one JSON pair per line
        input: PathBuf,

        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vocabulary file (overrides config)
        #[arg(long, value_name = "PATH")]
        vocab: Option<PathBuf>,

        /// Duplicate threshold (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Number of threads to use (overrides config)
        #[arg(long)]
        threads: Option<usize>,

        /// Include the full feature vector in every result
        #[arg(long)]
        features: bool,
    },

    /// Normalize a question
    #[command(about = "Show how a question is normalized")]
    Normalize {
        /// Question text
        text: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}
