//! Entry point for the `qsim` binary.

use clap::Parser;

use qsim::Settings;
use qsim::cli::commands::{self, batch::BatchOptions};
use qsim::cli::{Cli, Commands};
use qsim::io::ExitCode;

fn load_settings(cli: &Cli) -> Settings {
    // Explicit --config path wins over workspace discovery
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => {
            // For non-init commands, check if project is initialized
            if !matches!(cli.command, Commands::Init { .. }) {
                if let Err(warning) = Settings::check_init() {
                    eprintln!("Warning: {warning}");
                    eprintln!("Using default configuration for now.");
                }
            }
            Settings::load()
        }
    };

    loaded.unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    })
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let settings = load_settings(&cli);

    let mut logging = settings.logging.clone();
    if settings.debug {
        logging.default = "debug".to_string();
    }
    qsim::logging::init_with_config(&logging);

    if cli.info {
        match &settings.workspace_root {
            Some(root) => eprintln!("Workspace root: {}", root.display()),
            None => eprintln!("No .qsim workspace found, using defaults"),
        }
        match settings.resolved_vocabulary_path() {
            Some(path) => eprintln!("Vocabulary: {}", path.display()),
            None => eprintln!("Vocabulary: not configured"),
        }
    }

    let code: ExitCode = match &cli.command {
        Commands::Init { force } => commands::init::run_init(*force),

        Commands::Config => commands::init::run_config(&settings),

        Commands::Compare {
            question_a,
            question_b,
            threshold,
            vocab,
            json,
        } => commands::compare::run(
            question_a,
            question_b,
            *threshold,
            vocab.as_deref(),
            &settings,
            *json,
        ),

        Commands::Features {
            question_a,
            question_b,
            vocab,
            json,
        } => commands::features::run(question_a, question_b, vocab.as_deref(), &settings, *json),

        Commands::Batch {
            input,
            output,
            vocab,
            threshold,
            threads,
            features,
        } => {
            let options = BatchOptions {
                input: input.clone(),
                output: output.clone(),
                vocab: vocab.clone(),
                threshold: *threshold,
                threads: *threads,
                include_features: *features,
            };
            commands::batch::run(&options, &settings)
        }

        Commands::Normalize { text, json } => commands::normalize::run(text, &settings, *json),
    };

    code.into()
}
