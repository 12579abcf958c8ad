//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use repcoach::output::OutputMode;

/// repcoach - Exercise form analysis from pose landmarks
#[derive(Parser, Debug)]
#[command(
    name = "repcoach",
    version,
    about = "Exercise form analysis from pose landmarks",
    long_about = "Score exercise form, count reps and produce coaching cues.\n\n\
                  Rules declare joint angles and alignments per exercise.\n\
                  Recorded sessions are replayed frame by frame through the analyzer."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.config/repcoach/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter .repcoach.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Replay a recorded session and report form and reps
    Analyze {
        /// JSON-lines session file, one pose per line
        session: PathBuf,

        /// Exercise id or name
        #[arg(short, long)]
        exercise: String,

        /// Rules file (defaults to config, then .repcoach.toml)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Minimum landmark and pose confidence
        #[arg(long)]
        min_confidence: Option<f32>,

        /// Minimum time between spoken cues, in milliseconds
        #[arg(long)]
        cooldown_ms: Option<u64>,
    },

    /// Inspect exercise rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum RulesAction {
    /// List available exercises
    List {
        /// Rules file
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },

    /// Show every rule of one exercise
    Show {
        /// Exercise id or name
        exercise: String,

        /// Rules file
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config = cli.config.as_deref();

    match cli.command {
        Some(Command::Init { force }) => commands::init(force, output_mode),
        Some(Command::Analyze {
            session,
            exercise,
            rules,
            min_confidence,
            cooldown_ms,
        }) => commands::analyze(
            &commands::AnalyzeArgs {
                session,
                exercise,
                rules,
                min_confidence,
                cooldown_ms,
            },
            config,
            output_mode,
        ),
        Some(Command::Rules { action }) => commands::rules_cmd(action, config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": repcoach::VERSION
                    })
                );
            } else {
                println!("repcoach v{}", repcoach::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": repcoach::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("repcoach v{}", repcoach::VERSION);
                println!("\nRun 'repcoach --help' for usage");
                println!("Run 'repcoach init' to get started");
            }
            Ok(())
        },
    }
}
