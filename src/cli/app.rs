//! CLI definitions and entry point

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

use super::commands;
use codeuw::output::OutputMode;
use codeuw::paths;

/// codeuw - Task hub issue loader
#[derive(Parser, Debug)]
#[command(
    name = "codeuw",
    version,
    about = "Mirror program-labelled issues into the task hub",
    long_about = "Keep the task hub in step with participating repositories.\n\n\
                  Issues labelled for the program are mirrored as task issues in the hub.\n\
                  A committed state file records what has been mirrored so scheduled\n\
                  runs never create duplicates."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mirror labelled issues into the hub and update the state file
    Load {
        /// Loader configuration file
        #[arg(short, long, env = paths::CONFIG_ENV, default_value_os_t = paths::config_file())]
        config: PathBuf,

        /// State file to read and rewrite
        #[arg(short, long, env = paths::STATE_ENV, default_value_os_t = paths::state_file())]
        state: PathBuf,

        /// Report what would be created without creating issues or writing state
        #[arg(long, env = "DRY_RUN", value_parser = FalseyValueParser::new())]
        dry_run: bool,
    },

    /// Summarize the state file
    Status {
        /// State file to read
        #[arg(short, long, env = paths::STATE_ENV, default_value_os_t = paths::state_file())]
        state: PathBuf,
    },

    /// Check a task issue body against the issue form
    Validate {
        /// Issue form YAML
        #[arg(short, long, default_value_os_t = paths::template_file())]
        template: PathBuf,

        /// Issue title to report for the task
        #[arg(long)]
        title: Option<String>,

        /// Markdown body of the issue ('-' for stdin)
        body: PathBuf,
    },

    /// Show version
    Version,
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

    match cli.command {
        Some(Command::Load {
            config,
            state,
            dry_run,
        }) => commands::load(&config, &state, dry_run, output_mode),
        Some(Command::Status { state }) => commands::status(&state, output_mode),
        Some(Command::Validate {
            template,
            title,
            body,
        }) => commands::validate(&template, &body, title.as_deref(), output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("codeuw v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("codeuw v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'codeuw --help' for usage");
                println!("Run 'codeuw load --dry-run' to preview a load");
            }
            Ok(())
        },
    }
}
