// ABOUTME: pt-coach - interactive physical-therapy self-assessment wizard
// ABOUTME: Runs the guided session, one-shot video analysis, or prints the safety checklist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PT Coach Contributors
//!
//! Usage:
//! ```bash
//! # Guided session using the configured LLM provider (GEMINI_API_KEY)
//! pt-coach run
//!
//! # Guided session with deterministic demo coaching, name required
//! pt-coach run --offline --strict
//!
//! # Keep a copy of the session history
//! pt-coach run --export history.json
//!
//! # Analyze a single clip
//! pt-coach analyze squat.mp4 --movement squatting --seated
//!
//! # Show the red-flag checklist
//! pt-coach checklist
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pt_coach::logging::LoggingConfig;
use pt_coach::models::MovementKind;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pt-coach",
    about = "Guided physical-therapy self-assessment",
    long_about = "Walks through intake, movement video screens, a safety checklist, an exercise plan, and a post-session check-in."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the interactive wizard
    Run {
        /// Use built-in demo coaching instead of an LLM provider
        #[arg(long)]
        offline: bool,

        /// Require a first name at intake
        #[arg(long)]
        strict: bool,

        /// Write the session history as JSON on exit
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Analyze one movement video and print the result
    Analyze {
        /// Video file (mp4, mov, webm, avi, mkv)
        video: PathBuf,

        /// Movement shown in the video
        #[arg(long, short = 'm', default_value = "walking")]
        movement: MovementKind,

        /// Assess the seated variant of the movement
        #[arg(long)]
        seated: bool,

        /// Use built-in demo coaching instead of an LLM provider
        #[arg(long)]
        offline: bool,
    },

    /// Print the safety checklist
    Checklist,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().with_verbosity(cli.verbose).init()?;
    debug!(verbosity = cli.verbose, "pt-coach CLI");

    match cli.command {
        Command::Run {
            offline,
            strict,
            export,
        } => commands::run::run(offline, strict, export).await?,
        Command::Analyze {
            video,
            movement,
            seated,
            offline,
        } => commands::analyze::analyze(&video, movement, seated, offline).await?,
        Command::Checklist => commands::checklist::show(),
    }

    Ok(())
}
