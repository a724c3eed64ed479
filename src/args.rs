use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::{storage::default_data_dir, tracker::Gamemode};

#[derive(Parser)]
#[command(name = "anichess-tracker", version, about = "Win/loss tracker for Anichess")]
pub struct Args {
    /// Directory holding the tracker data (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for log files (defaults to `logs` inside the data dir)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Without a subcommand the dashboard is started
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Log directory: the flag, else `logs` under the data directory.
    pub fn resolved_log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }
        let data_dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        Ok(data_dir.join("logs"))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a win
    Win(ModeArg),
    /// Record a loss
    Loss(ModeArg),
    /// Undo the last recorded result
    Undo(ModeArg),
    /// Set the daily goal (1-50 games, not available for quickmode)
    Goal {
        value: String,
        #[command(flatten)]
        mode: ModeArg,
    },
    /// Print statistics
    Stats {
        #[command(flatten)]
        mode: ModeArg,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
pub struct ModeArg {
    /// quickmode, ranked or checkmate (defaults to the last selected mode)
    #[arg(long, short)]
    pub mode: Option<Gamemode>,
}
