//! Command-line argument parsing
//!
//! Supports:
//! - Rendering a single outline notification
//! - Replaying a newline-delimited JSON stream of host events
//! - Locating the current log file

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::OutlineConfig;

/// Mirror an analysis server's outline as a box-drawn tree
#[derive(Parser, Debug)]
#[command(name = "outline-mirror", version, about = "Outline tree view companion")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Append declaration line numbers to each node
    #[arg(long, global = true)]
    pub line_numbers: bool,

    /// Do not resolve breadcrumbs on cursor moves
    #[arg(long, global = true)]
    pub no_breadcrumb: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More console logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print the rendered tree of one outline notification (JSON)
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Feed host events (one JSON object per line) through the runtime
    Replay {
        /// Event file; reads stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the path of the newest log file
    Logs,
}

impl CliArgs {
    /// Load the config file and apply flag overrides
    pub fn resolve_config(&self) -> OutlineConfig {
        let mut config = match &self.config {
            Some(path) => OutlineConfig::load_from(path),
            None => OutlineConfig::load(),
        };
        self.apply_overrides(&mut config);
        config
    }

    /// Flags win over whatever the config file says
    pub fn apply_overrides(&self, config: &mut OutlineConfig) {
        if self.line_numbers {
            config.line_numbers = true;
        }
        if self.no_breadcrumb {
            config.show_breadcrumb = false;
        }
    }
}
