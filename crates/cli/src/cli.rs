// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::PathBuf;

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{compute, question, start};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use pws_config::{load_config, CliOverrides};
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "pws")]
#[command(about = "Compute encrypted weighted-sum contributions over client supplied Paillier keys", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `pws -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        let overrides = match &self.command {
            Commands::Start { host, port } => CliOverrides {
                host: host.clone(),
                port: *port,
            },
            _ => CliOverrides::default(),
        };
        let config = load_config(self.config.clone(), overrides)?;
        match config.config_file() {
            Some(path) => info!("Config loaded from: {:?}", path),
            None => info!("No config file found, using defaults"),
        }

        match self.command {
            Commands::Start { .. } => start::execute(config).await?,
            Commands::Compute { input, pretty } => compute::execute(&config, input, pretty)?,
            Commands::Question => question::execute(),
        }

        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Interface to bind, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides `server.port`
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one computation on a JSON request and print the JSON response
    Compute {
        /// Request file. Reads stdin when omitted or `-`
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pretty print the response
        #[arg(long)]
        pretty: bool,
    },

    /// Print a random interview question
    Question,
}
