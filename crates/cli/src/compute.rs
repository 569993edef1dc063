// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{Context, Result};
use pws_config::AppConfig;
use pws_server::types::ComputeRequest;
use pws_server::{process_compute, ComputeSettings};
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn execute(config: &AppConfig, input: Option<PathBuf>, pretty: bool) -> Result<()> {
    let raw = read_input(input.as_deref())?;
    let output = run(config, &raw, pretty)?;
    println!("{}", output);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read request file {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Could not read request from stdin")?;
            Ok(buf)
        }
    }
}

fn run(config: &AppConfig, raw: &str, pretty: bool) -> Result<String> {
    let request: ComputeRequest =
        serde_json::from_str(raw).context("Could not parse compute request")?;
    let settings = ComputeSettings::from_config(config);
    let response = process_compute(&settings, request)?;

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(output)
}
