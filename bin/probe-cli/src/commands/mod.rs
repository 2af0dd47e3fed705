// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI command implementations.

pub mod config;
pub mod run;

use probe_core::HarnessConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialises tracing based on `-v` count; `RUST_LOG` wins if set.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the harness configuration, falling back to defaults when no
/// file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<HarnessConfig> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration file");
            Ok(HarnessConfig::from_file(path)?)
        }
        None => {
            tracing::debug!("no config file given, using built-in defaults");
            Ok(HarnessConfig::default())
        }
    }
}
