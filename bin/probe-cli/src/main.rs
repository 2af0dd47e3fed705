// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # inference-probe
//!
//! Command-line interface for the inference-probe harness.
//!
//! The harness itself targets a microcontroller; this binary runs the
//! same control loop against simulated capabilities, so the protocol and
//! pulse sequencing can be exercised (and demonstrated) on a host.
//!
//! ## Usage
//! ```bash
//! # Three simulated cycles, streaming a payload file into one 4 KiB tensor
//! inference-probe run --tensor-sizes 4096 --input ./payload.bin --cycles 3
//!
//! # Exercise the transport-error path: fail the link after 6000 bytes
//! inference-probe run --tensor-sizes 4096,4096 --inject-fault 6000
//!
//! # Print the effective harness configuration as TOML
//! inference-probe config
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "inference-probe",
    about = "GPIO-timed single-inference harness, simulated on the host",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (pins, chunk size, settle delay).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run simulated harness cycles and print the edge timeline.
    Run {
        /// Comma-separated input tensor byte lengths (0 models a
        /// degenerate input the loader must skip).
        #[arg(long, default_value = "1024")]
        tensor_sizes: String,

        /// Number of cycles to simulate.
        #[arg(long, default_value_t = 3)]
        cycles: usize,

        /// Payload file streamed over the simulated link; a repeating
        /// synthetic pattern is used when omitted.
        #[arg(short, long)]
        input: Option<std::path::PathBuf>,

        /// Skip the serial load and run every cycle on engine defaults.
        #[arg(long)]
        defaults_only: bool,

        /// Inject a link fault after this many payload bytes.
        #[arg(long)]
        inject_fault: Option<usize>,

        /// Capability error code for the injected fault
        /// (-2 overflow, -3 timeout, -4 break, -5 framing, -6 parity).
        #[arg(long, default_value_t = -5, allow_hyphen_values = true)]
        fault_code: i32,

        /// Use recorded (instant) settle delays instead of sleeping.
        #[arg(long)]
        fast: bool,
    },

    /// Print the effective harness configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            tensor_sizes,
            cycles,
            input,
            defaults_only,
            inject_fault,
            fault_code,
            fast,
        } => commands::run::execute(
            &config,
            &tensor_sizes,
            cycles,
            input.as_deref(),
            defaults_only,
            inject_fault,
            fault_code,
            fast,
        ),
        Commands::Config => commands::config::execute(&config),
    }
}
