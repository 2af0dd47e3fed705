// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `inference-probe run` command: simulated harness cycles.
//!
//! Builds a stub engine and a scripted serial link from the CLI
//! arguments, runs the real cycle controller against them, then prints
//! the per-cycle reports and the recorded GPIO/run timeline.

use probe_core::{CycleReport, HarnessConfig, InferenceCycleController};
use probe_hal::{DelayTimer, Level, SerialError};
use probe_sim::{InstantDelay, RecordingGpio, ScriptedSerial, SimEvent, StubEngine, WallClockDelay};
use std::path::Path;

/// Delay backend selected at runtime.
enum SessionDelay {
    Wall(WallClockDelay),
    Instant(InstantDelay),
}

impl DelayTimer for SessionDelay {
    fn sleep_ms(&mut self, ms: u32) {
        match self {
            SessionDelay::Wall(d) => d.sleep_ms(ms),
            SessionDelay::Instant(d) => d.sleep_ms(ms),
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &HarnessConfig,
    tensor_sizes: &str,
    cycles: usize,
    input: Option<&Path>,
    defaults_only: bool,
    inject_fault: Option<usize>,
    fault_code: i32,
    fast: bool,
) -> anyhow::Result<()> {
    let sizes = parse_sizes(tensor_sizes)?;
    let total_bytes: usize = sizes.iter().sum();

    println!("inference-probe · simulated session");
    println!("  tensors:      {sizes:?} ({total_bytes} bytes/cycle)");
    println!("  cycles:       {cycles}");
    println!("  chunk size:   {}", config.chunk_size);
    println!("  settle delay: {} ms", config.settle_delay_ms);
    println!("  timing pins:  pre={} post={}", config.pre_pin, config.post_pin);
    println!();

    // Serial script: one choice byte per cycle, then the payload stream.
    let choice = if defaults_only { b'n' } else { b'y' };
    let choices = vec![choice; cycles];
    let payload = build_payload(input, total_bytes * cycles)?;

    let mut serial = ScriptedSerial::new()
        .with_prompt_bytes(&choices)
        .with_bulk_data(payload);
    if let Some(offset) = inject_fault {
        let err = SerialError::from_code(fault_code);
        tracing::warn!(%err, offset, "injecting a transport fault into the payload stream");
        serial = serial.fail_after(offset, err);
    }

    let gpio = RecordingGpio::new();
    let log = gpio.events();
    let engine = StubEngine::with_input_sizes(&sizes).with_event_log(log.clone());
    let delay = if fast {
        SessionDelay::Instant(InstantDelay::default())
    } else {
        SessionDelay::Wall(WallClockDelay)
    };

    let mut controller = InferenceCycleController::new(config, engine, serial, gpio, delay);
    log.lock().unwrap().clear(); // keep the timeline to cycle activity

    let reports: Vec<CycleReport> = (0..cycles).map(|_| controller.run_cycle()).collect();

    println!();
    println!("── Cycle reports ─────────────────────────────");
    for (i, report) in reports.iter().enumerate() {
        let load = match report.load {
            None => "defaults".to_string(),
            Some(s) => match s.aborted {
                None => format!("loaded {} (skipped {})", s.loaded, s.skipped),
                Some(err) => format!("ABORTED: {err}"),
            },
        };
        let outcome = if report.inference_ok { "ok" } else { "FAILED" };
        println!("  cycle {i}: input {load}, inference {outcome}");
    }

    println!();
    println!("── Edge timeline ─────────────────────────────");
    for event in log.lock().unwrap().iter() {
        match event {
            SimEvent::Edge(pin, Level::High) => println!("  {pin} ↑"),
            SimEvent::Edge(pin, Level::Low) => println!("  {pin} ↓"),
            SimEvent::InferenceRun => println!("  ── inference run ──"),
        }
    }

    Ok(())
}

/// Parses a comma-separated list of tensor byte lengths.
fn parse_sizes(spec: &str) -> anyhow::Result<Vec<usize>> {
    spec.split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("invalid tensor size '{}': {e}", s.trim()))
        })
        .collect()
}

/// Reads the payload file, or synthesises a repeating pattern, sized to
/// cover every cycle's transfers.
fn build_payload(input: Option<&Path>, needed: usize) -> anyhow::Result<Vec<u8>> {
    let base = match input {
        Some(path) => {
            let bytes = std::fs::read(path)
                .map_err(|e| anyhow::anyhow!("cannot read payload '{}': {e}", path.display()))?;
            if bytes.is_empty() {
                anyhow::bail!("payload file '{}' is empty", path.display());
            }
            bytes
        }
        None => (0u8..=255).collect(),
    };

    Ok(base.iter().copied().cycle().take(needed).collect())
}
