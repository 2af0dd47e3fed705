// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Minimal embedding example: two harness cycles over simulated
//! capabilities, one loading a tensor over the link and one running on
//! engine defaults.
//!
//! ```bash
//! cargo run -p probe-core --example simulated_session
//! ```

use probe_core::{HarnessConfig, InferenceCycleController};
use probe_sim::{EventLog, InstantDelay, RecordingGpio, ScriptedSerial, StubEngine};

/// Stands in for the board's model bring-up, which can fail (bad model
/// binary, arena too small). The simulated model always comes up.
fn build_engine(sizes: &[usize], log: EventLog) -> Result<StubEngine, &'static str> {
    if sizes.is_empty() {
        return Err("model declares no input tensors");
    }
    Ok(StubEngine::with_input_sizes(sizes).with_event_log(log))
}

fn main() {
    let config = HarnessConfig::default();
    let payload: Vec<u8> = (0..64u8).collect();

    let serial = ScriptedSerial::new()
        .with_prompt_bytes(b"yn")
        .with_bulk_data(payload);
    let gpio = RecordingGpio::new();
    let log = gpio.events();

    // Model initialisation is the one unrecoverable failure: on a device
    // there is nothing left to run, so the harness parks until reset.
    let engine = match build_engine(&[64], log.clone()) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("model initialisation failed: {err}");
            probe_core::halt_forever();
        }
    };

    let mut controller =
        InferenceCycleController::new(&config, engine, serial, gpio, InstantDelay::default());

    for _ in 0..2 {
        let report = controller.run_cycle();
        println!("{report:?}");
    }

    println!("timeline: {:?}", log.lock().unwrap());
}
