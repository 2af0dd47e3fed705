// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Delay timers for tests and simulated sessions.

use probe_hal::DelayTimer;
use std::sync::{Arc, Mutex};

/// Records requested sleeps without sleeping.
///
/// Keeps the test suite fast while still letting tests assert that the
/// settle delays were requested with the right durations.
#[derive(Debug, Default)]
pub struct InstantDelay {
    sleeps: Arc<Mutex<Vec<u32>>>,
}

impl InstantDelay {
    /// Handle to the recorded sleep durations.
    pub fn sleeps(&self) -> Arc<Mutex<Vec<u32>>> {
        self.sleeps.clone()
    }
}

impl DelayTimer for InstantDelay {
    fn sleep_ms(&mut self, ms: u32) {
        if let Ok(mut sleeps) = self.sleeps.lock() {
            sleeps.push(ms);
        }
    }
}

/// Sleeps for real, so a simulated session produces pulses with the
/// configured width on the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClockDelay;

impl DelayTimer for WallClockDelay {
    fn sleep_ms(&mut self, ms: u32) {
        tracing::trace!(ms, "settle delay");
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
