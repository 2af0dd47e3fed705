// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A GPIO bank that records edges instead of driving silicon.

use crate::event::{new_event_log, EventLog, SimEvent};
use probe_hal::{GpioBank, GpioError, Level, PinId};
use std::collections::HashSet;

/// Records every output edge into a shared [`EventLog`].
///
/// Pins must be configured before writes register, matching the real
/// capability contract; writes to unconfigured pins are dropped.
/// Configuration of selected pins can be made to fail, to exercise the
/// partial-init path of the timing controller.
#[derive(Debug)]
pub struct RecordingGpio {
    events: EventLog,
    configured: HashSet<PinId>,
    fail_configure: HashSet<PinId>,
}

impl RecordingGpio {
    /// Creates a bank with a fresh event log.
    pub fn new() -> Self {
        Self::with_event_log(new_event_log())
    }

    /// Creates a bank writing into an existing shared log.
    pub fn with_event_log(events: EventLog) -> Self {
        Self {
            events,
            configured: HashSet::new(),
            fail_configure: HashSet::new(),
        }
    }

    /// Handle to the shared event log.
    pub fn events(&self) -> EventLog {
        self.events.clone()
    }

    /// Makes future configuration of `pin` fail with a driver error.
    pub fn fail_configure(&mut self, pin: PinId) {
        self.fail_configure.insert(pin);
    }

    /// Clears all injected configuration failures.
    pub fn clear_failures(&mut self) {
        self.fail_configure.clear();
    }

    /// Whether `pin` has been configured as an output.
    pub fn is_configured(&self, pin: PinId) -> bool {
        self.configured.contains(&pin)
    }
}

impl Default for RecordingGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioBank for RecordingGpio {
    fn configure_output(&mut self, pin: PinId) -> Result<(), GpioError> {
        if self.fail_configure.contains(&pin) {
            return Err(GpioError::Driver { pin, code: -1 });
        }
        self.configured.insert(pin);
        Ok(())
    }

    fn set_level(&mut self, pin: PinId, level: Level) {
        if !self.configured.contains(&pin) {
            return;
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(SimEvent::Edge(pin, level));
        }
    }
}
