// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! GPIO timing signals bracketing the inference call.
//!
//! Two output pins mark the measured region for external equipment:
//! "pre" pulses high just before the inference call, "post" just after.
//! The pulses are a measurement aid, nothing more — so the controller is
//! fail-soft. If [`TimingSignalController::init`] never succeeded, every
//! edge operation silently does nothing, and none of them can fail once
//! it has. A broken scope hookup must never abort the pipeline it was
//! supposed to observe.

use crate::error::{InitError, PinRole};
use probe_hal::{GpioBank, Level, PinId};

/// Owns the two timing pins and the GPIO capability that drives them.
///
/// Constructed once at startup and moved into the control loop; there is
/// no global state.
#[derive(Debug)]
pub struct TimingSignalController<G> {
    gpio: G,
    pre_pin: PinId,
    post_pin: PinId,
    initialized: bool,
}

impl<G: GpioBank> TimingSignalController<G> {
    /// Creates an uninitialised controller. Edge operations are no-ops
    /// until [`TimingSignalController::init`] succeeds.
    pub fn new(gpio: G, pre_pin: PinId, post_pin: PinId) -> Self {
        Self {
            gpio,
            pre_pin,
            post_pin,
            initialized: false,
        }
    }

    /// Configures both pins as outputs and drives them low.
    ///
    /// `initialized` flips to `true` only if every configuration step
    /// succeeded. On partial failure the already-configured pin is left
    /// as the driver left it — no rollback; pin state is best-effort on
    /// this hardware. Calling `init` again after a failure is allowed.
    pub fn init(&mut self) -> Result<(), InitError> {
        self.gpio
            .configure_output(self.pre_pin)
            .map_err(|source| InitError {
                role: PinRole::Pre,
                pin: self.pre_pin,
                source,
            })?;
        self.gpio
            .configure_output(self.post_pin)
            .map_err(|source| InitError {
                role: PinRole::Post,
                pin: self.post_pin,
                source,
            })?;

        // Known-low starting level, so the first rising edge is clean.
        self.gpio.set_level(self.pre_pin, Level::Low);
        self.gpio.set_level(self.post_pin, Level::Low);

        self.initialized = true;
        tracing::info!(
            pre = %self.pre_pin,
            post = %self.post_pin,
            "timing pins initialized"
        );
        Ok(())
    }

    /// Whether a previous [`TimingSignalController::init`] fully succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Rising edge of the pre-inference pulse.
    pub fn pre_start(&mut self) {
        self.set(self.pre_pin, Level::High);
    }

    /// Falling edge of the pre-inference pulse.
    pub fn pre_end(&mut self) {
        self.set(self.pre_pin, Level::Low);
    }

    /// Rising edge of the post-inference pulse.
    pub fn post_start(&mut self) {
        self.set(self.post_pin, Level::High);
    }

    /// Falling edge of the post-inference pulse.
    pub fn post_end(&mut self) {
        self.set(self.post_pin, Level::Low);
    }

    fn set(&mut self, pin: PinId, level: Level) {
        if self.initialized {
            self.gpio.set_level(pin, level);
        }
    }
}
