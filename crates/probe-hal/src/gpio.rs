// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! GPIO capability: output configuration and level control.

/// Identifies one physical pin as a (port, pin) pair.
///
/// Matches the `P<port>_<pin>` naming used by the target boards, e.g.
/// `P1_4` is `PinId { port: 1, pin: 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PinId {
    /// GPIO port index.
    pub port: u8,
    /// Pin index within the port.
    pub pin: u8,
}

impl PinId {
    /// Creates a pin identity from a port and pin index.
    pub const fn new(port: u8, pin: u8) -> Self {
        Self { port, pin }
    }
}

impl std::fmt::Display for PinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}_{}", self.port, self.pin)
    }
}

/// Logical level of a digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Level {
    Low,
    High,
}

/// Errors surfaced by the GPIO capability while configuring a pin.
///
/// Driving an already-configured output never fails — only the
/// configuration path returns errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GpioError {
    /// The pin does not exist or cannot be used as a digital output.
    #[error("pin {0} cannot be configured as an output")]
    Unsupported(PinId),

    /// The underlying driver rejected the configuration request.
    #[error("driver rejected pin {pin}: code {code}")]
    Driver { pin: PinId, code: i32 },
}

/// A bank of GPIO pins the harness can drive.
///
/// The harness only ever needs push-pull outputs; inputs, pulls and
/// alternate functions are out of scope.
pub trait GpioBank {
    /// Configures `pin` as a push-pull digital output.
    fn configure_output(&mut self, pin: PinId) -> Result<(), GpioError>;

    /// Drives a previously configured output to `level`.
    ///
    /// Infallible by contract: callers guarantee the pin was configured
    /// via [`GpioBank::configure_output`] first. Implementations should
    /// treat a write to an unconfigured pin as a no-op.
    fn set_level(&mut self, pin: PinId, level: Level);
}
