// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the harness core.
//!
//! Propagation policy (deliberately narrow):
//!
//! - [`InitError`] leaves the timing controller permanently disabled but
//!   never halts the harness.
//! - [`TransferError`] aborts the in-progress load and never unwinds past
//!   the orchestrator.
//! - [`ConfigError`] is only possible before the loop starts.
//!
//! An inference failure is a plain `false` from the engine — reported,
//! never an error type. The only unrecoverable condition is a failed
//! model initialisation at startup, which parks the harness (see
//! [`crate::halt_forever`]).

use probe_hal::{GpioError, PinId, SerialError};

/// The role a timing pin plays in the measurement bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    /// Pulsed immediately before the inference call.
    Pre,
    /// Pulsed immediately after the inference call.
    Post,
}

impl std::fmt::Display for PinRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PinRole::Pre => "pre",
            PinRole::Post => "post",
        })
    }
}

/// Timing-pin initialisation failed.
///
/// Carries which pin broke so the report can name it. After this error
/// the controller stays uninitialised and every edge operation becomes a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{role} timing pin {pin} failed to configure: {source}")]
pub struct InitError {
    /// Which of the two timing pins failed.
    pub role: PinRole,
    /// The pin identity that was being configured.
    pub pin: PinId,
    /// The capability-level cause.
    #[source]
    pub source: GpioError,
}

/// A bulk transfer stopped partway through.
///
/// Bytes `[0, completed)` of the destination were already written and
/// are left in place — the receiver never rolls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transfer failed after {completed} of {requested} bytes: {kind}")]
pub struct TransferError {
    /// The capability-level error that stopped the transfer.
    pub kind: SerialError,
    /// Bytes successfully received before the error.
    pub completed: usize,
    /// Bytes originally requested.
    pub requested: usize,
}

/// Harness configuration is invalid or unreadable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config '{path}': {detail}")]
    Io { path: String, detail: String },

    /// The TOML failed to parse or serialise.
    #[error("TOML error: {0}")]
    Toml(String),

    /// A field value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
