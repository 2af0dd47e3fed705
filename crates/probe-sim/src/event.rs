// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shared event log interleaving GPIO edges with inference runs.
//!
//! The pulse-bracketing contract is about ordering across two
//! capabilities, so the recording GPIO bank and the stub engine write
//! into one log. The harness is single-threaded; the `Arc<Mutex<…>>` is
//! only there so several collaborators can hold the same log.

use probe_hal::{Level, PinId};
use std::sync::{Arc, Mutex};

/// One observable simulation event, in occurrence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// An output pin was driven to a level.
    Edge(PinId, Level),
    /// The engine's run call was entered.
    InferenceRun,
}

/// Ordered log of [`SimEvent`]s shared between simulated capabilities.
pub type EventLog = Arc<Mutex<Vec<SimEvent>>>;

/// Creates an empty shared event log.
pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}
