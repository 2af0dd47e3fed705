// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # probe-sim
//!
//! Host-side implementations of the `probe-hal` capabilities, used by the
//! unit and integration tests and by the `inference-probe` CLI to run
//! harness sessions without hardware.
//!
//! Everything here is scripted and observable:
//!
//! - [`ScriptedSerial`] replays prompt bytes and a bulk byte stream, can
//!   inject a fault at a chosen byte offset, and records the size of
//!   every bulk read it was asked for.
//! - [`RecordingGpio`] appends every output edge to a shared
//!   [`EventLog`], and can be told to reject configuration of chosen
//!   pins.
//! - [`StubEngine`] holds in-memory input tensors and a scripted
//!   sequence of run outcomes, and logs each run into the same
//!   [`EventLog`] so edge/run ordering is checkable.
//! - [`InstantDelay`] records requested sleeps without sleeping;
//!   [`WallClockDelay`] actually sleeps, for realistic pulse widths in
//!   simulated sessions.

mod delay;
mod engine;
mod event;
mod gpio;
mod serial;

pub use delay::{InstantDelay, WallClockDelay};
pub use engine::StubEngine;
pub use event::{new_event_log, EventLog, SimEvent};
pub use gpio::RecordingGpio;
pub use serial::ScriptedSerial;
