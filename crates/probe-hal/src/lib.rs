// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # probe-hal
//!
//! Capability traits consumed by the inference-probe harness, plus the
//! wire-level value types shared across the workspace.
//!
//! The harness core never touches hardware directly. Everything it needs
//! from the platform arrives through four small traits:
//!
//! - [`GpioBank`] — configure pins as outputs and drive their level.
//! - [`SerialLink`] — blocking single-character and bulk byte reads.
//! - [`DelayTimer`] — blocking millisecond sleep.
//! - [`InferenceEngine`] — input-tensor access and a single run call.
//!
//! Implementations live elsewhere: an MCU board crate on the device, or
//! `probe-sim` on the host for tests and simulated sessions.

mod delay;
mod engine;
mod gpio;
mod serial;

pub use delay::DelayTimer;
pub use engine::{ElemType, InferenceEngine, TensorView};
pub use gpio::{GpioBank, GpioError, Level, PinId};
pub use serial::{SerialError, SerialLink};
