// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # probe-core
//!
//! The inference-probe harness: drives a single-inference workload on a
//! device, optionally streams tensor input bytes over a serial link, and
//! brackets the inference call with GPIO pulses so external instruments
//! (oscilloscope, logic analyzer) can measure execution latency.
//!
//! Four components, leaves first:
//!
//! - [`TimingSignalController`] — owns the "pre" and "post" timing pins;
//!   fail-soft by design (no-ops until initialised).
//! - [`SerialBulkReceiver`] — chunked, error-recovering bulk reads into a
//!   destination buffer, with per-chunk progress observations.
//! - [`InputLoadOrchestrator`] — walks the model's input tensors, pulls
//!   bytes for each over the link; skips invalid tensors, aborts the whole
//!   load on a transport error.
//! - [`InferenceCycleController`] — the top-level loop:
//!
//! ```text
//! AwaitingChoice ──► Loading ─────┐
//!       │                         ▼
//!       └─────► SkipLoading ─► PreSignal ─► Inferring ─► PostSignal ─► Reporting ─┐
//!       ▲                                                                         │
//!       └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and single-threaded: the settle delays exist
//! purely to give measurement equipment a stable edge, and must never be
//! overlapped with other work.

mod config;
mod cycle;
mod error;
mod loader;
mod timing;
mod transfer;

pub use config::HarnessConfig;
pub use cycle::{halt_forever, CycleReport, CycleState, InferenceCycleController};
pub use error::{ConfigError, InitError, PinRole, TransferError};
pub use loader::{InputLoadOrchestrator, InputSource, LoadSummary};
pub use timing::TimingSignalController;
pub use transfer::{ProgressObserver, SerialBulkReceiver, TracingProgress, TransferProgress};
