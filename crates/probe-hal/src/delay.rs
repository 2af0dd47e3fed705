// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Delay capability: blocking millisecond sleep.

/// A blocking, monotonic delay source.
///
/// The harness uses this solely for the settle pauses around the timing
/// pulses, so millisecond granularity is sufficient. Implementations must
/// not return early — external measurement equipment triggers on the
/// resulting edge spacing.
pub trait DelayTimer {
    /// Blocks the calling thread for at least `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}
