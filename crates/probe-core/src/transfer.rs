// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Chunked bulk reception of tensor bytes over the serial link.
//!
//! A tensor payload can run to hundreds of kilobytes, so the receiver
//! splits it into fixed-size chunks: each chunk is one blocking
//! `read_bulk` call against the capability, and the final chunk shrinks
//! to the remainder. After every chunk a [`TransferProgress`] observation
//! is emitted for a UI/log sink — observable, but not part of the
//! correctness contract.
//!
//! On the first capability error the receiver stops immediately and
//! reports how many bytes had landed. Partial data already written to the
//! destination stays there; a mid-stream failure leaves the link's
//! framing state indeterminate anyway, so the caller's only safe move is
//! to abort the wider operation (see [`crate::InputLoadOrchestrator`]).

use crate::error::TransferError;
use probe_hal::SerialLink;

/// Progress of one in-flight transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Total bytes this transfer was asked for.
    pub requested: usize,
    /// Bytes received so far.
    pub completed: usize,
}

impl TransferProgress {
    /// Completion percentage, 0–100.
    ///
    /// Widens to `u64` so the multiply cannot overflow `usize` on 32-bit
    /// targets once a transfer passes ~42 MiB.
    pub fn percent(&self) -> u32 {
        if self.requested == 0 {
            100
        } else {
            (100u64 * self.completed as u64 / self.requested as u64) as u32
        }
    }
}

/// Sink for per-chunk progress observations.
pub trait ProgressObserver {
    /// Called once after each completed chunk.
    fn chunk_complete(&mut self, progress: TransferProgress);
}

/// Default observer: renders progress as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn chunk_complete(&mut self, progress: TransferProgress) {
        tracing::info!(
            completed = progress.completed,
            requested = progress.requested,
            percent = progress.percent(),
            "transfer progress"
        );
    }
}

/// Receives a fixed byte count from the serial link in chunks.
#[derive(Debug, Clone, Copy)]
pub struct SerialBulkReceiver {
    chunk_size: usize,
}

impl SerialBulkReceiver {
    /// Creates a receiver with the given chunk size.
    ///
    /// The chunk size is validated upstream (config); this constructor
    /// trusts it to be non-zero.
    pub fn new(chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0, "chunk size must be non-zero");
        Self { chunk_size }
    }

    /// Configured chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fills `dest` completely from `link`, chunk by chunk.
    ///
    /// An empty `dest` completes immediately with no reads and no
    /// progress observations. On error, bytes `[0, completed)` of `dest`
    /// hold whatever was actually received — never zeroed or rolled back.
    pub fn receive<L, O>(
        &self,
        link: &mut L,
        dest: &mut [u8],
        observer: &mut O,
    ) -> Result<(), TransferError>
    where
        L: SerialLink,
        O: ProgressObserver,
    {
        let requested = dest.len();
        let mut completed = 0;

        while completed < requested {
            // Truncate, don't round: the last chunk is the remainder.
            let chunk = self.chunk_size.min(requested - completed);

            link.read_bulk(&mut dest[completed..completed + chunk])
                .map_err(|kind| TransferError {
                    kind,
                    completed,
                    requested,
                })?;

            completed += chunk;
            observer.chunk_complete(TransferProgress {
                requested,
                completed,
            });
        }

        Ok(())
    }
}
