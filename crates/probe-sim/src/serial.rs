// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A serial link replaying scripted bytes.

use probe_hal::{SerialError, SerialLink};
use std::collections::VecDeque;

/// Scripted serial link for tests and simulated sessions.
///
/// Prompt reads (`read_char`) and bulk reads (`read_bulk`) draw from
/// separate scripts, mirroring how the real link multiplexes interactive
/// input and payload phases. Once the prompt script runs dry,
/// `read_char` keeps answering `n` so a simulated session settles into
/// default-input cycles instead of deadlocking.
#[derive(Debug)]
pub struct ScriptedSerial {
    prompt: VecDeque<u8>,
    bulk: Vec<u8>,
    cursor: usize,
    fail_at: Option<(usize, SerialError)>,
    bulk_reads: Vec<usize>,
}

impl ScriptedSerial {
    /// Creates a link with empty scripts.
    pub fn new() -> Self {
        Self {
            prompt: VecDeque::new(),
            bulk: Vec::new(),
            cursor: 0,
            fail_at: None,
            bulk_reads: Vec::new(),
        }
    }

    /// Queues bytes for `read_char`, in order.
    pub fn with_prompt_bytes(mut self, bytes: &[u8]) -> Self {
        self.prompt.extend(bytes);
        self
    }

    /// Sets the payload stream served by `read_bulk`.
    pub fn with_bulk_data(mut self, data: Vec<u8>) -> Self {
        self.bulk = data;
        self
    }

    /// Injects a fault: any bulk read that would carry the stream past
    /// `offset` bytes fails with `err` instead of transferring.
    pub fn fail_after(mut self, offset: usize, err: SerialError) -> Self {
        self.fail_at = Some((offset, err));
        self
    }

    /// Sizes of every bulk read requested so far, including failed ones.
    pub fn bulk_reads(&self) -> &[usize] {
        &self.bulk_reads
    }

    /// Bytes of the payload stream already consumed.
    pub fn bytes_served(&self) -> usize {
        self.cursor
    }
}

impl Default for ScriptedSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialLink for ScriptedSerial {
    fn read_char(&mut self) -> u8 {
        self.prompt.pop_front().unwrap_or(b'n')
    }

    fn read_bulk(&mut self, buf: &mut [u8]) -> Result<(), SerialError> {
        self.bulk_reads.push(buf.len());

        if let Some((offset, err)) = self.fail_at {
            if self.cursor + buf.len() > offset {
                return Err(err);
            }
        }
        if self.cursor + buf.len() > self.bulk.len() {
            // Script exhausted: a real link would sit silent until its
            // driver gives up.
            return Err(SerialError::Timeout);
        }

        buf.copy_from_slice(&self.bulk[self.cursor..self.cursor + buf.len()]);
        self.cursor += buf.len();
        Ok(())
    }
}
