// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Input-tensor loading over the serial link.
//!
//! Two error policies live here, and they are deliberately different:
//!
//! - A tensor that fails validation (zero byte length) is **skipped** and
//!   the loader moves on. Some models legitimately declare degenerate
//!   inputs; one bad descriptor should not starve the rest.
//! - A transport error **aborts the whole load**, including tensors not
//!   yet attempted. A mid-stream failure leaves the link's framing state
//!   indeterminate, so continuing would feed later tensors misaligned
//!   bytes.
//!
//! Do not unify these. The split is the contract.

use crate::error::TransferError;
use crate::transfer::{ProgressObserver, SerialBulkReceiver};
use probe_hal::{InferenceEngine, SerialLink};

/// Where the next inference cycle's input bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Stream tensor bytes from the host over the serial link.
    TransferLink,
    /// Keep whatever the engine populated at initialisation.
    Defaults,
}

/// Outcome of one whole-model load pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Tensors whose bytes arrived completely.
    pub loaded: usize,
    /// Tensors skipped by validation (zero byte length).
    pub skipped: usize,
    /// Set if a transport error stopped the pass early.
    pub aborted: Option<TransferError>,
}

impl LoadSummary {
    /// Whether every valid tensor was loaded.
    pub fn complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Walks a model's declared inputs and pulls bytes for each over the
/// serial link.
#[derive(Debug)]
pub struct InputLoadOrchestrator {
    receiver: SerialBulkReceiver,
}

impl InputLoadOrchestrator {
    /// Creates an orchestrator transferring in chunks of
    /// `receiver.chunk_size()` bytes.
    pub fn new(receiver: SerialBulkReceiver) -> Self {
        Self { receiver }
    }

    /// Blocks on the serial link until the operator picks an input
    /// source.
    ///
    /// Accepts `y`/`Y` (stream from the link) and `n`/`N` (keep engine
    /// defaults); every other byte is discarded and the read repeats.
    /// This is a human-interactive loop — there is no retry bound and no
    /// timeout at this layer.
    pub fn prompt_source<L: SerialLink>(&self, link: &mut L) -> InputSource {
        tracing::info!("load input tensor data over the serial link? (y/n)");
        loop {
            match link.read_char() {
                b'y' | b'Y' => {
                    tracing::info!(choice = "y", "input source selected");
                    return InputSource::TransferLink;
                }
                b'n' | b'N' => {
                    tracing::info!(choice = "n", "input source selected");
                    return InputSource::Defaults;
                }
                other => {
                    tracing::debug!(byte = other, "ignoring input byte");
                }
            }
        }
    }

    /// Loads every declared input tensor from the link, best-effort.
    ///
    /// Never fails as a whole: validation failures skip the tensor,
    /// transport failures abort the remainder, and either way the caller
    /// gets a [`LoadSummary`] describing what actually happened. See the
    /// module docs for why the two policies differ.
    pub fn load_all_inputs<E, L, O>(
        &self,
        engine: &mut E,
        link: &mut L,
        observer: &mut O,
    ) -> LoadSummary
    where
        E: InferenceEngine,
        L: SerialLink,
        O: ProgressObserver,
    {
        let num_inputs = engine.num_inputs();
        tracing::info!(num_inputs, "loading input tensors over the serial link");

        let mut summary = LoadSummary {
            loaded: 0,
            skipped: 0,
            aborted: None,
        };

        for index in 0..num_inputs {
            let Some(tensor) = engine.input_tensor(index) else {
                // The engine lied about its input count; treat like a
                // validation failure and move on.
                tracing::warn!(index, "engine returned no tensor at declared index, skipping");
                summary.skipped += 1;
                continue;
            };

            if tensor.byte_len() == 0 {
                tracing::warn!(index, "invalid input tensor (zero byte length), skipping");
                summary.skipped += 1;
                continue;
            }

            let kib = tensor.byte_len() as f64 / 1024.0;
            tracing::info!(
                index,
                bytes = tensor.byte_len(),
                kib,
                elem_type = %tensor.elem_type,
                "ready to receive tensor, start sending from the host now"
            );

            match self.receiver.receive(link, tensor.data, observer) {
                Ok(()) => {
                    tracing::info!(index, "input tensor loaded");
                    summary.loaded += 1;
                }
                Err(err) => {
                    tracing::error!(
                        index,
                        completed = err.completed,
                        requested = err.requested,
                        kind = %err.kind,
                        "transfer failed, aborting input load"
                    );
                    summary.aborted = Some(err);
                    // The link framing state is unknown now. Stop; do
                    // not touch the remaining tensors.
                    return summary;
                }
            }
        }

        tracing::info!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            "all input tensors processed"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TracingProgress;
    use probe_sim::{ScriptedSerial, StubEngine};

    fn orchestrator(chunk: usize) -> InputLoadOrchestrator {
        InputLoadOrchestrator::new(SerialBulkReceiver::new(chunk))
    }

    #[test]
    fn test_prompt_accepts_case_insensitive_tokens() {
        let orch = orchestrator(16);

        let mut link = ScriptedSerial::new().with_prompt_bytes(b"y");
        assert_eq!(orch.prompt_source(&mut link), InputSource::TransferLink);

        let mut link = ScriptedSerial::new().with_prompt_bytes(b"N");
        assert_eq!(orch.prompt_source(&mut link), InputSource::Defaults);
    }

    #[test]
    fn test_prompt_discards_garbage() {
        let orch = orchestrator(16);
        let mut link = ScriptedSerial::new().with_prompt_bytes(b"x3 Y");
        assert_eq!(orch.prompt_source(&mut link), InputSource::TransferLink);
    }

    #[test]
    fn test_load_all_valid_tensors() {
        let mut engine = StubEngine::with_input_sizes(&[8, 24]);
        let stream: Vec<u8> = (0..32u8).collect();
        let mut link = ScriptedSerial::new().with_bulk_data(stream.clone());

        let summary =
            orchestrator(16).load_all_inputs(&mut engine, &mut link, &mut TracingProgress);

        assert_eq!(summary.loaded, 2);
        assert_eq!(summary.skipped, 0);
        assert!(summary.complete());
        assert_eq!(engine.input_bytes(0), &stream[..8]);
        assert_eq!(engine.input_bytes(1), &stream[8..]);
    }

    #[test]
    fn test_zero_length_tensor_is_skipped_not_fatal() {
        let mut engine = StubEngine::with_input_sizes(&[0, 16]);
        let stream: Vec<u8> = (0..16u8).collect();
        let mut link = ScriptedSerial::new().with_bulk_data(stream.clone());

        let summary =
            orchestrator(16).load_all_inputs(&mut engine, &mut link, &mut TracingProgress);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.loaded, 1);
        assert_eq!(engine.input_bytes(1), &stream[..]);
    }

    #[test]
    fn test_transport_error_aborts_remaining_tensors() {
        // Tensor 0 invalid, tensor 1 fine, tensor 2 dies mid-stream,
        // tensor 3 must never be attempted.
        let mut engine = StubEngine::with_input_sizes(&[0, 16, 32, 16]);
        let mut link = ScriptedSerial::new()
            .with_bulk_data((0..64u8).collect())
            .fail_after(32, probe_hal::SerialError::Timeout);

        let summary =
            orchestrator(16).load_all_inputs(&mut engine, &mut link, &mut TracingProgress);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.loaded, 1);
        let abort = summary.aborted.unwrap();
        assert_eq!(abort.kind, probe_hal::SerialError::Timeout);
        assert_eq!(abort.completed, 16); // one chunk of tensor 2 landed
        assert_eq!(abort.requested, 32);

        // Tensor 3 untouched: its default fill is still in place.
        assert!(engine.input_bytes(3).iter().all(|&b| b == 0));
        // And no bulk read was ever issued for it.
        assert_eq!(link.bulk_reads().len(), 3); // 1 (t1) + 2 attempts (t2)
    }
}
