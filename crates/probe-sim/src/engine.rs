// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! An inference engine stub with in-memory tensors and scripted runs.

use crate::event::{EventLog, SimEvent};
use probe_hal::{ElemType, InferenceEngine, TensorView};
use std::collections::VecDeque;

/// In-memory stand-in for the real inference engine.
///
/// Input tensors are zero-filled byte buffers of configurable sizes
/// (zero-length buffers model the degenerate inputs some models
/// declare). Run outcomes are scripted; once the script runs out, runs
/// succeed. Each run is optionally recorded into a shared [`EventLog`]
/// so its position relative to GPIO edges can be asserted.
#[derive(Debug)]
pub struct StubEngine {
    inputs: Vec<(ElemType, Vec<u8>)>,
    run_results: VecDeque<bool>,
    run_count: usize,
    events: Option<EventLog>,
}

impl StubEngine {
    /// Creates an engine with zero-filled `uint8` inputs of the given
    /// byte lengths.
    pub fn with_input_sizes(sizes: &[usize]) -> Self {
        Self {
            inputs: sizes
                .iter()
                .map(|&len| (ElemType::U8, vec![0u8; len]))
                .collect(),
            run_results: VecDeque::new(),
            run_count: 0,
            events: None,
        }
    }

    /// Overrides the element type of input `index`.
    pub fn with_elem_type(mut self, index: usize, elem_type: ElemType) -> Self {
        self.inputs[index].0 = elem_type;
        self
    }

    /// Scripts the outcomes of successive run calls.
    pub fn with_run_results(mut self, results: Vec<bool>) -> Self {
        self.run_results = results.into();
        self
    }

    /// Records every run into `events`.
    pub fn with_event_log(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }

    /// Number of run calls made so far.
    pub fn run_count(&self) -> usize {
        self.run_count
    }

    /// Read-only view of input `index`'s bytes.
    pub fn input_bytes(&self, index: usize) -> &[u8] {
        &self.inputs[index].1
    }
}

impl InferenceEngine for StubEngine {
    fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    fn input_tensor(&mut self, index: usize) -> Option<TensorView<'_>> {
        self.inputs.get_mut(index).map(|(elem_type, data)| TensorView {
            index,
            elem_type: *elem_type,
            data,
        })
    }

    fn run(&mut self) -> bool {
        self.run_count += 1;
        if let Some(events) = &self.events {
            if let Ok(mut log) = events.lock() {
                log.push(SimEvent::InferenceRun);
            }
        }
        self.run_results.pop_front().unwrap_or(true)
    }
}
