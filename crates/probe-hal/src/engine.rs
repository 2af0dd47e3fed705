// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Inference-engine capability: tensor access and the run call.
//!
//! The engine is an external collaborator. It owns the model, the tensor
//! arena and the output path; the harness only needs to fill input
//! buffers and trigger a run.

/// Element type tag carried by a tensor descriptor.
///
/// Only informational for the harness — transfers are byte-oriented — but
/// logged before each transfer so the host side can sanity-check what it
/// is about to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElemType {
    /// 8-bit signed integer.
    I8,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit IEEE 754 floating point.
    F32,
    /// Anything else, carrying the engine's raw type code.
    Other(i32),
}

impl ElemType {
    /// Returns a human-readable label for this element type.
    pub fn as_str(self) -> &'static str {
        match self {
            ElemType::I8 => "int8",
            ElemType::U8 => "uint8",
            ElemType::I16 => "int16",
            ElemType::F32 => "float32",
            ElemType::Other(_) => "other",
        }
    }
}

impl std::fmt::Display for ElemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElemType::Other(code) => write!(f, "other ({code})"),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// A mutable view of one input tensor, borrowed from the engine.
///
/// The engine owns the buffer for the process lifetime; the harness only
/// ever writes into it. `data.len()` is the tensor's declared byte
/// length.
#[derive(Debug)]
pub struct TensorView<'a> {
    /// Position of this tensor in the engine's input list.
    pub index: usize,
    /// Element type tag (informational).
    pub elem_type: ElemType,
    /// The tensor's backing bytes.
    pub data: &'a mut [u8],
}

impl TensorView<'_> {
    /// Declared byte length of the tensor.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// The inference engine as the harness sees it.
///
/// Implementations wrap whatever actually executes the model. The
/// harness assumes the engine pre-populates inputs with default or
/// random data at initialisation, so skipping the serial load still
/// yields a runnable model.
pub trait InferenceEngine {
    /// Number of input tensors the loaded model declares.
    fn num_inputs(&self) -> usize;

    /// Borrows a mutable view of input tensor `index`.
    ///
    /// Returns `None` if `index` is out of range.
    fn input_tensor(&mut self, index: usize) -> Option<TensorView<'_>>;

    /// Executes one inference pass, blocking until it completes.
    ///
    /// Returns `true` on success. The harness treats `false` as a
    /// reportable, recoverable outcome — never as fatal.
    fn run(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elem_type_labels() {
        assert_eq!(ElemType::I8.as_str(), "int8");
        assert_eq!(ElemType::F32.as_str(), "float32");
        assert_eq!(ElemType::Other(17).to_string(), "other (17)");
    }

    #[test]
    fn test_tensor_view_len() {
        let mut buf = [0u8; 12];
        let view = TensorView {
            index: 0,
            elem_type: ElemType::U8,
            data: &mut buf,
        };
        assert_eq!(view.byte_len(), 12);
    }
}
