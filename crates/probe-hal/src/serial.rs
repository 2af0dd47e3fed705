// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Serial capability: blocking character and bulk reads.
//!
//! The bulk payload is a raw, untyped byte stream — no header, no
//! checksum, no framing. Integrity is the link's problem; the harness
//! only cares how many bytes landed before something went wrong.

/// Receive-side errors reported by the serial capability.
///
/// UART back ends report these as negative return codes; the mapping in
/// [`SerialError::from_code`] is part of the wire contract and must not
/// change without a matching host-side update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SerialError {
    /// Receive buffer overflowed before the harness drained it.
    #[error("RX overflow")]
    Overflow,

    /// The link timed out waiting for data.
    #[error("RX timeout")]
    Timeout,

    /// A break condition was detected on the line.
    #[error("RX break")]
    Break,

    /// A framing error (bad stop bit) was detected.
    #[error("RX framing error")]
    Framing,

    /// A parity mismatch was detected.
    #[error("RX parity error")]
    Parity,

    /// Any other driver-specific failure, carrying the raw code.
    #[error("unknown RX error (code {0})")]
    Unknown(i32),
}

impl SerialError {
    /// Maps a capability-level negative return code onto the taxonomy.
    ///
    /// Codes follow the UART trace library convention:
    /// `-2` overflow, `-3` timeout, `-4` break, `-5` framing, `-6` parity.
    pub fn from_code(code: i32) -> Self {
        match code {
            -2 => SerialError::Overflow,
            -3 => SerialError::Timeout,
            -4 => SerialError::Break,
            -5 => SerialError::Framing,
            -6 => SerialError::Parity,
            other => SerialError::Unknown(other),
        }
    }
}

/// A bidirectional-in-spirit, read-only-in-practice serial link.
///
/// Both reads are blocking: they return only once the requested data has
/// arrived or the link has given up. Timeouts, if any, belong to the
/// implementation and surface as [`SerialError::Timeout`].
pub trait SerialLink {
    /// Reads a single byte, blocking until one is available.
    ///
    /// Used for the interactive input-source prompt, never for payload.
    fn read_char(&mut self) -> u8;

    /// Fills `buf` completely from the link, blocking until done.
    ///
    /// On error, an unspecified prefix of `buf` may already contain
    /// received bytes; callers must not assume the buffer was rolled
    /// back.
    fn read_bulk(&mut self, buf: &mut [u8]) -> Result<(), SerialError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(SerialError::from_code(-2), SerialError::Overflow);
        assert_eq!(SerialError::from_code(-3), SerialError::Timeout);
        assert_eq!(SerialError::from_code(-4), SerialError::Break);
        assert_eq!(SerialError::from_code(-5), SerialError::Framing);
        assert_eq!(SerialError::from_code(-6), SerialError::Parity);
    }

    #[test]
    fn test_unmapped_codes_preserved() {
        assert_eq!(SerialError::from_code(-1), SerialError::Unknown(-1));
        assert_eq!(SerialError::from_code(-99), SerialError::Unknown(-99));
        assert_eq!(SerialError::from_code(7), SerialError::Unknown(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(SerialError::Overflow.to_string(), "RX overflow");
        assert_eq!(
            SerialError::Unknown(-42).to_string(),
            "unknown RX error (code -42)"
        );
    }
}
