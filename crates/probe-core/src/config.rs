// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Harness configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! [pre_pin]
//! port = 1
//! pin = 4
//!
//! [post_pin]
//! port = 1
//! pin = 5
//!
//! chunk_size = 4096
//! settle_delay_ms = 50
//! ```

use crate::ConfigError;
use probe_hal::PinId;
use std::path::Path;

/// Default transfer chunk: balances per-call driver overhead against the
/// buffering limits of typical UART back ends.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Default settle delay around the timing pulses, in milliseconds.
pub const DEFAULT_SETTLE_DELAY_MS: u32 = 50;

/// Configuration for the inference-probe harness.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HarnessConfig {
    /// Pin pulsed before the inference call.
    #[serde(default = "default_pre_pin")]
    pub pre_pin: PinId,
    /// Pin pulsed after the inference call.
    #[serde(default = "default_post_pin")]
    pub post_pin: PinId,
    /// Bytes requested per bulk-read call.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Width of each timing pulse, in milliseconds.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u32,
}

fn default_pre_pin() -> PinId {
    PinId::new(1, 4)
}

fn default_post_pin() -> PinId {
    PinId::new(1, 5)
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_settle_delay() -> u32 {
    DEFAULT_SETTLE_DELAY_MS
}

impl HarnessConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string and validates it.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Toml(e.to_string()))
    }

    /// Checks field ranges.
    ///
    /// A zero chunk size would turn the receive loop into a spin; a zero
    /// settle delay would collapse the pulse the instruments trigger on.
    /// Both are rejected here rather than defended against downstream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be > 0".into()));
        }
        if self.settle_delay_ms == 0 {
            return Err(ConfigError::Invalid("settle_delay_ms must be > 0".into()));
        }
        if self.pre_pin == self.post_pin {
            return Err(ConfigError::Invalid(format!(
                "pre and post timing pins must differ (both are {})",
                self.pre_pin
            )));
        }
        Ok(())
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            pre_pin: default_pre_pin(),
            post_pin: default_post_pin(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = HarnessConfig::default();
        assert_eq!(c.pre_pin, PinId::new(1, 4));
        assert_eq!(c.post_pin, PinId::new(1, 5));
        assert_eq!(c.chunk_size, 4096);
        assert_eq!(c.settle_delay_ms, 50);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
chunk_size = 1024
settle_delay_ms = 25

[pre_pin]
port = 2
pin = 0

[post_pin]
port = 2
pin = 1
"#;
        let c = HarnessConfig::from_toml(toml).unwrap();
        assert_eq!(c.pre_pin, PinId::new(2, 0));
        assert_eq!(c.post_pin, PinId::new(2, 1));
        assert_eq!(c.chunk_size, 1024);
        assert_eq!(c.settle_delay_ms, 25);
    }

    #[test]
    fn test_from_toml_defaults() {
        let c = HarnessConfig::from_toml("").unwrap();
        assert_eq!(c, HarnessConfig::default());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = HarnessConfig::default();
        let toml = c.to_toml().unwrap();
        let back = HarnessConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let c = HarnessConfig {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_settle_rejected() {
        let c = HarnessConfig {
            settle_delay_ms: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_same_pins_rejected() {
        let c = HarnessConfig {
            post_pin: PinId::new(1, 4),
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}
