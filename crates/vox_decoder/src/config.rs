//! # Decoder Configuration
//!
//! Limits and logging toggles for a decode pass. Hosts can embed these in
//! their own TOML config:
//!
//! ```toml
//! max_voxels_per_model = 65536
//! log_unknown_chunks = false
//! ```

use serde::Deserialize;

use crate::error::{DecodeError, DecodeResult};

/// Largest voxel count a 256×256×256 grid can hold.
pub const MAX_GRID_VOXELS: u32 = 256 * 256 * 256;

/// Configuration for [`crate::VoxDecoder`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Upper bound on voxels in one `XYZI` chunk, checked before allocating.
    pub max_voxels_per_model: u32,
    /// Emit a debug event for every skipped chunk.
    pub log_unknown_chunks: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_voxels_per_model: MAX_GRID_VOXELS,
            log_unknown_chunks: true,
        }
    }
}

impl DecoderConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML for this type.
    pub fn from_toml_str(text: &str) -> DecodeResult<Self> {
        toml::from_str(text).map_err(|e| DecodeError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DecoderConfig::from_toml_str("max_voxels_per_model = 1024").unwrap();
        assert_eq!(config.max_voxels_per_model, 1024);
        assert!(config.log_unknown_chunks);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DecoderConfig::from_toml_str("").unwrap(), DecoderConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = DecoderConfig::from_toml_str("max_voxels_per_model = \"lots\"").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidConfig(_)));
    }
}
