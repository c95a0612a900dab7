//! # VOX Decoder
//!
//! Read-only decoder for MagicaVoxel `.vox` containers. Turns the chunked
//! binary format into an owned [`DecodedScene`]: voxel models, the 256-color
//! palette and the per-index material table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DECODE PIPELINE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  &[u8] → ByteCursor → ChunkHeader → handler → DecodedScene  │
//! │                            ↓                                 │
//! │              SIZE/XYZI · RGBA · MATL · MATT · (skip)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - All-or-nothing: a decode returns a complete scene or an error
//! - Unknown chunks are skipped, never rejected
//! - No reads past the end of the input, ever
//!
//! ## Example
//!
//! ```rust,ignore
//! use vox_decoder::{decode, MaterialField};
//!
//! let scene = decode(&std::fs::read("assets/models/sword.vox")?)?;
//! for model in &scene.models {
//!     println!("{:?}: {} voxels", model.extent, model.voxel_count());
//! }
//! let rough = scene.materials.get(3).get(MaterialField::Rough);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod format;
pub mod material;
pub mod model;
pub mod palette;
pub mod scene;

pub use config::DecoderConfig;
pub use cursor::ByteCursor;
pub use decoder::VoxDecoder;
pub use error::{DecodeError, DecodeResult};
pub use format::{ChunkHeader, ChunkTag, FileHeader, LegacyMaterialRecord, RawVoxel};
pub use material::{FieldMask, Material, MaterialField, MaterialKind, MaterialTable};
pub use model::{Extent, Model, Voxel};
pub use palette::{Palette, Rgba, PALETTE_SIZE};
pub use scene::{DecodedScene, Header};

/// Decodes a VOX container with the default configuration.
///
/// # Errors
///
/// See [`VoxDecoder::decode`].
pub fn decode(data: &[u8]) -> DecodeResult<DecodedScene> {
    VoxDecoder::default().decode(data)
}
