//! # On-Disk Layout
//!
//! Fixed-size records of the VOX container, read straight out of the byte
//! buffer as `Pod` values. Multi-byte fields are stored little-endian; the
//! accessors convert so hosts of either endianness decode the same values.
//!
//! ```text
//! VOX File Structure:
//! ├── "VOX " (4 bytes) - Magic number
//! ├── Version (4 bytes)
//! └── MAIN Chunk
//!     ├── PACK Chunk - Model count (optional)
//!     ├── SIZE Chunk - Model dimensions  ┐ once per model
//!     ├── XYZI Chunk - Voxel data        ┘
//!     ├── RGBA Chunk - Palette (optional)
//!     ├── MATL / MATT Chunks - Materials (optional)
//!     └── ... any other chunk is skipped
//! ```

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// VOX file magic number.
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// Version written by current MagicaVoxel releases.
pub const VOX_VERSION: u32 = 150;

/// File header: magic + version.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FileHeader {
    /// Must equal [`VOX_MAGIC`].
    pub magic: [u8; 4],
    version: u32,
}

impl FileHeader {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// File format version.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u32 {
        u32::from_le(self.version)
    }
}

/// Chunk frame preceding every chunk body.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ChunkHeader {
    /// Raw 4-byte tag.
    pub id: [u8; 4],
    content_size: u32,
    children_size: u32,
}

impl ChunkHeader {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Parsed tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> ChunkTag {
        ChunkTag::from_bytes(self.id)
    }

    /// Size of this chunk's own payload.
    #[inline]
    #[must_use]
    pub const fn content_size(&self) -> u32 {
        u32::from_le(self.content_size)
    }

    /// Total size of nested child chunks.
    #[inline]
    #[must_use]
    pub const fn children_size(&self) -> u32 {
        u32::from_le(self.children_size)
    }
}

/// One `XYZI` voxel record: position then palette index.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RawVoxel {
    /// X position.
    pub x: u8,
    /// Y position.
    pub y: u8,
    /// Z position.
    pub z: u8,
    /// Palette index.
    pub color_index: u8,
}

/// Fixed head of a legacy `MATT` chunk.
///
/// Layout: index, type, weight, property bits. Any payload past these
/// 16 bytes holds per-property values that are not interpreted.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LegacyMaterialRecord {
    index: u32,
    kind: u32,
    weight: u32,
    property_bits: u32,
}

impl LegacyMaterialRecord {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Legacy type: diffuse.
    pub const TYPE_DIFFUSE: u32 = 0;
    /// Legacy type: metal.
    pub const TYPE_METAL: u32 = 1;
    /// Legacy type: glass.
    pub const TYPE_GLASS: u32 = 2;
    /// Legacy type: emissive.
    pub const TYPE_EMIT: u32 = 3;

    /// Palette slot this material applies to, masked to 0-255.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> u8 {
        u32::from_le(self.index).to_le_bytes()[0]
    }

    /// Raw legacy type tag.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> u32 {
        u32::from_le(self.kind)
    }

    /// Material weight in `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> f32 {
        f32::from_bits(u32::from_le(self.weight))
    }

    /// Property bit mask. Unused by interpretation.
    #[inline]
    #[must_use]
    pub const fn property_bits(&self) -> u32 {
        u32::from_le(self.property_bits)
    }
}

/// Chunk type identified by its 4-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// Top-level container.
    Main,
    /// Model count.
    Pack,
    /// Model extent.
    Size,
    /// Model voxels.
    Xyzi,
    /// Palette.
    Rgba,
    /// Key/value material.
    Matl,
    /// Legacy fixed-layout material.
    Matt,
    /// Anything else. Skipped by the decoder.
    Unknown([u8; 4]),
}

impl ChunkTag {
    /// Classifies a raw tag.
    #[must_use]
    pub const fn from_bytes(id: [u8; 4]) -> Self {
        match &id {
            b"MAIN" => Self::Main,
            b"PACK" => Self::Pack,
            b"SIZE" => Self::Size,
            b"XYZI" => Self::Xyzi,
            b"RGBA" => Self::Rgba,
            b"MATL" => Self::Matl,
            b"MATT" => Self::Matt,
            _ => Self::Unknown(id),
        }
    }

    /// Raw tag bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        match self {
            Self::Main => *b"MAIN",
            Self::Pack => *b"PACK",
            Self::Size => *b"SIZE",
            Self::Xyzi => *b"XYZI",
            Self::Rgba => *b"RGBA",
            Self::Matl => *b"MATL",
            Self::Matt => *b"MATT",
            Self::Unknown(id) => id,
        }
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_bytes()))
    }
}
