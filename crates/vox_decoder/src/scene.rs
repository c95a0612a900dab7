//! # Decoded Scene
//!
//! The value tree one decode pass produces. Owns everything; nothing borrows
//! from the input buffer.

use crate::material::MaterialTable;
use crate::model::{Model, Voxel};
use crate::palette::{Palette, Rgba};

/// File header as read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Magic tag, always `VOX ` for a decoded scene.
    pub magic: [u8; 4],
    /// Format version. Recorded, not checked.
    pub version: u32,
}

/// Everything decoded from one VOX container.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedScene {
    /// File header.
    pub header: Header,
    /// Models in chunk order.
    pub models: Vec<Model>,
    /// Last `RGBA` chunk, or the built-in palette.
    pub palette: Palette,
    /// Materials indexed like the palette.
    pub materials: MaterialTable,
}

impl DecodedScene {
    /// Total voxels across all models.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.models.iter().map(Model::voxel_count).sum()
    }

    /// Palette color of a voxel.
    #[inline]
    #[must_use]
    pub fn color_of(&self, voxel: &Voxel) -> Rgba {
        self.palette.get(voxel.color_index)
    }
}
