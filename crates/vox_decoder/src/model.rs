//! Voxel grids decoded from `SIZE` + `XYZI` chunk pairs.

use crate::format::RawVoxel;

/// Single voxel: position within the grid plus palette index.
pub type Voxel = RawVoxel;

/// Grid dimensions of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Width (X).
    pub x: u32,
    /// Depth (Y).
    pub y: u32,
    /// Height (Z).
    pub z: u32,
}

impl Extent {
    /// Creates an extent.
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn volume(&self) -> u64 {
        u64::from(self.x) * u64::from(self.y) * u64::from(self.z)
    }

    /// Returns true if `voxel` lies inside the grid.
    ///
    /// The decoder does not enforce this; files may hold voxels outside
    /// their declared extent.
    #[must_use]
    pub fn contains(&self, voxel: &Voxel) -> bool {
        u32::from(voxel.x) < self.x && u32::from(voxel.y) < self.y && u32::from(voxel.z) < self.z
    }
}

/// One voxel model, voxels kept in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Grid dimensions.
    pub extent: Extent,
    /// Voxels as stored.
    pub voxels: Vec<Voxel>,
}

impl Model {
    /// Returns the number of voxels.
    #[inline]
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Returns true if the model holds no voxels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_contains() {
        let extent = Extent::new(2, 2, 2);
        assert_eq!(extent.volume(), 8);
        assert!(extent.contains(&Voxel { x: 1, y: 1, z: 1, color_index: 5 }));
        assert!(!extent.contains(&Voxel { x: 2, y: 0, z: 0, color_index: 5 }));
    }
}
