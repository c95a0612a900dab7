//! Synthetic VOX file builder for integration tests.

#![allow(dead_code)]

/// Header (8) + MAIN frame (12).
pub const PREAMBLE_LEN: usize = 20;

/// Assembles a VOX container chunk by chunk.
pub struct VoxBuilder {
    version: u32,
    children: Vec<u8>,
}

impl VoxBuilder {
    pub fn new() -> Self {
        Self { version: 150, children: Vec::new() }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn chunk(mut self, tag: &[u8; 4], body: &[u8]) -> Self {
        self.children.extend_from_slice(tag);
        self.children.extend_from_slice(&(body.len() as u32).to_le_bytes());
        self.children.extend_from_slice(&0u32.to_le_bytes());
        self.children.extend_from_slice(body);
        self
    }

    pub fn pack(self, count: u32) -> Self {
        self.chunk(b"PACK", &count.to_le_bytes())
    }

    pub fn size(self, x: u32, y: u32, z: u32) -> Self {
        let mut body = Vec::new();
        for axis in [x, y, z] {
            body.extend_from_slice(&axis.to_le_bytes());
        }
        self.chunk(b"SIZE", &body)
    }

    pub fn xyzi(self, voxels: &[[u8; 4]]) -> Self {
        let mut body = (voxels.len() as u32).to_le_bytes().to_vec();
        for voxel in voxels {
            body.extend_from_slice(voxel);
        }
        self.chunk(b"XYZI", &body)
    }

    pub fn model(self, extent: [u32; 3], voxels: &[[u8; 4]]) -> Self {
        self.size(extent[0], extent[1], extent[2]).xyzi(voxels)
    }

    pub fn rgba(self, color_of: impl Fn(u8) -> [u8; 4]) -> Self {
        let body: Vec<u8> = (0..=u8::MAX).flat_map(color_of).collect();
        self.chunk(b"RGBA", &body)
    }

    pub fn matl(self, index: u32, pairs: &[(&str, &str)]) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&index.to_le_bytes());
        body.extend_from_slice(&(pairs.len() as u32).to_le_bytes());
        for (key, value) in pairs {
            body.extend(string(key));
            body.extend(string(value));
        }
        self.chunk(b"MATL", &body)
    }

    pub fn matt(self, index: u32, kind: u32, weight: f32, trailing: &[u8]) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&index.to_le_bytes());
        body.extend_from_slice(&kind.to_le_bytes());
        body.extend_from_slice(&weight.to_le_bytes());
        body.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        body.extend_from_slice(trailing);
        self.chunk(b"MATT", &body)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PREAMBLE_LEN + self.children.len());
        out.extend_from_slice(b"VOX ");
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(b"MAIN");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(self.children.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.children);
        out
    }
}

pub fn string(text: &str) -> Vec<u8> {
    let mut out = (text.len() as i32).to_le_bytes().to_vec();
    out.extend_from_slice(text.as_bytes());
    out
}
