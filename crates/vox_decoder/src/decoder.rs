//! # Chunk Dispatcher
//!
//! Walks the top-level chunk stream and routes each chunk body to its
//! handler. Each handler sees only its own payload through a sub-cursor, so
//! the outer cursor always advances by exactly the declared payload size.
//!
//! ## Decode Flow
//!
//! ```text
//! header ─► MAIN frame ─► [PACK] ─► loop over frames:
//!                                     SIZE ─► XYZI   → Model
//!                                     RGBA           → Palette
//!                                     MATL / MATT    → MaterialTable slot
//!                                     anything else  → skipped
//! ```
//!
//! Any failure aborts the whole decode; no partial scene is returned.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::format::{ChunkHeader, ChunkTag, FileHeader, LegacyMaterialRecord, VOX_MAGIC, VOX_VERSION};
use crate::material::{Material, MaterialTable};
use crate::model::{Extent, Model, Voxel};
use crate::palette::Palette;
use crate::scene::{DecodedScene, Header};

/// Smallest possible SIZE + XYZI pair: two frames, 12 bytes of extent,
/// 4 bytes of voxel count.
const MIN_MODEL_BYTES: usize = 2 * ChunkHeader::SIZE + 12 + 4;

/// VOX container decoder.
#[derive(Debug, Clone, Default)]
pub struct VoxDecoder {
    config: DecoderConfig,
}

impl VoxDecoder {
    /// Creates a decoder with the given configuration.
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Reads a VOX file from disk and decodes it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise any decode error.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> DecodeResult<DecodedScene> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!("Loaded {} ({} bytes)", path.display(), data.len());
        self.decode(&data)
    }

    /// Decodes a complete VOX container held in memory.
    ///
    /// # Errors
    ///
    /// Returns the first structural failure encountered. Unknown chunks are
    /// never an error.
    pub fn decode(&self, data: &[u8]) -> DecodeResult<DecodedScene> {
        let _span = tracing::debug_span!("vox_decode", bytes = data.len()).entered();
        let mut file = ByteCursor::new(data);

        let header = read_header(&mut file)?;
        // Chunks are only read from MAIN's declared children
        let mut cursor = read_main(&mut file)?;
        if !file.is_empty() {
            debug!("Ignoring {} bytes after MAIN", file.remaining());
        }
        let declared = read_pack(&mut cursor)?;

        let capacity = usize::try_from(declared)
            .unwrap_or(usize::MAX)
            .min(cursor.remaining() / MIN_MODEL_BYTES + 1);
        let mut models = Vec::with_capacity(capacity);
        let mut palette = Palette::default();
        let mut materials = MaterialTable::default();

        while !cursor.is_empty() {
            let frame: ChunkHeader = cursor.read_pod()?;
            let mut body = cursor.sub_cursor(frame.content_size() as usize)?;

            match frame.tag() {
                ChunkTag::Size => {
                    if models.len() >= declared as usize {
                        return Err(DecodeError::ModelCountExceeded { declared });
                    }
                    let model = self.read_model(&mut body, &mut cursor)?;
                    debug!(
                        "Model {}: {}x{}x{}, {} voxels",
                        models.len(),
                        model.extent.x,
                        model.extent.y,
                        model.extent.z,
                        model.voxel_count()
                    );
                    models.push(model);
                }
                ChunkTag::Rgba => {
                    palette = Palette::read_from(&mut body)?;
                    debug!("Palette replaced");
                }
                ChunkTag::Matl => {
                    let (index, material) = read_matl(&mut body)?;
                    trace!("MATL {}: {:?}", index, material.kind);
                    materials.set(index, material);
                }
                ChunkTag::Matt => {
                    let (index, material) = read_matt(&mut body)?;
                    trace!("MATT {}: {:?}", index, material.kind);
                    materials.set(index, material);
                }
                ChunkTag::Xyzi => {
                    warn!("XYZI chunk without preceding SIZE at offset {}, skipped", body.position());
                }
                ChunkTag::Main | ChunkTag::Pack => {
                    debug!("Unexpected {} chunk after container start, skipped", frame.tag());
                }
                ChunkTag::Unknown(_) => {
                    if self.config.log_unknown_chunks {
                        debug!(
                            "Skipping unknown chunk {} ({} bytes)",
                            frame.tag(),
                            frame.content_size()
                        );
                    }
                }
            }
        }

        Ok(DecodedScene {
            header,
            models,
            palette,
            materials,
        })
    }

    /// Geometry handler: `SIZE` body, then the mandatory `XYZI` chunk that
    /// follows it in the outer stream.
    fn read_model(&self, size_body: &mut ByteCursor<'_>, cursor: &mut ByteCursor<'_>) -> DecodeResult<Model> {
        let extent = Extent::new(size_body.read_u32()?, size_body.read_u32()?, size_body.read_u32()?);

        if cursor.is_empty() {
            return Err(DecodeError::MalformedChunkSequence {
                expected: "XYZI",
                found: "end of input".to_string(),
            });
        }
        let frame: ChunkHeader = cursor.read_pod()?;
        if frame.tag() != ChunkTag::Xyzi {
            return Err(DecodeError::MalformedChunkSequence {
                expected: "XYZI",
                found: frame.tag().to_string(),
            });
        }
        let mut body = cursor.sub_cursor(frame.content_size() as usize)?;

        let count = body.read_u32()?;
        if count > self.config.max_voxels_per_model {
            return Err(DecodeError::VoxelLimitExceeded {
                count,
                limit: self.config.max_voxels_per_model,
            });
        }
        let bytes = body.read((count as usize).saturating_mul(std::mem::size_of::<Voxel>()))?;
        let voxels = bytemuck::cast_slice::<u8, Voxel>(bytes).to_vec();

        Ok(Model { extent, voxels })
    }
}

fn read_header(cursor: &mut ByteCursor<'_>) -> DecodeResult<Header> {
    let header: FileHeader = cursor.read_pod()?;
    if header.magic != VOX_MAGIC {
        return Err(DecodeError::BadMagic { found: header.magic });
    }
    let version = header.version();
    if version != VOX_VERSION {
        debug!("VOX version {} (expected {})", version, VOX_VERSION);
    }
    Ok(Header { magic: header.magic, version })
}

/// Reads the `MAIN` frame and returns a cursor bounded to its children.
/// A file cut short anywhere inside MAIN fails here with `Truncated`.
fn read_main<'a>(cursor: &mut ByteCursor<'a>) -> DecodeResult<ByteCursor<'a>> {
    if cursor.is_empty() {
        return Err(DecodeError::BadContainer);
    }
    let frame: ChunkHeader = cursor.read_pod()?;
    if frame.tag() != ChunkTag::Main {
        return Err(DecodeError::BadContainer);
    }
    cursor.skip(i64::from(frame.content_size()))?;
    cursor.sub_cursor(frame.children_size() as usize)
}

/// Consumes an optional `PACK` chunk. Returns the declared model count,
/// 1 when the chunk is absent.
fn read_pack(cursor: &mut ByteCursor<'_>) -> DecodeResult<u32> {
    let is_pack = matches!(
        cursor.peek_pod::<[u8; 4]>(),
        Ok(id) if ChunkTag::from_bytes(id) == ChunkTag::Pack
    );
    if !is_pack {
        return Ok(1);
    }
    let frame: ChunkHeader = cursor.read_pod()?;
    let mut body = cursor.sub_cursor(frame.content_size() as usize)?;
    let count = body.read_u32()?;
    debug!("PACK declares {} models", count);
    Ok(count)
}

/// Modern material handler: index, then a key/value dictionary.
fn read_matl(body: &mut ByteCursor<'_>) -> DecodeResult<(u8, Material)> {
    let index = body.read_u32()?.to_le_bytes()[0];
    let pair_count = body.read_u32()?;

    let mut material = Material::DEFAULT;
    for _ in 0..pair_count {
        let key = body.read_string()?;
        let value = body.read_string()?;
        if !material.apply_property(&key, &value)? {
            trace!("MATL {}: ignoring key {:?}", index, key);
        }
    }
    Ok((index, material))
}

/// Legacy material handler. Only the fixed 16-byte head is interpreted; the
/// rest of the payload stays unread in `body` and is dropped with it.
fn read_matt(body: &mut ByteCursor<'_>) -> DecodeResult<(u8, Material)> {
    let record: LegacyMaterialRecord = body.read_pod()?;
    trace!(
        "MATT {}: property bits {:#x}, {} trailing bytes",
        record.index(),
        record.property_bits(),
        body.remaining()
    );
    Ok((record.index(), Material::from_legacy(&record)))
}
