//! # Decode Benchmark
//!
//! Measures full-container decode throughput for a dense model, and the
//! cost of skipping many unknown chunks.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vox_decoder::decode;

const GRID: u32 = 64;

fn chunk(out: &mut Vec<u8>, tag: &[u8; 4], body: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(body);
}

fn container(children: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(20 + children.len());
    out.extend_from_slice(b"VOX ");
    out.extend_from_slice(&150u32.to_le_bytes());
    out.extend_from_slice(b"MAIN");
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(children.len() as u32).to_le_bytes());
    out.extend_from_slice(children);
    out
}

/// One fully filled GRID³ model plus a palette and a few materials.
fn dense_model_file() -> Vec<u8> {
    let mut children = Vec::new();

    let mut size = Vec::new();
    for _ in 0..3 {
        size.extend_from_slice(&GRID.to_le_bytes());
    }
    chunk(&mut children, b"SIZE", &size);

    let mut xyzi = (GRID * GRID * GRID).to_le_bytes().to_vec();
    for z in 0..GRID as u8 {
        for y in 0..GRID as u8 {
            for x in 0..GRID as u8 {
                xyzi.extend_from_slice(&[x, y, z, (x ^ y ^ z) | 1]);
            }
        }
    }
    chunk(&mut children, b"XYZI", &xyzi);

    let palette: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i, 255]).collect();
    chunk(&mut children, b"RGBA", &palette);

    for index in 1..32u32 {
        let mut matl = index.to_le_bytes().to_vec();
        matl.extend_from_slice(&2u32.to_le_bytes());
        for text in ["_type", "_metal", "_rough", "0.35"] {
            matl.extend_from_slice(&(text.len() as i32).to_le_bytes());
            matl.extend_from_slice(text.as_bytes());
        }
        chunk(&mut children, b"MATL", &matl);
    }

    container(&children)
}

/// Thousands of scene-graph style chunks the decoder does not interpret.
fn unknown_chunk_file() -> Vec<u8> {
    let mut children = Vec::new();
    for i in 0..10_000u32 {
        let tag = if i % 2 == 0 { b"nTRN" } else { b"nSHP" };
        chunk(&mut children, tag, &[0u8; 48]);
    }
    container(&children)
}

fn bench_dense_model(c: &mut Criterion) {
    let data = dense_model_file();
    c.bench_function("decode_dense_64_cubed", |b| {
        b.iter(|| {
            let scene = decode(black_box(&data)).unwrap();
            black_box(scene.voxel_count())
        });
    });
}

fn bench_unknown_chunks(c: &mut Criterion) {
    let data = unknown_chunk_file();
    c.bench_function("skip_10k_unknown_chunks", |b| {
        b.iter(|| {
            let scene = decode(black_box(&data)).unwrap();
            black_box(scene.models.len())
        });
    });
}

criterion_group!(benches, bench_dense_model, bench_unknown_chunks);
criterion_main!(benches);
