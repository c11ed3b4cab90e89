#![allow(dead_code)]

use image::{ImageBuffer, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Smooth synthetic picture; `seed` picks the layout, size only changes
/// the resolution it is rendered at.
///
/// Mirrors `scene` in `src/core/test_support.rs`; keep the two in sync.
pub fn scene(seed: u64, width: u32, height: u32) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let blobs: Vec<(f32, f32, f32, f32)> = (0..8)
        .map(|_| {
            (
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..1.0),
                rng.random_range(0.08..0.3),
                rng.random_range(-70.0..70.0),
            )
        })
        .collect();

    ImageBuffer::from_fn(width, height, |x, y| {
        let u = (x as f32 + 0.5) / width as f32;
        let v = (y as f32 + 0.5) / height as f32;
        let mut value = 128.0;
        for &(cx, cy, radius, amplitude) in &blobs {
            let d2 = (u - cx).powi(2) + (v - cy).powi(2);
            value += amplitude * (-d2 / (2.0 * radius * radius)).exp();
        }
        let l = value.clamp(40.0, 215.0) as u8;
        Rgb([l, l, l])
    })
}

pub fn write_scene(dir: &Path, name: &str, seed: u64, width: u32, height: u32) {
    scene(seed, width, height).save(dir.join(name)).unwrap();
}
