use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Smooth synthetic scene built from a handful of Gaussian blobs.
///
/// Keep in sync with `scene` in `tests/common/mod.rs`; integration tests
/// cannot see this module.
///
/// The scene is defined in normalised coordinates, so the same `seed`
/// rendered at different sizes shows the same picture.
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

/// Uniform random pixels.
pub fn noise(seed: u64, width: u32, height: u32) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    ImageBuffer::from_fn(width, height, |_, _| Rgb([rng.random(), rng.random(), rng.random()]))
}

pub fn save_jpeg(img: &RgbImage, path: &Path, quality: u8) {
    let out = BufWriter::new(File::create(path).unwrap());
    JpegEncoder::new_with_quality(out, quality)
        .encode_image(img)
        .unwrap();
}
