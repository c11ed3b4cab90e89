use crate::core::image::{Fingerprint, ImageRecord};
use image::{DynamicImage, ImageReader};
use image_hasher::{HashAlg, Hasher, HasherConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Side length of the low-frequency DCT block kept for the fingerprint.
const HASH_SIDE: u32 = 8;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("hash computation failed for {}: {message}", .path.display())]
    Hash { path: PathBuf, message: String },
}

/// DCT-based perceptual hasher (pHash).
///
/// The image is reduced to luminance, run through a discrete cosine
/// transform, and the top-left 8x8 block of coefficients is thresholded
/// against its median. Each set bit marks a coefficient above the median.
pub struct PerceptualHasher {
    hasher: Hasher,
}

impl PerceptualHasher {
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_size(HASH_SIDE, HASH_SIDE)
            .hash_alg(HashAlg::Median)
            .preproc_dct()
            .to_hasher();
        Self { hasher }
    }

    /// Open, decode and fingerprint a single file.
    pub fn fingerprint_file(&self, path: &Path) -> Result<ImageRecord, HashError> {
        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| HashError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let img = reader.decode().map_err(|source| HashError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        self.fingerprint_image(path, &img)
    }

    /// Fingerprint an already decoded image, recording it under `path`.
    pub fn fingerprint_image(
        &self,
        path: &Path,
        img: &DynamicImage,
    ) -> Result<ImageRecord, HashError> {
        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(HashError::Hash {
                path: path.to_path_buf(),
                message: format!("image has no pixels ({}x{})", width, height),
            });
        }

        let hash = self.hasher.hash_image(img);
        let bytes: [u8; 8] = hash.as_bytes().try_into().map_err(|_| HashError::Hash {
            path: path.to_path_buf(),
            message: format!("expected a 64-bit hash, got {} bytes", hash.as_bytes().len()),
        })?;

        Ok(ImageRecord::new(
            path,
            Fingerprint::new(u64::from_be_bytes(bytes)),
            width,
            height,
        ))
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new()
    }
}
