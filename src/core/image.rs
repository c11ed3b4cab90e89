use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// 64-bit perceptual fingerprint of an image.
///
/// Fingerprints are only meaningful relative to each other, through
/// [`Fingerprint::distance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const BITS: u32 = u64::BITS;

    pub fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    /// Hamming distance: the number of bit positions that differ.
    pub fn distance(self, other: Fingerprint) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An image that decoded and hashed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub filename: String,
    pub fingerprint: Fingerprint,
    pub width: u32,
    pub height: u32,
}

impl ImageRecord {
    pub fn new(path: impl Into<PathBuf>, fingerprint: Fingerprint, width: u32, height: u32) -> Self {
        let path = path.into();
        let filename = display_name(&path);
        Self {
            path,
            filename,
            fingerprint,
            width,
            height,
        }
    }

    /// Pixel count, widened so that large images cannot overflow.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_counts_differing_bits() {
        let a = Fingerprint::new(0b1011);
        let b = Fingerprint::new(0b0001);
        assert_eq!(a.distance(b), 2);
        assert_eq!(b.distance(a), 2);
        assert_eq!(a.distance(a), 0);
        assert_eq!(
            Fingerprint::new(0).distance(Fingerprint::new(u64::MAX)),
            Fingerprint::BITS
        );
    }

    #[test]
    fn test_fingerprint_displays_as_fixed_width_hex() {
        assert_eq!(Fingerprint::new(0xab).to_string(), "00000000000000ab");
        let fingerprint = Fingerprint::new(0x0123_4567_89ab_cdef);
        assert_eq!(fingerprint.bits(), 0x0123_4567_89ab_cdef);
        assert_eq!(
            u64::from_str_radix(&fingerprint.to_string(), 16).unwrap(),
            fingerprint.bits()
        );
        assert_eq!(
            serde_json::to_string(&Fingerprint::new(u64::MAX)).unwrap(),
            "\"ffffffffffffffff\""
        );
    }

    #[test]
    fn test_record_derives_filename_and_area() {
        let record = ImageRecord::new("/photos/trip/beach.jpg", Fingerprint::new(1), 800, 600);
        assert_eq!(record.filename, "beach.jpg");
        assert_eq!(record.area(), 480_000);
        assert_eq!(record.dimensions(), (800, 600));
    }

    #[test]
    fn test_area_does_not_overflow() {
        let record = ImageRecord::new("huge.png", Fingerprint::new(0), u32::MAX, 2);
        assert_eq!(record.area(), u64::from(u32::MAX) * 2);
    }
}
