use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Lowercased extensions treated as image candidates.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    fn unreadable(path: &Path, source: io::Error) -> Self {
        ScanError::DirectoryUnreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// List the image files directly inside `dir`, in directory-listing order.
///
/// Subdirectories are not entered. Failing to list `dir` itself is an
/// error; an unreadable entry inside it is logged and skipped.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(ScanError::unreadable(dir, e.into())),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(ScanError::unreadable(
                    dir,
                    io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
                ));
            }
            continue;
        }

        let path = entry.path();
        if path.is_file() && is_supported_image(path) {
            images.push(path.to_path_buf());
        } else {
            log::debug!("Ignoring {}", path.display());
        }
    }

    Ok(images)
}

/// Whether `path` carries one of [`SUPPORTED_EXTENSIONS`], case-insensitively.
///
/// The extension is whatever follows the last dot of the file name, so a
/// bare dotfile such as `.jpg` counts as a JPEG.
pub fn is_supported_image(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
