//! Shared test utilities for the favicon-factory test suite.
//!
//! Provides synthetic source images and a snapshot of a directory tree so
//! tests can assert "nothing was written" without mocking the file system.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let source = tmp.path().join("logo.svg");
//! write_test_svg(&source);
//!
//! let before = snapshot(tmp.path());
//! // ... run something that should be a no-op ...
//! assert_eq!(snapshot(tmp.path()), before);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A 100×100 SVG that is a solid red square.
pub const TEST_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
  <rect x="0" y="0" width="100" height="100" fill="#ff0000"/>
</svg>
"##;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write the solid red test SVG to `path`.
pub fn write_test_svg(path: &Path) {
    std::fs::write(path, TEST_SVG).unwrap();
}

/// Write a gradient PNG of the given dimensions to `path`.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Directory snapshots
// =========================================================================

/// Every file under `root` with its size and modification time.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, (u64, SystemTime)> {
    let mut files = BTreeMap::new();
    collect(root, &mut files);
    files
}

fn collect(dir: &Path, files: &mut BTreeMap<PathBuf, (u64, SystemTime)>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(&path, files);
        } else {
            let meta = std::fs::metadata(&path).unwrap();
            files.insert(path, (meta.len(), meta.modified().unwrap()));
        }
    }
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
