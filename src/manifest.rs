//! Web-app manifest emission.
//!
//! Builds the manifest from configuration and the sizes rendered in this run,
//! then writes it as pretty-printed JSON. Only 192, 256 and 512 are listed as
//! icons since those are the sizes install prompts use.
//!
//! ```json
//! {
//!   "name": "MyApp",
//!   "short_name": "MyApp but short",
//!   "description": "Progressive Web App",
//!   "start_url": "/",
//!   "display": "standalone",
//!   "background_color": "#ffffff",
//!   "theme_color": "#000000",
//!   "icons": [
//!     { "src": "/favicon/favicon-512x512.png", "sizes": "512x512", "type": "image/png" }
//!   ]
//! }
//! ```
//!
//! A failed write never reaches the caller of [`emit_manifest`]; it is logged
//! and the favicon markup is still produced.

use crate::config::FaviconConfig;
use crate::files::{self, FsError};
use crate::markup::{asset_href, manifest_relative_path, png_file_name, public_base_path};
use crate::output;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Icon sizes listed in the manifest.
pub const MANIFEST_ICON_SIZES: [u32; 3] = [192, 256, 512];

const PNG_MIME: &str = "image/png";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<IconDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconDescriptor {
    pub src: String,
    /// `"WxH"`, e.g. `"192x192"`.
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Build the manifest document for the sizes rendered in this run.
///
/// Icons keep the relative order of `sizes`.
pub fn build_manifest(config: &FaviconConfig, sizes: &[u32]) -> WebManifest {
    let base = public_base_path(config);
    let icons = sizes
        .iter()
        .filter(|size| MANIFEST_ICON_SIZES.contains(size))
        .map(|&size| IconDescriptor {
            src: asset_href(&base, &png_file_name(&config.prefix_name, size)),
            sizes: format!("{size}x{size}"),
            mime_type: PNG_MIME.to_string(),
        })
        .collect();

    let data = &config.manifest_data;
    WebManifest {
        name: data.name.clone(),
        short_name: data.short_name.clone(),
        description: data.description.clone(),
        start_url: data.start_url.clone(),
        display: data.display.clone(),
        background_color: data.background_color.clone(),
        theme_color: data.theme_color.clone(),
        icons,
    }
}

/// Where the manifest lands under the build output root.
pub fn manifest_path(config: &FaviconConfig, output_root: &Path) -> PathBuf {
    output_root.join(manifest_relative_path(config))
}

/// Write the manifest, replacing any previous file. Returns the written path.
pub fn write_manifest(
    config: &FaviconConfig,
    output_root: &Path,
    sizes: &[u32],
) -> Result<PathBuf, ManifestError> {
    let path = manifest_path(config, output_root);
    if let Some(parent) = path.parent() {
        files::ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(&build_manifest(config, sizes))?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Write the manifest and log the outcome. Never fails.
pub fn emit_manifest(config: &FaviconConfig, output_root: &Path, sizes: &[u32]) {
    let file_name = format!("{}.json", config.manifest_name);
    match write_manifest(config, output_root, sizes) {
        Ok(_) => output::info(&format!("{file_name} created successfully")),
        Err(e) => output::error(&format!("error while creating {file_name}: {e}")),
    }
}
