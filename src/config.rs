//! Plugin configuration.
//!
//! Resolved once when the plugin is registered: user overrides are
//! shallow-merged onto the stock defaults, so any top-level key the user
//! sets replaces the default wholesale and everything else is kept.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_folder = "favicon"          # relative to the build output root
//! prefix_name = "favicon"            # file-name prefix for generated assets
//! img_path_href = ""                 # public URL prefix; empty = "/" + output_folder
//! manifest_generate = true
//! manifest_name = "manifest"         # written as <name>.json
//! manifest_output_folder = ""        # relative to the build output root
//! size_list = [16, 32, 48, 57, 72, 76, 96, 114, 120, 144, 152, 180, 192, 256, 512]
//! run_only_dev_mode = true           # skip generation in production builds
//! tab_indent = 2                     # tabs before every markup line but the first
//! # max_processes = 4                # resize workers (omit for auto = CPU cores)
//!
//! [manifest_data]
//! name = "MyApp"
//! short_name = "MyApp but short"
//! description = "Progressive Web App"
//! start_url = "/"
//! display = "standalone"
//! background_color = "#ffffff"
//! theme_color = "#000000"
//! ```
//!
//! Unknown keys are ignored.

use crate::output;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File looked up by [`load_config`].
pub const CONFIG_FILENAME: &str = "favicon.toml";

/// Size the ICO is packed from; always part of the effective size set.
pub const REQUIRED_SIZE: u32 = 512;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Favicon plugin configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconConfig {
    /// Folder for generated images, relative to the build output root.
    pub output_folder: String,
    /// File-name prefix for every generated asset.
    pub prefix_name: String,
    /// Public URL prefix for the assets. Empty means `/` + `output_folder`.
    pub img_path_href: String,
    /// Write a web-app manifest and link it from the markup.
    pub manifest_generate: bool,
    /// Manifest file name without the `.json` extension.
    pub manifest_name: String,
    /// Folder for the manifest, relative to the build output root.
    pub manifest_output_folder: String,
    pub manifest_data: ManifestData,
    /// Pixel sizes to render as square PNGs. A value that is not a list of
    /// positive integers reads as an empty list.
    #[serde(deserialize_with = "lenient_size_list")]
    pub size_list: Vec<u32>,
    /// Only generate assets outside production builds.
    pub run_only_dev_mode: bool,
    /// Tabs prepended to every markup line except the first.
    pub tab_indent: usize,
    /// Maximum parallel resize workers. `None` uses every core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            output_folder: "favicon".to_string(),
            prefix_name: "favicon".to_string(),
            img_path_href: String::new(),
            manifest_generate: true,
            manifest_name: "manifest".to_string(),
            manifest_output_folder: String::new(),
            manifest_data: ManifestData::default(),
            size_list: vec![
                16,  // legacy address bar
                32,  // address bar, windows 10 minimum
                48,  // windows desktop
                57,  // iphone, ios 6 and below
                72,  // ipad, ios 6 and below
                76,  // ipad, ios 7+
                96,  // android chrome shortcut
                114, // iphone retina, ios 6 and below
                120, // iphone retina, ios 7+
                144, // android, windows tiles
                152, // ipad retina, ios 7+
                180, // iphone retina hd
                192, // android, pwa
                256, // windows/chrome desktop
                512, // android 8.0+, pwa
            ],
            run_only_dev_mode: true,
            tab_indent: 2,
            max_processes: None,
        }
    }
}

/// Content of the web-app manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestData {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
}

impl Default for ManifestData {
    fn default() -> Self {
        Self {
            name: "MyApp".to_string(),
            short_name: "MyApp but short".to_string(),
            description: "Progressive Web App".to_string(),
            start_url: "/".to_string(),
            display: "standalone".to_string(),
            background_color: "#ffffff".to_string(),
            theme_color: "#000000".to_string(),
        }
    }
}

impl FaviconConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Sizes actually rendered: configured sizes plus 512, deduplicated in
    /// first-occurrence order.
    pub fn effective_sizes(&self) -> Vec<u32> {
        let mut sizes = Vec::with_capacity(self.size_list.len() + 1);
        for &size in self.size_list.iter().chain(std::iter::once(&REQUIRED_SIZE)) {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
        sizes
    }

    /// Whether `size` was asked for in the configured list.
    pub fn configures(&self, size: u32) -> bool {
        self.size_list.contains(&size)
    }
}

/// Accept `size_list` only as an array of positive integers; anything else
/// becomes an empty list so generation still renders the 512px icon.
fn lenient_size_list<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSizes {
        Sizes(Vec<i64>),
        Other(serde::de::IgnoredAny),
    }

    let sizes = match RawSizes::deserialize(deserializer)? {
        RawSizes::Sizes(sizes) => sizes
            .iter()
            .map(|&s| u32::try_from(s).ok().filter(|&s| s > 0))
            .collect::<Option<Vec<u32>>>(),
        RawSizes::Other(_) => None,
    };
    Ok(sizes.unwrap_or_else(|| {
        output::error("invalid size_list, only the 512px icon will be generated");
        Vec::new()
    }))
}

/// Resolve the worker count for the resize fan-out.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(max_processes: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(FaviconConfig::default())?)
}

/// Merge `overlay` on top of `base`, one level deep.
///
/// Top-level overlay keys replace base keys outright, nested tables included;
/// keys missing from the overlay keep their base value. A non-table overlay
/// is ignored.
pub fn merge_shallow(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                base_table.insert(key, value);
            }
            toml::Value::Table(base_table)
        }
        (base, _) => base,
    }
}

/// Load `favicon.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no config file exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge optional overrides onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<FaviconConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_shallow(base, ov),
        None => base,
    };
    let config: FaviconConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `favicon.toml` in the given directory, falling back to
/// stock defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<FaviconConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}
