//! # Favicon Factory
//!
//! A build-time plugin for static site generators: one source image in, a
//! complete favicon set out, plus the `<link>` markup that references it.
//!
//! # What Gets Built
//!
//! ```text
//! dist/
//! ├── manifest.json              # optional web-app manifest (192/256/512 icons)
//! └── favicon/
//!     ├── favicon.svg            # verbatim copy of the source
//!     ├── favicon-16x16.png      # one PNG per configured size, plus 512
//!     ├── ...
//!     ├── favicon-512x512.png
//!     └── favicon.ico            # 64/32/24px, packed from the 512px PNG
//! ```
//!
//! The host registers the plugin once per build ([`host::register`]) and calls
//! the `favicon` shortcode from its templates, as often as it likes. The first
//! call in a development build creates the folder and renders the assets;
//! later calls see the folder and only return markup.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | Registration with the host: `ShortcodeHost` trait, `register`, `LocalHost` |
//! | [`pipeline`] | Regeneration decision and asset build; the single error boundary |
//! | [`manifest`] | Web-app manifest document and its JSON file |
//! | [`markup`] | Public paths and the `<link>` snippet (Maud) |
//! | [`files`] | Idempotent file-system primitives with logged outcomes |
//! | [`imaging`] | Pure-Rust resize → PNG and ICO packing behind `ImageBackend` |
//! | [`config`] | Plugin configuration: defaults, shallow merge, validation |
//! | [`output`] | Icon-prefixed diagnostic lines on stderr |
//!
//! # Design Decisions
//!
//! ## Directory Presence as the Cache
//!
//! There is no content hashing. If the output folder exists, a development
//! build assumes it is complete. Delete the folder (or build for production
//! with `run_only_dev_mode = false`) to regenerate. The decision is a single
//! pure function, [`pipeline::decide_regeneration`].
//!
//! ## Never Break the Host Build
//!
//! Favicon generation is a nicety. Every failure is logged and degrades to
//! `None` from the shortcode; nothing panics or propagates into the host.
//!
//! ## Markup Trusts Configuration
//!
//! The size-gated `<link>` tags follow the configured size list even when
//! generation was skipped, so production builds reusing assets from an
//! earlier development build render identical markup.
//!
//! ## Pure-Rust Imaging
//!
//! SVG masters are rasterized with `resvg`, raster sources decoded with
//! `image`, ICOs written with `ico`. No ImageMagick, no system libraries.

pub mod config;
pub mod files;
pub mod host;
pub mod imaging;
pub mod manifest;
pub mod markup;
pub mod output;
pub mod pipeline;

pub use config::FaviconConfig;
pub use pipeline::{Environment, FaviconPipeline};

#[cfg(test)]
pub(crate) mod test_helpers;
