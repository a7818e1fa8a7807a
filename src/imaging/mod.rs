//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Rasterize SVG** | `resvg` (`usvg` parse + `tiny_skia` render) |
//! | **Decode raster** | `image::ImageReader` |
//! | **Resize → PNG** | Lanczos3 + `image` PNG encoder |
//! | **Pack ICO** | `image` fit/crop + `ico::IconDir` |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{Fit, IcoParams, ResizeParams};
pub use rust_backend::RustBackend;
