//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the pipeline
//! delegates: render a PNG at a given size and pack an ICO container.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Everything is statically
//! linked into the binary.

use super::params::{IcoParams, ResizeParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// `Sync` because the pipeline fans resize calls out across a rayon pool.
pub trait ImageBackend: Sync {
    /// Render the source `params.size` pixels wide and write it as PNG.
    fn resize_png(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Pack the source into one ICO with an entry per requested size.
    fn pack_ico(&self, params: &IcoParams) -> Result<(), BackendError>;
}
