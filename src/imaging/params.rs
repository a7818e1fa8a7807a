//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline (which decides which files to write) and
//! the [`backend`](super::backend) (which does the pixel work), so tests can
//! swap in a recording mock without touching pipeline logic.
//!
//! ## Types
//!
//! - [`Fit`] — How a source is scaled into an exact square target.
//! - [`ResizeParams`] — Source, output path, and edge length for one square PNG.
//! - [`IcoParams`] — Source, output path, entry sizes, and fit for one ICO.

use std::path::PathBuf;

/// How a source image is fitted into an exact `N×N` target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    /// Scale to fill the target, then center-crop the overflow.
    #[default]
    Cover,
    /// Scale to fit inside the target, padding the rest transparently.
    Contain,
    /// Stretch to the target, ignoring aspect ratio.
    Fill,
}

impl Fit {
    pub fn name(self) -> &'static str {
        match self {
            Fit::Cover => "cover",
            Fit::Contain => "contain",
            Fit::Fill => "fill",
        }
    }
}

/// Render one `size × size` PNG. Non-square sources are center-cropped (cover).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub size: u32,
}

/// Pack one source into a multi-entry ICO, one square entry per size.
#[derive(Debug, Clone, PartialEq)]
pub struct IcoParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub fit: Fit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fit_is_cover() {
        assert_eq!(Fit::default(), Fit::Cover);
        assert_eq!(Fit::default().name(), "cover");
    }

    #[test]
    fn fit_names() {
        assert_eq!(Fit::Contain.name(), "contain");
        assert_eq!(Fit::Fill.name(), "fill");
    }
}
