//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP) | `image` crate (pure Rust decoders) |
//! | Decode (SVG) | `resvg`, rendered straight at the target size |
//! | Resize → square PNG | cover fit, `resize_to_fill` with `Lanczos3` |
//! | ICO fit: cover / fill / contain | `resize_to_fill` / `resize_exact` / `resize` + `overlay` |
//! | Encode → PNG | `image` PNG encoder |
//! | Encode → ICO | `ico::IconDir` (PNG-compressed entries) |

use super::backend::{BackendError, ImageBackend};
use super::params::{Fit, IcoParams, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::path::Path;

/// Largest edge an ICO entry can describe.
const MAX_ICO_SIZE: u32 = 256;

/// Pure Rust backend using the `image` and `resvg` crates.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Load and decode a raster image from disk.
fn load_raster(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Parse an SVG file into a render tree.
fn parse_svg(path: &Path) -> Result<usvg::Tree, BackendError> {
    let data = std::fs::read(path).map_err(BackendError::Io)?;
    usvg::Tree::from_data(&data, &usvg::Options::default()).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to parse SVG {}: {}", path.display(), e))
    })
}

/// Rasterize an SVG so its shorter edge is `edge` pixels, keeping its aspect
/// ratio. A later square fit then only has to crop or pad.
fn render_svg(path: &Path, edge: u32) -> Result<DynamicImage, BackendError> {
    let tree = parse_svg(path)?;
    let size = tree.size();
    let scale = edge as f32 / size.width().min(size.height());
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        BackendError::ProcessingFailed(format!("Cannot allocate {width}x{height} canvas"))
    })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha; image expects straight alpha.
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, rgba)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| {
            BackendError::ProcessingFailed("Failed to create image from rendered SVG".into())
        })
}

/// Decode the source, rasterizing vector masters at `edge` pixels.
fn load_source(path: &Path, edge: u32) -> Result<DynamicImage, BackendError> {
    if is_svg(path) {
        render_svg(path, edge)
    } else {
        load_raster(path)
    }
}

/// Fit an image into an exact `size × size` square.
fn fit_square(img: &DynamicImage, size: u32, fit: Fit) -> RgbaImage {
    match fit {
        Fit::Cover => img.resize_to_fill(size, size, FilterType::Lanczos3).to_rgba8(),
        Fit::Fill => img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8(),
        Fit::Contain => {
            let scaled = img.resize(size, size, FilterType::Lanczos3).to_rgba8();
            let mut canvas = RgbaImage::new(size, size);
            let x = (size - scaled.width()) / 2;
            let y = (size - scaled.height()) / 2;
            image::imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
            canvas
        }
    }
}

fn save_png(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    img.save_with_format(path, ImageFormat::Png).map_err(|e| {
        BackendError::ProcessingFailed(format!("PNG encode failed for {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn resize_png(&self, params: &ResizeParams) -> Result<(), BackendError> {
        if params.size == 0 {
            return Err(BackendError::ProcessingFailed(
                "Resize target must be at least 1px".into(),
            ));
        }
        let img = load_source(&params.source, params.size)?;
        let square = fit_square(&img, params.size, Fit::Cover);
        save_png(&DynamicImage::ImageRgba8(square), &params.output)
    }

    fn pack_ico(&self, params: &IcoParams) -> Result<(), BackendError> {
        if let Some(bad) = params
            .sizes
            .iter()
            .find(|&&s| s == 0 || s > MAX_ICO_SIZE)
        {
            return Err(BackendError::ProcessingFailed(format!(
                "ICO entries must be 1-{MAX_ICO_SIZE}px, got {bad}"
            )));
        }

        // Vector sources are rasterized once at the largest entry size.
        let largest = params.sizes.iter().copied().max().unwrap_or(MAX_ICO_SIZE);
        let img = load_source(&params.source, largest)?;

        let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);
        for &size in &params.sizes {
            let fitted = fit_square(&img, size, params.fit);
            let entry = ico::IconImage::from_rgba_data(size, size, fitted.into_raw());
            let encoded = ico::IconDirEntry::encode(&entry).map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "ICO entry {size}px ({} fit) failed: {e}",
                    params.fit.name()
                ))
            })?;
            icon_dir.add_entry(encoded);
        }

        let file = std::fs::File::create(&params.output)?;
        icon_dir.write(std::io::BufWriter::new(file))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{write_test_png, write_test_svg};
    use tempfile::TempDir;

    fn png_dimensions(path: &Path) -> (u32, u32) {
        image::image_dimensions(path).unwrap()
    }

    #[test]
    fn resize_png_source_to_square_png() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        write_test_png(&source, 128, 128);

        let output = tmp.path().join("favicon-32x32.png");
        RustBackend::new()
            .resize_png(&ResizeParams {
                source,
                output: output.clone(),
                size: 32,
            })
            .unwrap();

        assert_eq!(png_dimensions(&output), (32, 32));
    }

    #[test]
    fn resize_crops_wide_source_to_square() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("wide.png");
        write_test_png(&source, 200, 100);

        let output = tmp.path().join("out.png");
        RustBackend::new()
            .resize_png(&ResizeParams {
                source,
                output: output.clone(),
                size: 50,
            })
            .unwrap();

        assert_eq!(png_dimensions(&output), (50, 50));
    }

    #[test]
    fn resize_crops_tall_svg_to_square() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("tall.svg");
        std::fs::write(
            &source,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="100" viewBox="0 0 50 100"><rect width="50" height="100" fill="#00ff00"/></svg>"##,
        )
        .unwrap();

        let output = tmp.path().join("favicon-32x32.png");
        RustBackend::new()
            .resize_png(&ResizeParams {
                source,
                output: output.clone(),
                size: 32,
            })
            .unwrap();

        let img = image::open(&output).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn resize_svg_source_renders_at_target_size() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("logo.svg");
        write_test_svg(&source);

        let output = tmp.path().join("favicon-48x48.png");
        RustBackend::new()
            .resize_png(&ResizeParams {
                source,
                output: output.clone(),
                size: 48,
            })
            .unwrap();

        let img = image::open(&output).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (48, 48));
        // Solid red square in the fixture
        assert_eq!(img.get_pixel(24, 24).0, [255, 0, 0, 255]);
    }

    #[test]
    fn resize_missing_source_errors() {
        let tmp = TempDir::new().unwrap();
        let result = RustBackend::new().resize_png(&ResizeParams {
            source: tmp.path().join("missing.png"),
            output: tmp.path().join("out.png"),
            size: 16,
        });
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn resize_corrupt_source_errors() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("broken.png");
        std::fs::write(&source, b"not an image").unwrap();
        let result = RustBackend::new().resize_png(&ResizeParams {
            source,
            output: tmp.path().join("out.png"),
            size: 16,
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_invalid_svg_errors() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("broken.svg");
        std::fs::write(&source, "<svg").unwrap();
        let result = RustBackend::new().resize_png(&ResizeParams {
            source,
            output: tmp.path().join("out.png"),
            size: 16,
        });
        assert!(result.is_err());
    }

    #[test]
    fn pack_ico_writes_requested_entries() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("favicon-512x512.png");
        write_test_png(&source, 512, 512);

        let output = tmp.path().join("favicon.ico");
        RustBackend::new()
            .pack_ico(&IcoParams {
                source,
                output: output.clone(),
                sizes: vec![64, 32, 24],
                fit: Fit::Cover,
            })
            .unwrap();

        let icon_dir = ico::IconDir::read(std::fs::File::open(&output).unwrap()).unwrap();
        let mut widths: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
        widths.sort_unstable();
        assert_eq!(widths, vec![24, 32, 64]);
    }

    #[test]
    fn pack_ico_from_svg_source() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("logo.svg");
        write_test_svg(&source);

        let output = tmp.path().join("favicon.ico");
        RustBackend::new()
            .pack_ico(&IcoParams {
                source,
                output: output.clone(),
                sizes: vec![32],
                fit: Fit::Cover,
            })
            .unwrap();

        let icon_dir = ico::IconDir::read(std::fs::File::open(&output).unwrap()).unwrap();
        assert_eq!(icon_dir.entries().len(), 1);
    }

    #[test]
    fn pack_ico_rejects_oversized_entries() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("src.png");
        write_test_png(&source, 64, 64);

        let output = tmp.path().join("favicon.ico");
        let result = RustBackend::new().pack_ico(&IcoParams {
            source,
            output: output.clone(),
            sizes: vec![512],
            fit: Fit::Cover,
        });
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(!output.exists());
    }

    #[test]
    fn cover_fills_square_from_wide_source() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            200,
            100,
            image::Rgba([0, 0, 255, 255]),
        ));
        let fitted = fit_square(&img, 64, Fit::Cover);
        assert_eq!(fitted.dimensions(), (64, 64));
        assert_eq!(fitted.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn contain_pads_wide_source_transparently() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            200,
            100,
            image::Rgba([0, 0, 255, 255]),
        ));
        let fitted = fit_square(&img, 64, Fit::Contain);
        assert_eq!(fitted.dimensions(), (64, 64));
        assert_eq!(fitted.get_pixel(0, 0).0[3], 0);
        assert_eq!(fitted.get_pixel(32, 32).0[3], 255);
    }

    #[test]
    fn fill_stretches_to_square() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(10, 40));
        assert_eq!(fit_square(&img, 24, Fit::Fill).dimensions(), (24, 24));
    }
}
