//! Favicon asset pipeline.
//!
//! [`FaviconPipeline::render_favicon`] is what the host calls once per page.
//! It decides whether the asset set needs (re)building, builds it if so, and
//! always hands back the `<link>` markup unless the build itself failed.
//!
//! ## Regeneration
//!
//! ```text
//! dev-only gate closed (run_only_dev_mode && production) ──► markup, no file access
//! ensure output dir ── Created ─────────────► build ──► markup
//!                   └─ Existed + production ─► build ──► markup
//!                   └─ Existed + otherwise ──────────────► markup
//! ```
//!
//! Directory presence is the only cache signal: once the output folder exists
//! a development build trusts whatever is in it. The decision lives in
//! [`decide_regeneration`] so a smarter policy can replace it in one place.
//!
//! ## Build
//!
//! ```text
//! <output>/
//! ├── favicon.svg                # verbatim copy of the source
//! ├── favicon-16x16.png          # one per effective size, rendered in parallel
//! ├── ...
//! ├── favicon-512x512.png        # always rendered; the ICO is packed from it
//! └── favicon.ico                # 64, 32 and 24px entries, cover fit
//! ```
//!
//! Resizes run on a rayon pool sized by `max_processes`. Every resize runs to
//! completion; the first failure (in size order) then aborts the build without
//! removing the PNGs already written.
//!
//! ## Failure policy
//!
//! Nothing escapes [`FaviconPipeline::render_favicon`]. A missing source or a
//! missing 512px PNG returns `None` quietly; any other error is logged and
//! also yields `None`. Manifest failures are logged by the manifest module and
//! never affect the returned markup.

use crate::config::{self, FaviconConfig, REQUIRED_SIZE};
use crate::files::{self, DirState, FsError};
use crate::imaging::{BackendError, Fit, IcoParams, ImageBackend, ResizeParams, RustBackend};
use crate::manifest;
use crate::markup::{self, png_file_name};
use crate::output;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Entry sizes packed into the ICO.
pub const ICO_SIZES: [u32; 3] = [64, 32, 24];

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Build mode reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    /// Map a `NODE_ENV`-style value: only `"production"` means production.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Read `NODE_ENV` from the process environment.
    pub fn from_process() -> Self {
        Self::from_node_env(std::env::var("NODE_ENV").ok().as_deref())
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Outcome of [`decide_regeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regeneration {
    Build,
    Skip,
}

/// Whether this build may touch the file system at all.
pub fn generation_enabled(config: &FaviconConfig, environment: Environment) -> bool {
    !(config.run_only_dev_mode && environment.is_production())
}

/// Build when the output folder was just created or the build is production.
pub fn decide_regeneration(environment: Environment, dir: DirState) -> Regeneration {
    if dir == DirState::Created || environment.is_production() {
        Regeneration::Build
    } else {
        Regeneration::Skip
    }
}

/// What a build attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Every asset was written; carries the effective sizes rendered.
    Built(Vec<u32>),
    /// The source image does not exist.
    SourceMissing,
    /// The resizes reported success but no 512px PNG is on disk.
    MissingIcoSource,
}

/// Generates favicon assets for one site build.
///
/// Cheap to call repeatedly: after the first call in a development build the
/// output folder exists and later calls only render markup.
pub struct FaviconPipeline {
    config: FaviconConfig,
    output_root: PathBuf,
    environment: Environment,
    pool: rayon::ThreadPool,
}

impl FaviconPipeline {
    pub fn new(
        config: FaviconConfig,
        output_root: impl Into<PathBuf>,
        environment: Environment,
    ) -> Result<Self, PipelineError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config::effective_threads(config.max_processes))
            .build()?;
        Ok(Self {
            config,
            output_root: output_root.into(),
            environment,
            pool,
        })
    }

    pub fn config(&self) -> &FaviconConfig {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Folder the images are written to, always inside the output root.
    pub fn output_dir(&self) -> PathBuf {
        self.output_root
            .join(self.config.output_folder.trim_start_matches('/'))
    }

    /// Render the favicon markup, building assets first when needed.
    ///
    /// Returns `None` when the build was attempted and failed.
    pub fn render_favicon(&self, source: &Path) -> Option<String> {
        self.render_favicon_with_backend(&RustBackend::new(), source)
    }

    /// Same as [`render_favicon`](Self::render_favicon) with a specific
    /// backend (allows testing with a mock).
    pub fn render_favicon_with_backend(
        &self,
        backend: &impl ImageBackend,
        source: &Path,
    ) -> Option<String> {
        if !generation_enabled(&self.config, self.environment) {
            output::info("favicon compilation is required only in dev mode");
            return Some(markup::render_links(&self.config));
        }

        match self.refresh(backend, source) {
            Ok(true) => Some(markup::render_links(&self.config)),
            Ok(false) => None,
            Err(e) => {
                output::error(&e.to_string());
                None
            }
        }
    }

    /// Ensure the output folder and rebuild if the policy says so.
    /// `Ok(false)` means a build precondition failed.
    fn refresh(&self, backend: &impl ImageBackend, source: &Path) -> Result<bool, PipelineError> {
        let output_dir = self.output_dir();
        let dir_state = files::ensure_dir(&output_dir)?;

        match decide_regeneration(self.environment, dir_state) {
            Regeneration::Skip => Ok(true),
            Regeneration::Build => Ok(matches!(
                self.build_assets(backend, source)?,
                BuildOutcome::Built(_)
            )),
        }
    }

    /// Write the full asset set into the output folder, unconditionally.
    ///
    /// The output folder must already exist.
    pub fn build_assets(
        &self,
        backend: &impl ImageBackend,
        source: &Path,
    ) -> Result<BuildOutcome, PipelineError> {
        if !files::is_file(source)? {
            return Ok(BuildOutcome::SourceMissing);
        }

        output::info("starting favicons creation...");

        let output_dir = self.output_dir();
        let prefix = &self.config.prefix_name;
        files::copy_file(source, &output_dir.join(format!("{prefix}.svg")))?;

        let sizes = self.config.effective_sizes();
        self.render_pngs(backend, source, &output_dir, &sizes)?;

        let png_512 = output_dir.join(png_file_name(prefix, REQUIRED_SIZE));
        if !files::is_file(&png_512)? {
            return Ok(BuildOutcome::MissingIcoSource);
        }

        let ico = IcoParams {
            source: png_512,
            output: output_dir.join(format!("{prefix}.ico")),
            sizes: ICO_SIZES.to_vec(),
            fit: Fit::Cover,
        };
        output::info(&format!("packing {prefix}.ico ({} fit)", ico.fit.name()));
        backend.pack_ico(&ico)?;

        if self.config.manifest_generate {
            manifest::emit_manifest(&self.config, &self.output_root, &sizes);
        }

        Ok(BuildOutcome::Built(sizes))
    }

    /// Resize every size in parallel and wait for all of them.
    fn render_pngs(
        &self,
        backend: &impl ImageBackend,
        source: &Path,
        output_dir: &Path,
        sizes: &[u32],
    ) -> Result<(), BackendError> {
        let prefix = &self.config.prefix_name;
        let results: Vec<Result<(), BackendError>> = self.pool.install(|| {
            sizes
                .par_iter()
                .map(|&size| {
                    backend.resize_png(&ResizeParams {
                        source: source.to_path_buf(),
                        output: output_dir.join(png_file_name(prefix, size)),
                        size,
                    })
                })
                .collect()
        });
        results.into_iter().collect()
    }
}
