//! Plugin registration with the host site generator.
//!
//! The host hands over its output root and build mode, and accepts named
//! shortcodes: callables taking one string argument (here, the source image
//! path) and returning markup to embed, or `None`.
//!
//! ```rust,ignore
//! let overrides: toml::Value = toml::from_str(r#"prefix_name = "icon""#)?;
//! favicon_factory::host::register(&mut my_host, Some(overrides));
//! // templates can now call the `favicon` shortcode
//! ```

use crate::config;
use crate::output;
use crate::pipeline::{Environment, FaviconPipeline};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name the pipeline is registered under.
pub const SHORTCODE_NAME: &str = "favicon";

/// A registered template helper.
pub type Shortcode = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// What the plugin needs from the host build system.
pub trait ShortcodeHost {
    /// Root directory of the build output.
    fn output_dir(&self) -> &Path;

    fn environment(&self) -> Environment;

    fn add_shortcode(&mut self, name: &str, shortcode: Shortcode);
}

/// Resolve configuration and register the `favicon` shortcode.
///
/// Returns `false` (after logging) when the configuration is invalid; the
/// host build carries on without the shortcode.
pub fn register(host: &mut impl ShortcodeHost, overrides: Option<toml::Value>) -> bool {
    let config = match config::resolve_config(overrides) {
        Ok(config) => config,
        Err(e) => {
            output::error(&e.to_string());
            return false;
        }
    };

    let pipeline = match FaviconPipeline::new(
        config,
        host.output_dir().to_path_buf(),
        host.environment(),
    ) {
        Ok(pipeline) => Arc::new(pipeline),
        Err(e) => {
            output::error(&e.to_string());
            return false;
        }
    };

    host.add_shortcode(
        SHORTCODE_NAME,
        Box::new(move |source: &str| pipeline.render_favicon(Path::new(source))),
    );
    true
}

/// Minimal in-process host: keeps shortcodes in a map and calls them by name.
///
/// Useful for build scripts that drive the pipeline without a full site
/// generator, and for tests.
pub struct LocalHost {
    output_dir: PathBuf,
    environment: Environment,
    shortcodes: std::collections::HashMap<String, Shortcode>,
}

impl LocalHost {
    pub fn new(output_dir: impl Into<PathBuf>, environment: Environment) -> Self {
        Self {
            output_dir: output_dir.into(),
            environment,
            shortcodes: std::collections::HashMap::new(),
        }
    }

    /// Invoke a registered shortcode. `None` if the name is unknown or the
    /// shortcode itself returned nothing.
    pub fn call(&self, name: &str, argument: &str) -> Option<String> {
        self.shortcodes.get(name).and_then(|f| f(argument))
    }

    pub fn has_shortcode(&self, name: &str) -> bool {
        self.shortcodes.contains_key(name)
    }
}

impl ShortcodeHost for LocalHost {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn environment(&self) -> Environment {
        self.environment
    }

    fn add_shortcode(&mut self, name: &str, shortcode: Shortcode) {
        self.shortcodes.insert(name.to_string(), shortcode);
    }
}
