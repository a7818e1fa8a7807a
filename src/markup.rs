//! Public paths and the `<link>` markup returned to page templates.
//!
//! Everything here is pure: the markup is derived from configuration alone
//! and never looks at the file system. The size-gated tags check the
//! *configured* size list, not the effective set the pipeline renders, so a
//! run that skipped generation still emits the same markup.
//!
//! ## Output
//!
//! With the default configuration the snippet starts like this (tabs shown
//! as `→`):
//!
//! ```text
//! <link rel="shortcut icon" href="/favicon/favicon.ico" type="image/x-icon">
//! →→<link rel="icon" href="/favicon/favicon.svg" type="image/svg+xml">
//! →→<link rel="icon" type="image/png" sizes="32x32" href="/favicon/favicon-32x32.png">
//! ...
//! →→<link rel="manifest" href="/manifest.json">
//! ```
//!
//! The first line is flush because templates embed the snippet inline.
//!
//! Tags are built with [maud](https://maud.lambda.xyz/), so every interpolated
//! path is attribute-escaped.

use crate::config::{FaviconConfig, REQUIRED_SIZE};
use maud::{Markup, html};

/// Apple touch-icon sizes that get their own sized tag, ascending.
pub const APPLE_TOUCH_SIZES: [u32; 8] = [57, 72, 76, 114, 120, 144, 152, 180];

/// Base URL path for generated images.
///
/// An explicit `img_path_href` wins verbatim; otherwise `/` + `output_folder`
/// with its leading slashes stripped.
pub fn public_base_path(config: &FaviconConfig) -> String {
    if config.img_path_href.is_empty() {
        format!("/{}", config.output_folder.trim_start_matches('/'))
    } else {
        config.img_path_href.clone()
    }
}

/// Join a base path and a file name with exactly one slash.
pub fn asset_href(base: &str, file_name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file_name)
}

/// File name of the PNG rendered at `size`.
pub fn png_file_name(prefix: &str, size: u32) -> String {
    format!("{prefix}-{size}x{size}.png")
}

/// Manifest path relative to the build output root, e.g. `pwa/manifest.json`.
pub fn manifest_relative_path(config: &FaviconConfig) -> String {
    let file_name = format!("{}.json", config.manifest_name);
    let folder = config.manifest_output_folder.trim_matches('/');
    if folder.is_empty() {
        file_name
    } else {
        format!("{folder}/{file_name}")
    }
}

/// Root-relative URL of the manifest.
pub fn manifest_href(config: &FaviconConfig) -> String {
    format!("/{}", manifest_relative_path(config))
}

fn png_icon(href: &str, size: u32) -> Markup {
    let sizes = format!("{size}x{size}");
    html! { link rel="icon" type="image/png" sizes=(sizes) href=(href); }
}

fn link_tags(config: &FaviconConfig) -> Vec<Markup> {
    let base = public_base_path(config);
    let prefix = &config.prefix_name;
    let png = |size: u32| asset_href(&base, &png_file_name(prefix, size));

    let ico = asset_href(&base, &format!("{prefix}.ico"));
    let svg = asset_href(&base, &format!("{prefix}.svg"));
    let mut tags = vec![
        html! { link rel="shortcut icon" href=(ico) type="image/x-icon"; },
        html! { link rel="icon" href=(svg) type="image/svg+xml"; },
    ];

    for size in [32, 16] {
        if config.configures(size) {
            tags.push(png_icon(&png(size), size));
        }
    }

    if config.configures(REQUIRED_SIZE) {
        let href = png(REQUIRED_SIZE);
        tags.push(html! { link rel="apple-touch-icon" href=(href); });
    }

    for size in APPLE_TOUCH_SIZES {
        if config.configures(size) {
            let sizes = format!("{size}x{size}");
            let href = png(size);
            tags.push(html! { link rel="apple-touch-icon" sizes=(sizes) href=(href); });
        }
    }

    if config.manifest_generate {
        let href = manifest_href(config);
        tags.push(html! { link rel="manifest" href=(href); });
    }

    tags
}

/// Render the favicon `<link>` snippet.
///
/// Lines are joined with `\n`; every line after the first is prefixed with
/// `tab_indent` tab characters.
pub fn render_links(config: &FaviconConfig) -> String {
    let indent = "\t".repeat(config.tab_indent);
    link_tags(config)
        .into_iter()
        .enumerate()
        .map(|(idx, tag)| {
            if idx == 0 {
                tag.into_string()
            } else {
                format!("{indent}{}", tag.into_string())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
