//! Image reference resolution
//!
//! Turns the raw `src` values found on a page into download tasks: each
//! reference is joined against the page URL (RFC 3986) and the last path
//! segment becomes the local file name.

use crate::storage::OutputLayout;
use std::path::PathBuf;
use url::Url;

/// A resolved image ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    /// Absolute URL of the image
    pub source_url: Url,

    /// Where the image is written; its file name is never empty
    pub destination: PathBuf,
}

/// Resolves an image reference against the page URL
///
/// Absolute references pass through, scheme-relative, path-relative and
/// query-only references are joined against `base`.
///
/// The result is a parsed `Url`, so absolute references come back in
/// canonical form: scheme and host are lowercased, default ports and dot
/// segments removed. A reference already in that form is returned unchanged.
///
/// # Returns
///
/// `None` when the reference cannot be parsed or does not resolve to an
/// http(s) URL (`data:`, `javascript:`, ...).
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    let absolute = base.join(reference).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}

/// Derives the local file name from an absolute URL
///
/// Returns the final `/`-delimited segment of the path, ignoring query and
/// fragment. An empty string means the path has no final segment (`/`, or a
/// trailing slash) and the image must be skipped.
///
/// The segment keeps its percent-encoding (`my%20photo.png`), so a decoded
/// `/` or `..` can never reach the filesystem.
pub fn derive_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}

/// Builds download tasks for every usable reference, in order
///
/// References that fail to resolve or derive an empty file name are dropped.
pub fn build_image_tasks<S>(base: &Url, refs: &[S], layout: &OutputLayout) -> Vec<ImageTask>
where
    S: AsRef<str>,
{
    refs.iter()
        .filter_map(|reference| {
            let reference = reference.as_ref();
            let Some(source_url) = resolve(base, reference) else {
                tracing::debug!("Skipping unresolvable image reference {:?}", reference);
                return None;
            };

            let file_name = derive_filename(&source_url);
            if file_name.is_empty() {
                tracing::debug!("Skipping image {} with no file name", source_url);
                return None;
            }

            Some(ImageTask {
                destination: layout.image_path(&file_name),
                source_url,
            })
        })
        .collect()
}
