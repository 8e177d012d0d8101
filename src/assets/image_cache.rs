use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::assets::decode::{DecodedImage, decode_image, is_data_uri, parse_data_uri};
use crate::foundation::error::{FramecutError, FramecutResult};

/// Asynchronous url → raster decode capability.
///
/// Hosts with network access plug their own implementation; [`UrlImageLoader`] covers `data:`
/// URIs and files.
pub trait ImageLoader {
    /// Fetch and decode the image referenced by `url`.
    fn load(&self, url: &str) -> impl Future<Output = FramecutResult<DecodedImage>>;
}

/// Default loader: `data:` URIs, `file://` urls and paths relative to an assets root.
#[derive(Clone, Debug, Default)]
pub struct UrlImageLoader {
    assets_root: Option<PathBuf>,
}

impl UrlImageLoader {
    /// Loader that resolves relative paths under `root`.
    pub fn with_assets_root(root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: Some(root.into()),
        }
    }

    fn load_sync(&self, url: &str) -> FramecutResult<DecodedImage> {
        if is_data_uri(url) {
            let uri = parse_data_uri(url)?;
            if !uri.mime.starts_with("image/") {
                return Err(FramecutError::decode(format!(
                    "data: uri has non-image media type '{}'",
                    uri.mime
                )));
            }
            return decode_image(&uri.bytes);
        }

        let lower = url.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Err(FramecutError::decode(
                "remote image urls need a host-provided ImageLoader",
            ));
        }

        let path = match url.strip_prefix("file://") {
            Some(abs) => PathBuf::from(abs),
            None => {
                let root = self.assets_root.as_deref().ok_or_else(|| {
                    FramecutError::validation("relative image path without an assets root")
                })?;
                root.join(Path::new(&normalize_rel_path(url)?))
            }
        };
        let bytes = std::fs::read(&path).map_err(|e| {
            FramecutError::decode(format!("failed to read image '{}': {e}", path.display()))
        })?;
        decode_image(&bytes)
    }
}

impl ImageLoader for UrlImageLoader {
    async fn load(&self, url: &str) -> FramecutResult<DecodedImage> {
        self.load_sync(url)
    }
}

/// Normalize and validate a relative asset path.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> FramecutResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(FramecutError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(FramecutError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(FramecutError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(FramecutError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[derive(Clone, Debug)]
enum CacheEntry {
    Ready(DecodedImage),
    Failed(String),
}

/// Counters from one [`ImageCache::resolve_all`] batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Urls already present (decoded or known-bad).
    pub hits: usize,
    /// Urls decoded during this batch.
    pub loaded: usize,
    /// Urls whose load failed during this batch.
    pub failed: usize,
}

/// Url → decoded image cache, owned by the host and injected into each render.
///
/// Entries live until removed; failed loads are remembered so a broken url is not re-fetched on
/// every repaint. Use [`ImageCache::forget`] to retry one.
#[derive(Clone, Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, CacheEntry>,
}

impl ImageCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded image for `url`, if it loaded successfully.
    pub fn get(&self, url: &str) -> Option<&DecodedImage> {
        match self.entries.get(url)? {
            CacheEntry::Ready(img) => Some(img),
            CacheEntry::Failed(_) => None,
        }
    }

    /// Load failure message recorded for `url`.
    pub fn failure(&self, url: &str) -> Option<&str> {
        match self.entries.get(url)? {
            CacheEntry::Ready(_) => None,
            CacheEntry::Failed(msg) => Some(msg),
        }
    }

    /// Return `true` when `url` has an entry (decoded or failed).
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Insert an already-decoded image, e.g. one the host decoded itself.
    pub fn insert(&mut self, url: impl Into<String>, image: DecodedImage) {
        self.entries.insert(url.into(), CacheEntry::Ready(image));
    }

    /// Drop the entry for `url` so the next resolve retries it.
    pub fn forget(&mut self, url: &str) -> bool {
        self.entries.remove(url).is_some()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries (decoded or failed).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Make sure every url has an entry, awaiting the loader for the missing ones.
    ///
    /// Duplicate urls are loaded once. A failed load is recorded and logged, never returned.
    pub async fn resolve_all<'a, L, I>(&mut self, urls: I, loader: &L) -> ResolveStats
    where
        L: ImageLoader + ?Sized,
        I: IntoIterator<Item = &'a str>,
    {
        let mut stats = ResolveStats::default();
        for url in urls {
            if self.contains(url) {
                stats.hits += 1;
                continue;
            }
            match loader.load(url).await {
                Ok(img) => {
                    tracing::debug!(
                        url = %display_url(url),
                        width = img.width,
                        height = img.height,
                        "decoded image"
                    );
                    self.entries.insert(url.to_owned(), CacheEntry::Ready(img));
                    stats.loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(url = %display_url(url), error = %e, "image load failed");
                    self.entries
                        .insert(url.to_owned(), CacheEntry::Failed(e.to_string()));
                    stats.failed += 1;
                }
            }
        }
        stats
    }
}

/// Shorten `data:` URIs for log output.
pub(crate) fn display_url(url: &str) -> String {
    const MAX: usize = 48;
    if url.len() <= MAX {
        return url.to_owned();
    }
    let mut cut = MAX;
    while !url.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…({} bytes)", &url[..cut], url.len())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image_cache.rs"]
mod tests;
