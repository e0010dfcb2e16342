//! Image resolution: turning a caller-supplied reference string into
//! decoded pixels, with bounded caching.

use crate::cache::BoundedCache;
use crate::constants::{CACHE_CAPACITY, HTTP_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::image_utils::image_io::{decode_bytes_as_rgb8, read_image_as_rgb8};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Strips surrounding whitespace and quote characters from a reference.
///
/// References arrive from a UI text field or a database column and are
/// frequently stored quote-wrapped; both single and double quotes occur.
pub fn normalize_reference(reference: &str) -> String {
    reference
        .trim()
        .trim_matches('\'')
        .trim_matches('"')
        .trim()
        .to_string()
}

/// Fetches and decodes images from URLs or filesystem paths.
///
/// Resolution never fails loudly: an unreachable, missing, or undecodable
/// reference resolves to `None` after a logged warning. Successful
/// resolutions are memoized in a bounded LRU keyed by the normalized
/// reference.
pub struct ImageResolver {
    asset_root: PathBuf,
    http: reqwest::blocking::Client,
    cache: BoundedCache<String, RgbImage>,
}

impl ImageResolver {
    /// Builds a resolver rooted at `asset_root` for relative path
    /// references, with an image cache of `capacity` entries.
    pub fn new(asset_root: impl Into<PathBuf>, capacity: usize) -> Result<Self> {
        // The imagery provider terminates TLS with certificates the
        // deployment environment does not trust; verification stays off to
        // match the system this feeds.
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            asset_root: asset_root.into(),
            http,
            cache: BoundedCache::new(capacity),
        })
    }

    /// Builds a resolver with the default cache capacity.
    pub fn with_defaults(asset_root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(asset_root, CACHE_CAPACITY)
    }

    /// Resolves a reference to decoded RGB pixels, or `None` if anything
    /// along the way fails.
    pub fn resolve(&self, reference: &str) -> Option<RgbImage> {
        let key = normalize_reference(reference);
        if key.is_empty() {
            return None;
        }
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }
        info!(reference = %key, "resolving image");
        match self.fetch(&key) {
            Ok(img) => {
                self.cache.put(key, img.clone());
                Some(img)
            }
            Err(e) => {
                warn!(reference = %key, error = %e, "image resolution failed");
                None
            }
        }
    }

    /// Drops the cached pixels for one reference.
    pub fn invalidate(&self, reference: &str) {
        self.cache.invalidate(&normalize_reference(reference));
    }

    fn fetch(&self, key: &str) -> Result<RgbImage> {
        if key.starts_with("http") {
            let response = self.http.get(key).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::FetchStatus {
                    url: key.to_string(),
                    status: status.as_u16(),
                });
            }
            return decode_bytes_as_rgb8(&response.bytes()?);
        }
        let path = Path::new(key);
        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        };
        read_image_as_rgb8(&full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn normalization_trims_quotes_and_whitespace() {
        assert_eq!(normalize_reference("  'scene_0700.png'  "), "scene_0700.png");
        assert_eq!(
            normalize_reference("\"https://host/img.png\""),
            "https://host/img.png"
        );
        assert_eq!(normalize_reference("plain.png"), "plain.png");
        assert_eq!(normalize_reference("   "), "");
    }

    #[test]
    fn missing_file_resolves_to_none() {
        let resolver = ImageResolver::with_defaults("/nonexistent").unwrap();
        assert!(resolver.resolve("no_such_image.png").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn resolves_relative_path_under_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]));
        img.save(dir.path().join("site.png")).unwrap();

        let resolver = ImageResolver::with_defaults(dir.path()).unwrap();
        let resolved = resolver.resolve("'site.png'").unwrap();
        assert_eq!(resolved.dimensions(), (4, 4));
        assert_eq!(resolved.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn cache_survives_file_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let path = dir.path().join("gone.png");
        img.save(&path).unwrap();

        let resolver = ImageResolver::with_defaults(dir.path()).unwrap();
        assert!(resolver.resolve("gone.png").is_some());
        std::fs::remove_file(&path).unwrap();
        // Warm cache answers without touching the filesystem.
        assert!(resolver.resolve("gone.png").is_some());
        resolver.invalidate("gone.png");
        assert!(resolver.resolve("gone.png").is_none());
    }
}
