//! Asset URL resolution.
//!
//! Image fields hold either an absolute URL or a storage-relative path.

use thiserror::Error;

/// Shown wherever a product or background has no usable image
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

/// An image failed to load in the live preview. Never shown to the owner.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to load asset {url}")]
pub struct AssetLoadError {
    pub url: String,
}

pub trait AssetResolver: Send + Sync {
    fn resolve(&self, path: &str) -> String;
}

/// Joins relative paths onto a base URL, passes absolute URLs through
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseUrlResolver {
    base_url: String,
}

impl BaseUrlResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

pub fn is_absolute_url(path: &str) -> bool {
    let lower = path.trim_start().to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
}

impl AssetResolver for BaseUrlResolver {
    fn resolve(&self, path: &str) -> String {
        let path = path.trim();
        if path.is_empty() {
            return String::new();
        }
        if is_absolute_url(path) || self.base_url.is_empty() {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution() {
        let resolver = BaseUrlResolver::new("https://cdn.example.com/storage/");
        assert_eq!(
            resolver.resolve("products/mug.jpg"),
            "https://cdn.example.com/storage/products/mug.jpg"
        );
        assert_eq!(
            resolver.resolve("/products/mug.jpg"),
            "https://cdn.example.com/storage/products/mug.jpg"
        );
        assert_eq!(resolver.resolve("https://img.example/x.png"), "https://img.example/x.png");
        assert_eq!(resolver.resolve("  "), "");
    }

    #[test]
    fn test_no_base_passes_paths_through() {
        let resolver = BaseUrlResolver::default();
        assert_eq!(resolver.resolve("products/mug.jpg"), "products/mug.jpg");
    }
}
