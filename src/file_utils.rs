use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::TransportError;

// @module: File and resource location utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    /// Read a file to string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Turn a caption resource reference into a URL.
    ///
    /// Absolute URLs pass through untouched. Anything else is a filesystem path,
    /// taken relative to `base_dir` unless already absolute, and becomes a
    /// file:// URL.
    pub fn resolve_resource<P: AsRef<Path>>(resource: &str, base_dir: P) -> Result<Url, TransportError> {
        let resource = resource.trim();
        if resource.is_empty() {
            return Err(TransportError::InvalidUrl("empty resource".to_string()));
        }

        // Single-letter schemes are Windows drive letters, not URLs
        if let Ok(url) = Url::parse(resource) {
            if url.scheme().len() > 1 {
                return Ok(url);
            }
        }

        let path = PathBuf::from(resource);
        let path = if path.is_absolute() {
            path
        } else {
            base_dir.as_ref().join(path)
        };

        Url::from_file_path(&path).map_err(|_| TransportError::InvalidUrl(path.display().to_string()))
    }

    /// Resolve a resource against the current working directory
    pub fn resolve_from_cwd(resource: &str) -> Result<Url, TransportError> {
        let cwd = std::env::current_dir()?;
        Self::resolve_resource(resource, cwd)
    }
}
