//! Static file resolution.
//!
//! # Responsibilities
//! - Decide whether a request path addresses a static asset
//! - Detect direct browser navigation to asset URLs
//! - Map the path onto the static root and read the file
//!
//! # Design Decisions
//! - Every request re-reads disk (no caching)
//! - Unknown extensions and `..` segments are reported as not found
//! - Text assets must be valid UTF-8; binary assets are passed through

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use axum::http::HeaderMap;
use thiserror::Error;

use crate::statics::mime::{self, ContentClass, MimeType};

/// Errors raised while resolving a static asset.
#[derive(Debug, Error)]
pub enum StaticError {
    #[error("unsupported asset extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StaticError {
    /// Whether the error should be reported as 404 rather than 500.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StaticError::UnsupportedExtension(_) | StaticError::NotFound(_))
    }
}

/// A file read from the static root.
#[derive(Debug, Clone)]
pub struct StaticAsset {
    pub path: PathBuf,
    pub mime: MimeType,
    pub body: Vec<u8>,
}

impl StaticAsset {
    pub fn content_type(&self) -> String {
        self.mime.header_value()
    }
}

/// Strip query string and fragment from a URL.
pub fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or_default()
}

/// Whether a request path addresses a static asset (contains a `.`).
pub fn is_asset_path(url: &str) -> bool {
    strip_query(url).contains('.')
}

/// Whether the request is a top-level browser navigation.
///
/// Uses the fetch metadata headers browsers attach to every request.
pub fn is_browser_navigation(headers: &HeaderMap) -> bool {
    let header_is = |name: &str, expected: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
    };
    header_is("sec-fetch-mode", "navigate") || header_is("sec-fetch-dest", "document")
}

/// Reads assets relative to a fixed root directory.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    root: PathBuf,
}

impl StaticResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a request URL (or bare file name) to an asset on disk.
    pub fn resolve(&self, url: &str) -> Result<StaticAsset, StaticError> {
        let path = strip_query(url);

        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime = mime::lookup(extension)
            .ok_or_else(|| StaticError::UnsupportedExtension(extension.to_string()))?;

        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(StaticError::NotFound(path.to_string()));
        }

        let full_path = self.root.join(relative);
        let body = match mime.class {
            ContentClass::Text => fs::read_to_string(&full_path).map(String::into_bytes),
            ContentClass::Binary => fs::read(&full_path),
        };

        match body {
            Ok(body) => Ok(StaticAsset {
                path: full_path,
                mime,
                body,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StaticError::NotFound(path.to_string())),
            Err(source) => Err(StaticError::Io {
                path: full_path,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn resolver_with(files: &[(&str, &[u8])]) -> (tempfile::TempDir, StaticResolver) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        let resolver = StaticResolver::new(dir.path());
        (dir, resolver)
    }

    #[test]
    fn test_asset_path_detection() {
        assert!(is_asset_path("/css/site.css"));
        assert!(is_asset_path("/favicon.png?v=2"));
        assert!(!is_asset_path("/users/42"));
        assert!(!is_asset_path("/search?q=a.b"));
    }

    #[test]
    fn test_browser_navigation() {
        let mut headers = HeaderMap::new();
        assert!(!is_browser_navigation(&headers));

        headers.insert("sec-fetch-mode", HeaderValue::from_static("no-cors"));
        assert!(!is_browser_navigation(&headers));

        headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
        assert!(is_browser_navigation(&headers));

        let mut headers = HeaderMap::new();
        headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
        assert!(is_browser_navigation(&headers));
    }

    #[test]
    fn test_resolve_text_and_binary() {
        let (_dir, resolver) = resolver_with(&[
            ("css/site.css", &b"body{}"[..]),
            ("img/logo.png", &[0x89, b'P', b'N', b'G', 0xff][..]),
        ]);

        let css = resolver.resolve("/css/site.css?v=1").unwrap();
        assert_eq!(css.content_type(), "text/css; charset=utf-8");
        assert_eq!(css.body, b"body{}");

        let png = resolver.resolve("/img/logo.png").unwrap();
        assert_eq!(png.content_type(), "image/png");
        assert_eq!(png.body, vec![0x89, b'P', b'N', b'G', 0xff]);
    }

    #[test]
    fn test_missing_and_unknown() {
        let (_dir, resolver) = resolver_with(&[("data.bin", &b"x"[..])]);

        let err = resolver.resolve("/absent.css").unwrap_err();
        assert!(matches!(err, StaticError::NotFound(_)));
        assert!(err.is_not_found());

        let err = resolver.resolve("/data.bin").unwrap_err();
        assert!(matches!(err, StaticError::UnsupportedExtension(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parent_segments_rejected() {
        let (_dir, resolver) = resolver_with(&[("site.css", &b"x"[..])]);
        let err = resolver.resolve("/../site.css").unwrap_err();
        assert!(matches!(err, StaticError::NotFound(_)));
    }

    #[test]
    fn test_invalid_utf8_text_is_io_error() {
        let (_dir, resolver) = resolver_with(&[("broken.txt", &[0xff, 0xfe][..])]);
        let err = resolver.resolve("/broken.txt").unwrap_err();
        assert!(matches!(err, StaticError::Io { .. }));
        assert!(!err.is_not_found());
    }
}
