//! Path handling for the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, so every local path the user
//! configures is rewritten into that mount before the worker reads it.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Where the configured catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// `http://` or `https://` URL fetched through Zellij's `web_request`.
    Remote(String),
    /// File under the `/host` mount, read on the worker thread.
    Local(PathBuf),
}

impl SourceLocation {
    /// Whether loading needs the `WebAccess` permission and an HTTP request.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Human-readable form for the header and log fields.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::Local(path) => strip_host(&path.to_string_lossy()),
        }
    }
}

/// Returns the plugin's data directory, `/host/.local/share/zellij/zcatalog`.
///
/// `/host` points to the cwd of the last focused terminal, or to the folder
/// Zellij was started from.
///
/// # Examples
///
/// ```
/// use zcatalog::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zcatalog"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("zcatalog")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use zcatalog::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/catalog.json"), "/host/catalog.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/abs/db.json"), "/abs/db.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Classifies a configured source and maps local paths into the sandbox.
///
/// Relative and absolute paths both land under `/host`; a path already inside
/// the mount is kept as-is.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use zcatalog::infrastructure::{resolve_source, SourceLocation};
///
/// assert_eq!(
///     resolve_source("https://api.example.com/products"),
///     SourceLocation::Remote("https://api.example.com/products".into())
/// );
/// assert_eq!(resolve_source("db.json"), SourceLocation::Local(PathBuf::from("/host/db.json")));
/// assert_eq!(
///     resolve_source("file:///srv/db.json"),
///     SourceLocation::Local(PathBuf::from("/host/srv/db.json"))
/// );
/// ```
#[must_use]
pub fn resolve_source(raw: &str) -> SourceLocation {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return SourceLocation::Remote(raw.to_string());
    }

    let path = raw.strip_prefix("file://").unwrap_or(raw);
    let expanded = expand_tilde(path);
    if expanded == HOST_ROOT || expanded.starts_with("/host/") {
        return SourceLocation::Local(PathBuf::from(expanded));
    }

    let relative = expanded.trim_start_matches("./").trim_start_matches('/');
    SourceLocation::Local(PathBuf::from(HOST_ROOT).join(relative))
}

fn strip_host(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_urls_are_remote() {
        assert!(resolve_source("http://localhost:3000/db.json").is_remote());
        assert!(resolve_source("HTTPS://shop.example/api").is_remote());
    }

    #[test]
    fn tilde_and_relative_paths_land_under_host() {
        assert_eq!(
            resolve_source("~/data/db.json"),
            SourceLocation::Local(PathBuf::from("/host/data/db.json"))
        );
        assert_eq!(
            resolve_source("./db.json"),
            SourceLocation::Local(PathBuf::from("/host/db.json"))
        );
    }

    #[test]
    fn host_paths_are_not_double_prefixed() {
        assert_eq!(
            resolve_source("/host/db.json"),
            SourceLocation::Local(PathBuf::from("/host/db.json"))
        );
    }

    #[test]
    fn labels_hide_the_sandbox_mount() {
        assert_eq!(resolve_source("db.json").label(), "~/db.json");
        assert_eq!(resolve_source("https://x/y").label(), "https://x/y");
        assert_eq!(strip_host("/hostile/db.json"), "/hostile/db.json");
    }
}
