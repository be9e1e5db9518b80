//! Page fragments and the shared header shell.
//!
//! This module loads HTML fragments from the pages directory at startup and
//! serves them from memory, keyed by page name. `header.html` is the shared
//! shell every page is composed into; fragments under `auth/` are keyed with
//! their subdirectory prefix (`auth/login`). Lookups are map hits only, so a
//! request can never reach the filesystem with a caller-supplied path.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;


/// Fallback shell used when `header.html` is missing.
///
/// A missing shared asset must never take every page down; this bare document
/// keeps the site serving (and the header widget loading) until the real
/// shell is restored.
const DEFAULT_SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>XS Platform</title>
    <link rel="stylesheet" href="/static/css/header.css">
</head>
<body>
    <main class="main-content">{{content}}</main>
    <script src="/static/js/header.js" defer></script>
</body>
</html>
"#;

/// Page store that holds the shell and all fragments in memory.
#[derive(Debug, Clone)]
pub struct PageStore {
    shell: Arc<String>,
    pages: Arc<HashMap<String, String>>,
}

impl PageStore {
    /// Load the shell and every fragment from the filesystem.
    ///
    /// A missing directory or shell degrades (warn + default) rather than
    /// failing startup; an unreadable directory listing is a hard error.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Io` if a present directory cannot be listed.
    pub fn load(pages_dir: &Path) -> Result<Self, PageError> {
        let shell = Self::load_shell(pages_dir);

        let mut pages = Self::load_fragments(pages_dir, "")?;
        pages.extend(Self::load_fragments(&pages_dir.join("auth"), "auth/")?);

        tracing::info!("Loaded {} page fragments", pages.len());

        Ok(Self {
            shell: Arc::new(shell),
            pages: Arc::new(pages),
        })
    }

    /// Read `header.html`, falling back to the built-in shell.
    fn load_shell(dir: &Path) -> String {
        let path = dir.join("header.html");
        match std::fs::read_to_string(&path) {
            Ok(shell) => shell,
            Err(e) => {
                tracing::warn!("Header shell not readable at {:?} ({}); using default", path, e);
                DEFAULT_SHELL.to_owned()
            }
        }
    }

    /// Load all `*.html` fragments directly inside `dir`, keyed as `{prefix}{stem}`.
    fn load_fragments(dir: &Path, prefix: &str) -> Result<HashMap<String, String>, PageError> {
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(pages);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| PageError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "html") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::error!("Skipping fragment with non-UTF-8 name: {:?}", path);
                continue;
            };
            // The shell is not a page; it never resolves from a URL.
            if prefix.is_empty() && stem == "header" {
                continue;
            }

            match std::fs::read_to_string(&path) {
                Ok(fragment) => {
                    let name = format!("{prefix}{stem}");
                    tracing::info!("Loaded page fragment: {name}");
                    pages.insert(name, fragment);
                }
                Err(e) => {
                    tracing::error!("Failed to read fragment {:?}: {}", path, e);
                }
            }
        }

        Ok(pages)
    }

    /// Get a page fragment by name. `None` means the page does not exist.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }

    /// The shared header shell.
    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Whether a page name exists in the namespace.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }
}

/// Page loading errors.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("IO error: {0}")]
    Io(String),
}
