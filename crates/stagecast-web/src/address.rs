//! Content address resolution.
//!
//! Maps a local file path to a navigable content address. PDF documents
//! are routed through the internal `pdf://` scheme so the host's own PDF
//! renderer picks them up; everything else goes through a shortcut
//! resolver and its address is used verbatim.

use std::path::Path;

use stagecast_common::ResolveError;

/// Scheme prefix for locally rendered PDF documents.
pub const PDF_SCHEME: &str = "pdf://";

/// Resolves a non-PDF file path to a navigable address.
///
/// The resulting address is used verbatim; a bad address surfaces later
/// through the browser engine's own load-error signal.
pub trait ShortcutResolver: Send {
    fn resolve(&self, path: &Path) -> String;
}

/// Default resolver: plain `file://` URLs.
pub struct FileUrlResolver;

impl ShortcutResolver for FileUrlResolver {
    fn resolve(&self, path: &Path) -> String {
        format!("file://{}", path.display())
    }
}

/// Pure path-to-address mapping. No side effects.
pub struct ContentAddressResolver {
    shortcuts: Box<dyn ShortcutResolver>,
}

impl ContentAddressResolver {
    pub fn new(shortcuts: Box<dyn ShortcutResolver>) -> Self {
        Self { shortcuts }
    }

    /// Resolve a local file path to a content address.
    ///
    /// `.pdf` extensions (any case) map to `pdf://<path>` verbatim. Empty
    /// paths are rejected; callers are expected to no-op on that rather
    /// than surface it.
    pub fn resolve(&self, path: &Path) -> Result<String, ResolveError> {
        if path.as_os_str().is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            Ok(format!("{PDF_SCHEME}{}", path.display()))
        } else {
            Ok(self.shortcuts.resolve(path))
        }
    }
}

impl Default for ContentAddressResolver {
    fn default() -> Self {
        Self::new(Box::new(FileUrlResolver))
    }
}
