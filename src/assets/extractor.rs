//! Lazy extraction of embedded assets to a temporary directory
//!
//! A consumer that needs a real filesystem path (rather than loader-style
//! reads) asks the extractor to materialize the embedded mathmaps. The
//! extraction runs at most once per process; the resulting directory is
//! never deleted by this subsystem and is left to OS temp cleanup.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::{AssetSource, Manifest};
use crate::error::{MathvoxError, MathvoxResult};

/// One-shot extractor over an asset source.
pub struct Extractor<S: AssetSource> {
    source: S,
    resolved: OnceLock<PathBuf>,
}

impl<S: AssetSource> Extractor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            resolved: OnceLock::new(),
        }
    }

    /// Path of the extraction directory, if one was already produced.
    pub fn extracted_path(&self) -> Option<PathBuf> {
        self.resolved.get().cloned()
    }

    /// Materialize every manifest-listed file into a fresh temp directory.
    ///
    /// Idempotent: the first successful call records the directory, later
    /// calls return it without touching the filesystem. Files listed in the
    /// manifest but unreadable from the source are skipped with a warning;
    /// partial extraction is tolerated so the remaining locales stay
    /// usable.
    pub fn ensure_extracted(&self) -> MathvoxResult<PathBuf> {
        if let Some(path) = self.resolved.get() {
            return Ok(path.clone());
        }

        if !self.source.available() {
            return Err(MathvoxError::Extraction {
                message: "this build carries no embedded assets".to_string(),
            });
        }

        let manifest = Manifest::from_source(&self.source)?;

        let dir = tempfile::Builder::new()
            .prefix("mathvox-mathmaps-")
            .tempdir()
            .map_err(|e| MathvoxError::Extraction {
                message: format!("no writable temp location: {e}"),
            })?
            .keep();

        for name in &manifest.files {
            match self.source.read(name) {
                Some(content) => {
                    fs::write(dir.join(name), content.as_bytes()).map_err(|e| {
                        MathvoxError::Extraction {
                            message: format!("cannot write '{name}': {e}"),
                        }
                    })?;
                }
                None => {
                    eprintln!("⚠ embedded asset '{name}' listed in manifest but unreadable, skipping");
                }
            }
        }

        Ok(self.resolved.get_or_init(|| dir).clone())
    }
}
