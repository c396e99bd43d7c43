//! Embedded-asset resolution and extraction
//!
//! Speech rules ship as JSON files ("mathmaps"), one per locale plus a
//! shared base ruleset. A build embeds them into the binary; at run time
//! this module decides where the data actually comes from:
//!
//! 1. an explicit override directory (config or `MATHVOX_MATHMAPS_DIR`),
//! 2. a `mathmaps/` directory next to the running executable,
//! 3. the development tree (`assets/mathmaps` under the crate root),
//! 4. the embedded assets themselves, read directly or extracted to a
//!    temporary directory on demand.

pub mod embedded;
pub mod extractor;
pub mod locator;
pub mod store;

pub use embedded::EmbeddedAssets;
pub use extractor::Extractor;
pub use locator::{resolve_data_dir, ResolvedDir};
pub use store::{DataSource, LocaleStore};

use std::borrow::Cow;

use serde::Deserialize;

use crate::error::{MathvoxError, MathvoxResult};

/// Name of the build-time manifest listing every embedded locale file
pub const MANIFEST_FILE: &str = "manifest.json";

/// Read access to the asset blobs carried by a build.
///
/// The real implementation is [`EmbeddedAssets`]; tests substitute maps to
/// simulate partial or absent asset sets.
pub trait AssetSource {
    /// Raw JSON text for a named asset, if present.
    fn read(&self, name: &str) -> Option<Cow<'static, str>>;

    /// Whether this build carries embedded assets at all.
    fn available(&self) -> bool {
        self.read(MANIFEST_FILE).is_some()
    }
}

/// Build-time list of embedded locale files.
///
/// Format: `{ "files": [ "<filename>.json", ... ] }`. Every listed name is
/// expected to resolve against the embedded map; names that do not are
/// skipped at extraction time with a warning.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub files: Vec<String>,
}

impl Manifest {
    /// Read and parse the manifest from an asset source.
    pub fn from_source<S: AssetSource>(source: &S) -> MathvoxResult<Self> {
        let text = source.read(MANIFEST_FILE).ok_or_else(|| MathvoxError::Extraction {
            message: format!("embedded manifest '{MANIFEST_FILE}' is missing"),
        })?;
        serde_json::from_str(&text).map_err(|e| MathvoxError::Extraction {
            message: format!("embedded manifest is malformed: {e}"),
        })
    }
}

/// In-memory asset source for tests.
#[cfg(test)]
pub(crate) mod testutil {
    use std::borrow::Cow;
    use std::collections::HashMap;

    use super::AssetSource;

    #[derive(Default)]
    pub struct MockAssets {
        pub files: HashMap<String, String>,
    }

    impl MockAssets {
        pub fn with(entries: &[(&str, &str)]) -> Self {
            Self {
                files: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        }
    }

    impl AssetSource for MockAssets {
        fn read(&self, name: &str) -> Option<Cow<'static, str>> {
            self.files.get(name).cloned().map(Cow::Owned)
        }
    }
}
