//! Embedded locale data
//!
//! The mathmaps JSON files are baked into the binary at compile time via
//! `include_str!`, so a release build needs no data files on disk.

use std::borrow::Cow;

use super::AssetSource;

/// Locale IDs bundled with the binary.
pub const EMBEDDED_LOCALES: &[&str] = &["base", "de", "en", "fr"];

/// The asset map compiled into this build.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn read(&self, name: &str) -> Option<Cow<'static, str>> {
        let text = match name {
            "manifest.json" => include_str!("../../assets/mathmaps/manifest.json"),
            "base.json" => include_str!("../../assets/mathmaps/base.json"),
            "de.json" => include_str!("../../assets/mathmaps/de.json"),
            "en.json" => include_str!("../../assets/mathmaps/en.json"),
            "fr.json" => include_str!("../../assets/mathmaps/fr.json"),
            _ => return None,
        };
        Some(Cow::Borrowed(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Manifest;

    #[test]
    fn test_embedded_assets_available() {
        assert!(EmbeddedAssets.available());
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert!(EmbeddedAssets.read("xx.json").is_none());
        assert!(EmbeddedAssets.read("../en.json").is_none());
    }

    #[test]
    fn test_manifest_lists_only_embedded_files() {
        // Invariant: every name in the manifest resolves against the map.
        let manifest = Manifest::from_source(&EmbeddedAssets).unwrap();
        assert!(!manifest.files.is_empty());
        for name in &manifest.files {
            assert!(
                EmbeddedAssets.read(name).is_some(),
                "manifest lists '{name}' but it is not embedded"
            );
        }
    }

    #[test]
    fn test_every_locale_has_an_asset() {
        for locale in EMBEDDED_LOCALES {
            let name = format!("{locale}.json");
            assert!(EmbeddedAssets.read(&name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_embedded_data_is_valid_json() {
        let manifest = Manifest::from_source(&EmbeddedAssets).unwrap();
        for name in &manifest.files {
            let text = EmbeddedAssets.read(name).unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&text)
                .unwrap_or_else(|e| panic!("{name} is not valid JSON: {e}"));
            assert!(parsed.is_object(), "{name} should be a JSON object");
        }
    }
}
