//! Configuration module for Mathvox
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (MATHVOX_*)
//! 3. Explicit config file (`--config`)
//! 4. User config (`~/.config/mathvox/config.toml`)
//! 5. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MathvoxError, MathvoxResult};

/// Speech parameter defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default = "default_style")]
    pub style: String,

    #[serde(default = "default_modality")]
    pub modality: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            domain: default_domain(),
            style: default_style(),
            modality: default_modality(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_domain() -> String {
    "clearspeak".to_string()
}

fn default_style() -> String {
    "default".to_string()
}

fn default_modality() -> String {
    "speech".to_string()
}

/// Locale data location
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Override directory; takes precedence over every other resolution
    /// strategy when set.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Conversion cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> MathvoxResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys).
    pub fn load_with_warnings(path: &Path) -> MathvoxResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| MathvoxError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load from an explicit file, the user config, or defaults.
    ///
    /// A missing or unparsable explicit file is fatal; an optional user
    /// config that fails to parse falls back to defaults.
    pub fn load_or_default(
        explicit: Option<&Path>,
    ) -> MathvoxResult<(Self, Vec<ConfigWarning>)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(MathvoxError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let (config, warnings) = Self::load_with_warnings(path)?;
            return Ok((config.with_env_overrides(), warnings));
        }

        if let Some(user_config) = user_config_path() {
            if user_config.is_file() {
                if let Ok((config, warnings)) = Self::load_with_warnings(&user_config) {
                    return Ok((config.with_env_overrides(), warnings));
                }
            }
        }

        Ok((Self::default().with_env_overrides(), Vec::new()))
    }

    /// Apply environment variable overrides (MATHVOX_* prefix)
    pub fn with_env_overrides(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::with_env_overrides`], with an injectable lookup.
    pub fn with_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = var("MATHVOX_MATHMAPS_DIR") {
            if !dir.is_empty() {
                self.data.dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(locale) = var("MATHVOX_LOCALE") {
            if !locale.is_empty() {
                self.speech.locale = locale;
            }
        }

        if let Some(val) = var("MATHVOX_CACHE") {
            self.cache.enabled = val.to_lowercase() != "false" && val != "0";
        }

        self
    }

    /// Validate settings that must hold before engines start.
    ///
    /// An override directory that is set but unusable is a configuration
    /// error, not a silent fallthrough to the next strategy.
    pub fn validated(self) -> MathvoxResult<Self> {
        if let Some(dir) = &self.data.dir {
            if !dir.is_dir() {
                return Err(MathvoxError::Config {
                    message: format!("mathmaps override is not a directory: {}", dir.display()),
                });
            }
        }
        Ok(self)
    }
}

/// Per-user config file location
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mathvox").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "speech", "locale", "domain", "style", "modality", "data", "dir", "cache", "enabled",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.speech.locale, "en");
        assert_eq!(config.speech.domain, "clearspeak");
        assert_eq!(config.speech.style, "default");
        assert_eq!(config.speech.modality, "speech");
        assert!(config.cache.enabled);
        assert!(config.data.dir.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
[speech]
locale = "de"
domain = "mathspeak"

[cache]
enabled = false

[data]
dir = "/opt/mathmaps"
"#,
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.speech.locale, "de");
        assert_eq!(config.speech.domain, "mathspeak");
        assert_eq!(config.speech.style, "default");
        assert!(!config.cache.enabled);
        assert_eq!(config.data.dir, Some(PathBuf::from("/opt/mathmaps")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let (_dir, path) = write_config("[speech\nlocale = ");
        assert!(matches!(
            Config::load(&path),
            Err(MathvoxError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_unknown_key_warning_with_suggestion() {
        let (_dir, path) = write_config("[speech]\nlocal = \"de\"\n");
        let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "local");
        assert_eq!(warnings[0].line, Some(2));
        assert_eq!(warnings[0].suggestion, Some("locale".to_string()));
    }

    #[test]
    fn test_unknown_key_without_close_match() {
        let (_dir, path) = write_config("totally_unrelated = 1\n");
        let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_env_from(|key| match key {
            "MATHVOX_MATHMAPS_DIR" => Some("/data/maps".to_string()),
            "MATHVOX_LOCALE" => Some("fr".to_string()),
            "MATHVOX_CACHE" => Some("false".to_string()),
            _ => None,
        });
        assert_eq!(config.data.dir, Some(PathBuf::from("/data/maps")));
        assert_eq!(config.speech.locale, "fr");
        assert!(!config.cache.enabled);
    }

    #[test]
    fn test_env_empty_values_ignored() {
        let config = Config::default().with_env_from(|key| match key {
            "MATHVOX_MATHMAPS_DIR" | "MATHVOX_LOCALE" => Some(String::new()),
            _ => None,
        });
        assert!(config.data.dir.is_none());
        assert_eq!(config.speech.locale, "en");
    }

    #[test]
    fn test_explicit_missing_file_is_fatal() {
        let err = Config::load_or_default(Some(Path::new("/no/such/file.toml"))).unwrap_err();
        assert!(matches!(err, MathvoxError::Config { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_validated_rejects_bad_override_dir() {
        let mut config = Config::default();
        config.data.dir = Some(PathBuf::from("/no/such/dir"));
        assert!(matches!(
            config.validated(),
            Err(MathvoxError::Config { .. })
        ));
    }

    #[test]
    fn test_validated_accepts_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data.dir = Some(dir.path().to_path_buf());
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("locale", "locale"), 0);
        assert_eq!(levenshtein("local", "locale"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }
}
