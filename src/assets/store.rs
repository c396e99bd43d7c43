//! Locale data loading and memoization
//!
//! One data source is chosen for the whole process: a resolved filesystem
//! directory when the locator found one, direct embedded reads otherwise.
//! Loaded JSON text is cached per locale; negative lookups are cached too,
//! so a batch full of requests for a missing locale fails cheaply.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use super::AssetSource;
use crate::error::{MathvoxError, MathvoxResult};

/// Where locale JSON comes from for this process.
pub enum DataSource<S: AssetSource> {
    /// A directory of `<locale>.json` files
    Dir(PathBuf),
    /// Loader-style reads straight from the embedded map
    Embedded(S),
}

impl<S: AssetSource> DataSource<S> {
    /// Short label for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Dir(path) => format!("directory {}", path.display()),
            DataSource::Embedded(_) => "embedded assets".to_string(),
        }
    }
}

/// Per-locale memoized loads over the chosen data source.
pub struct LocaleStore<S: AssetSource> {
    source: DataSource<S>,
    cache: HashMap<String, Option<String>>,
}

impl<S: AssetSource> LocaleStore<S> {
    pub fn new(source: DataSource<S>) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    pub fn source(&self) -> &DataSource<S> {
        &self.source
    }

    /// JSON text for a locale, loading it on first request.
    ///
    /// Both hits and misses are memoized for the life of the process.
    pub fn load(&mut self, locale: &str) -> MathvoxResult<String> {
        if let Some(cached) = self.cache.get(locale) {
            return match cached {
                Some(text) => Ok(text.clone()),
                None => Err(MathvoxError::LocaleNotFound {
                    locale: locale.to_string(),
                }),
            };
        }

        let fetched = self.fetch(locale)?;
        self.cache.insert(locale.to_string(), fetched.clone());
        fetched.ok_or_else(|| MathvoxError::LocaleNotFound {
            locale: locale.to_string(),
        })
    }

    fn fetch(&self, locale: &str) -> MathvoxResult<Option<String>> {
        let file_name = format!("{locale}.json");
        match &self.source {
            DataSource::Dir(dir) => match fs::read_to_string(dir.join(&file_name)) {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(MathvoxError::Io(e)),
            },
            DataSource::Embedded(source) => Ok(source.read(&file_name).map(|c| c.into_owned())),
        }
    }
}
