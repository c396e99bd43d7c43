//! Conversion result memoization
//!
//! Keyed by the full parameter tuple with exact string equality per field;
//! no normalization, no eviction. Fine for a process-lifetime CLI, not
//! meant to back a long-running service.

use std::collections::HashMap;

use crate::engine::SpeechOptions;

/// Composite cache key: expression plus every speech parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionKey {
    pub expression: String,
    pub locale: String,
    pub domain: String,
    pub style: String,
    pub modality: String,
}

impl ConversionKey {
    pub fn new(expression: &str, options: &SpeechOptions) -> Self {
        Self {
            expression: expression.to_string(),
            locale: options.locale.clone(),
            domain: options.domain.clone(),
            style: options.style.clone(),
            modality: options.modality.clone(),
        }
    }
}

/// Unbounded speech-output cache with a kill switch.
///
/// When disabled, `get` always misses and `put` is a no-op, so callers
/// need no branching of their own.
pub struct ConversionCache {
    enabled: bool,
    entries: HashMap<ConversionKey, String>,
    hits: u64,
    misses: u64,
}

impl ConversionCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn get(&mut self, key: &ConversionKey) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, key: ConversionKey, value: String) {
        if self.enabled {
            self.entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
