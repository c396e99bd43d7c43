//! Conversion pipeline
//!
//! Wires the math engine, the speech engine and the result cache into one
//! per-expression entry point: raw LaTeX → math tree → speech text, with
//! identical repeat requests served from the cache.

use crate::cache::{ConversionCache, ConversionKey};
use crate::engine::{MathEngine, SpeechEngine, SpeechOptions};
use crate::error::MathvoxResult;

/// One configured conversion run.
pub struct Converter<M: MathEngine, S: SpeechEngine> {
    math: M,
    speech: S,
    options: SpeechOptions,
    cache: ConversionCache,
}

impl<M: MathEngine, S: SpeechEngine> Converter<M, S> {
    /// Set up both engines for a run. The speech engine's `setup` runs
    /// here, once, before any conversion request.
    pub fn new(
        math: M,
        mut speech: S,
        options: SpeechOptions,
        cache_enabled: bool,
    ) -> MathvoxResult<Self> {
        speech.setup(options.clone())?;
        Ok(Self {
            math,
            speech,
            options,
            cache: ConversionCache::new(cache_enabled),
        })
    }

    pub fn options(&self) -> &SpeechOptions {
        &self.options
    }

    pub fn cache(&self) -> &ConversionCache {
        &self.cache
    }

    /// Convert one expression, consulting the cache first.
    pub fn convert(&mut self, expression: &str) -> MathvoxResult<String> {
        let key = ConversionKey::new(expression, &self.options);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let tree = self.math.convert(expression)?;
        let speech = self.speech.to_speech(&tree)?;
        self.cache.put(key, speech.clone());
        Ok(speech)
    }

    /// MathML text for an expression (verbose diagnostics; uncached).
    pub fn to_mathml(&self, expression: &str) -> MathvoxResult<String> {
        let tree = self.math.convert(expression)?;
        Ok(self.math.serialize(&tree))
    }
}
