//! Mathvox - LaTeX-to-speech and braille converter
//!
//! Mathvox turns LaTeX math expressions into spoken or braille text. The
//! speech rules live in per-locale JSON data ("mathmaps") embedded into
//! the binary at build time; at run time an ordered resolution chain
//! decides whether the data comes from an override directory, a directory
//! next to the executable, the development tree, or the embedded assets
//! themselves.

pub mod assets;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod latex;
pub mod mathml;
pub mod pipeline;
pub mod speech;

// Re-exports for convenience
pub use assets::{resolve_data_dir, DataSource, EmbeddedAssets, Extractor, LocaleStore};
pub use cache::{ConversionCache, ConversionKey};
pub use config::{Config, ConfigWarning};
pub use engine::{MathEngine, SpeechEngine, SpeechOptions};
pub use error::{MathvoxError, MathvoxResult};
pub use latex::LatexEngine;
pub use mathml::MathNode;
pub use pipeline::Converter;
pub use speech::RuleSpeechEngine;
