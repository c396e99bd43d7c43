//! Engine capability traits
//!
//! The math engine and speech engine sit behind small traits so concrete
//! implementations are injected once at startup rather than discovered at
//! run time. Conversion flows raw LaTeX → [`MathNode`] tree → speech text.

use crate::error::MathvoxResult;
use crate::mathml::MathNode;

/// Parameters selecting the speech rule set for a run.
///
/// Domain, style and modality are opaque pass-through values: the rule data
/// decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechOptions {
    pub locale: String,
    pub domain: String,
    pub style: String,
    pub modality: String,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            domain: "clearspeak".to_string(),
            style: "default".to_string(),
            modality: "speech".to_string(),
        }
    }
}

/// Converts raw LaTeX text into a math tree.
///
/// Initialized once; `convert` is called per expression.
pub trait MathEngine {
    fn convert(&self, latex: &str) -> MathvoxResult<MathNode>;

    /// Serialize a tree to MathML text (verbose diagnostics).
    fn serialize(&self, node: &MathNode) -> String {
        node.to_mathml()
    }
}

/// Turns a math tree into spoken or braille text.
///
/// `setup` must be called exactly once before the first `to_speech`; the
/// locale data itself is loaded lazily so a missing locale surfaces as a
/// per-expression error rather than aborting a batch.
pub trait SpeechEngine {
    fn setup(&mut self, options: SpeechOptions) -> MathvoxResult<()>;

    fn ready(&self) -> bool;

    fn to_speech(&mut self, node: &MathNode) -> MathvoxResult<String>;
}
