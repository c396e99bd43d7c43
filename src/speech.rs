//! Rule-driven speech engine
//!
//! All phrasing lives in the locale JSON: symbol word maps plus a handful
//! of structure templates (`msup`, `mfrac`, ...). Domain, style and
//! modality select override layers inside the same file, falling back to
//! the locale's top level and then to the shared `base` ruleset, so the
//! engine itself knows nothing about any particular language.

use std::collections::HashMap;

use serde::Deserialize;

use crate::assets::{AssetSource, LocaleStore};
use crate::engine::{SpeechEngine, SpeechOptions};
use crate::error::{MathvoxError, MathvoxResult};
use crate::mathml::MathNode;

/// Locale the shared fallback ruleset lives under
const BASE_LOCALE: &str = "base";

/// One layer of rules: word map plus structure templates.
#[derive(Debug, Clone, Default, Deserialize)]
struct RuleSection {
    #[serde(default)]
    symbols: HashMap<String, String>,
    #[serde(default)]
    templates: HashMap<String, String>,
}

/// Per-domain overrides, optionally refined per style.
#[derive(Debug, Clone, Default, Deserialize)]
struct DomainSection {
    #[serde(flatten)]
    rules: RuleSection,
    #[serde(default)]
    styles: HashMap<String, RuleSection>,
}

/// Parsed content of one `<locale>.json` file.
///
/// The `locale` field in the data is informational and ignored here.
#[derive(Debug, Clone, Deserialize)]
struct LocaleData {
    #[serde(flatten)]
    rules: RuleSection,
    #[serde(default)]
    domains: HashMap<String, DomainSection>,
    #[serde(default)]
    modalities: HashMap<String, RuleSection>,
}

/// Rule layers for one (locale, domain, style, modality) selection,
/// highest precedence first.
struct RuleSet {
    layers: Vec<RuleSection>,
}

impl RuleSet {
    fn build(locale: LocaleData, base: Option<LocaleData>, options: &SpeechOptions) -> Self {
        let mut layers = Vec::new();
        let mut push_locale = |data: LocaleData| {
            let LocaleData {
                rules,
                mut domains,
                mut modalities,
                ..
            } = data;
            if let Some(modality) = modalities.remove(&options.modality) {
                layers.push(modality);
            }
            if let Some(mut domain) = domains.remove(&options.domain) {
                if let Some(style) = domain.styles.remove(&options.style) {
                    layers.push(style);
                }
                layers.push(domain.rules);
            }
            layers.push(rules);
        };
        push_locale(locale);
        if let Some(base) = base {
            push_locale(base);
        }
        Self { layers }
    }

    fn symbol<'a>(&'a self, token: &'a str) -> &'a str {
        self.layers
            .iter()
            .find_map(|layer| layer.symbols.get(token))
            .map(String::as_str)
            .unwrap_or(token)
    }

    fn template(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .find_map(|layer| layer.templates.get(name))
            .map(String::as_str)
    }
}

/// Speech engine backed by a [`LocaleStore`].
///
/// `setup` records the options; the locale data itself loads on the first
/// conversion so a missing locale is a per-expression error instead of
/// aborting the run.
pub struct RuleSpeechEngine<S: AssetSource> {
    store: LocaleStore<S>,
    options: Option<SpeechOptions>,
    rules: Option<RuleSet>,
}

impl<S: AssetSource> RuleSpeechEngine<S> {
    pub fn new(store: LocaleStore<S>) -> Self {
        Self {
            store,
            options: None,
            rules: None,
        }
    }

    fn ensure_rules(&mut self) -> MathvoxResult<&RuleSet> {
        let options = self
            .options
            .clone()
            .ok_or_else(|| MathvoxError::Config {
                message: "speech engine used before setup".to_string(),
            })?;

        if self.rules.is_none() {
            let locale_text = self.store.load(&options.locale)?;
            let locale: LocaleData = serde_json::from_str(&locale_text)?;
            let base = match self.store.load(BASE_LOCALE) {
                Ok(text) => Some(serde_json::from_str::<LocaleData>(&text)?),
                Err(MathvoxError::LocaleNotFound { .. }) => None,
                Err(e) => return Err(e),
            };
            self.rules = Some(RuleSet::build(locale, base, &options));
        }

        Ok(self.rules.as_ref().expect("rules just built"))
    }

    fn speak(rules: &RuleSet, node: &MathNode) -> String {
        match node {
            MathNode::Identifier(s) | MathNode::Number(s) | MathNode::Operator(s) => {
                rules.symbol(s).to_string()
            }
            MathNode::Row(children) => children
                .iter()
                .map(|child| Self::speak(rules, child))
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            MathNode::Sup(base, exp) => {
                let base_text = Self::speak(rules, base);
                let exp_text = Self::speak(rules, exp);
                let special = match exp.as_ref() {
                    MathNode::Number(n) if n == "2" => rules.template("msup_squared"),
                    MathNode::Number(n) if n == "3" => rules.template("msup_cubed"),
                    _ => None,
                };
                match special {
                    Some(template) => render(template, &[("base", &base_text)]),
                    None => render(
                        rules.template("msup").unwrap_or("{base} to the power {exp}"),
                        &[("base", &base_text), ("exp", &exp_text)],
                    ),
                }
            }
            MathNode::Sub(base, script) => render(
                rules.template("msub").unwrap_or("{base} sub {script}"),
                &[
                    ("base", &Self::speak(rules, base)),
                    ("script", &Self::speak(rules, script)),
                ],
            ),
            MathNode::Frac(num, den) => render(
                rules.template("mfrac").unwrap_or("{num} over {den}"),
                &[
                    ("num", &Self::speak(rules, num)),
                    ("den", &Self::speak(rules, den)),
                ],
            ),
            MathNode::Sqrt(inner) => render(
                rules.template("msqrt").unwrap_or("the square root of {inner}"),
                &[("inner", &Self::speak(rules, inner))],
            ),
        }
    }
}

fn render(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in fields {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

impl<S: AssetSource> SpeechEngine for RuleSpeechEngine<S> {
    fn setup(&mut self, options: SpeechOptions) -> MathvoxResult<()> {
        self.rules = None;
        self.options = Some(options);
        Ok(())
    }

    fn ready(&self) -> bool {
        self.options.is_some()
    }

    fn to_speech(&mut self, node: &MathNode) -> MathvoxResult<String> {
        let rules = self.ensure_rules()?;
        Ok(Self::speak(rules, node))
    }
}
