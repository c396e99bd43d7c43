//! LaTeX math engine
//!
//! Parses the subset of LaTeX math that shows up in plain expressions:
//! identifiers, numbers, operators, groups, `^`/`_` scripts, `\frac`,
//! `\sqrt`, Greek letters, common relations and function names. Unknown
//! commands are a per-expression [`MathvoxError::Conversion`], never a
//! panic.

use crate::engine::MathEngine;
use crate::error::{MathvoxError, MathvoxResult};
use crate::mathml::MathNode;

/// Built-in LaTeX-to-math-tree converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexEngine;

impl LatexEngine {
    pub fn new() -> Self {
        Self
    }
}

impl MathEngine for LatexEngine {
    fn convert(&self, latex: &str) -> MathvoxResult<MathNode> {
        let trimmed = latex.trim().trim_matches('$').trim();
        if trimmed.is_empty() {
            return Err(conversion_error(latex, "empty expression"));
        }
        let mut parser = Parser::new(latex, trimmed);
        let nodes = parser.parse_sequence(None)?;
        if nodes.is_empty() {
            return Err(conversion_error(latex, "empty expression"));
        }
        Ok(MathNode::row(nodes))
    }
}

fn conversion_error(input: &str, message: impl Into<String>) -> MathvoxError {
    MathvoxError::Conversion {
        input: input.to_string(),
        message: message.into(),
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, trimmed: &str) -> Self {
        Self {
            input,
            chars: trimmed.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn err(&self, message: impl Into<String>) -> MathvoxError {
        conversion_error(self.input, message)
    }

    /// Parse atoms until end of input or the given closing delimiter.
    fn parse_sequence(&mut self, until: Option<char>) -> MathvoxResult<Vec<MathNode>> {
        let mut nodes = Vec::new();
        loop {
            match self.peek() {
                None => {
                    if let Some(close) = until {
                        return Err(self.err(format!("missing closing '{close}'")));
                    }
                    return Ok(nodes);
                }
                Some(c) if Some(c) == until => {
                    self.bump();
                    return Ok(nodes);
                }
                Some(c) if c.is_whitespace() || c == '~' => {
                    self.bump();
                }
                Some('^') => {
                    self.bump();
                    let base = nodes
                        .pop()
                        .ok_or_else(|| self.err("superscript with no base"))?;
                    let exp = self.parse_arg()?;
                    nodes.push(MathNode::Sup(Box::new(base), Box::new(exp)));
                }
                Some('_') => {
                    self.bump();
                    let base = nodes
                        .pop()
                        .ok_or_else(|| self.err("subscript with no base"))?;
                    let script = self.parse_arg()?;
                    nodes.push(MathNode::Sub(Box::new(base), Box::new(script)));
                }
                Some('}') => {
                    return Err(self.err("unbalanced '}'"));
                }
                Some(c) => {
                    let node = self.parse_primary(c)?;
                    nodes.extend(node);
                }
            }
        }
    }

    /// One primary atom. Returns zero nodes for spacing commands.
    fn parse_primary(&mut self, c: char) -> MathvoxResult<Vec<MathNode>> {
        if c.is_ascii_digit() {
            return Ok(vec![self.parse_number()]);
        }
        if c.is_alphabetic() {
            self.bump();
            return Ok(vec![MathNode::Identifier(c.to_string())]);
        }
        match c {
            '{' => {
                self.bump();
                let inner = self.parse_sequence(Some('}'))?;
                Ok(vec![MathNode::row(inner)])
            }
            '\\' => {
                self.bump();
                self.parse_command()
            }
            '=' | '+' | '-' | '*' | '/' | '<' | '>' | '(' | ')' | '[' | ']' | ',' | '!' | '|'
            | ';' | ':' | '.' | '\'' => {
                self.bump();
                Ok(vec![MathNode::Operator(c.to_string())])
            }
            other => Err(self.err(format!("unsupported character '{other}'"))),
        }
    }

    fn parse_number(&mut self) -> MathNode {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else if c == '.'
                && self
                    .chars
                    .get(self.pos + 1)
                    .is_some_and(|next| next.is_ascii_digit())
            {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        MathNode::Number(text)
    }

    /// Script and command arguments: a group, a single token, or a command.
    fn parse_arg(&mut self) -> MathvoxResult<MathNode> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
        match self.peek() {
            None => Err(self.err("missing argument")),
            Some('{') => {
                self.bump();
                let inner = self.parse_sequence(Some('}'))?;
                Ok(MathNode::row(inner))
            }
            Some(c) if c.is_ascii_digit() => {
                // TeX semantics: `x^23` is x squared times 3.
                self.bump();
                Ok(MathNode::Number(c.to_string()))
            }
            Some(c) if c.is_alphabetic() => {
                self.bump();
                Ok(MathNode::Identifier(c.to_string()))
            }
            Some('\\') => {
                self.bump();
                let nodes = self.parse_command()?;
                if nodes.is_empty() {
                    Err(self.err("missing argument"))
                } else {
                    Ok(MathNode::row(nodes))
                }
            }
            Some(other) => Err(self.err(format!("invalid argument '{other}'"))),
        }
    }

    fn parse_command(&mut self) -> MathvoxResult<Vec<MathNode>> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if name.is_empty() {
            // Escaped single character, e.g. `\{` or `\,` spacing.
            return match self.bump() {
                Some(',') | Some(';') | Some('!') | Some(' ') => Ok(vec![]),
                Some(c @ '{') | Some(c @ '}') | Some(c @ '|') => {
                    Ok(vec![MathNode::Operator(c.to_string())])
                }
                Some(other) => Err(self.err(format!("unknown escape '\\{other}'"))),
                None => Err(self.err("dangling '\\'")),
            };
        }

        match name.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.parse_arg()?;
                let den = self.parse_arg()?;
                Ok(vec![MathNode::Frac(Box::new(num), Box::new(den))])
            }
            "sqrt" => {
                let inner = self.parse_arg()?;
                Ok(vec![MathNode::Sqrt(Box::new(inner))])
            }
            "left" | "right" => {
                // Sizing commands disappear; keep the delimiter itself.
                match self.bump() {
                    Some('.') => Ok(vec![]),
                    Some('\\') => {
                        // `\left\{` etc.
                        match self.bump() {
                            Some(c @ '{') | Some(c @ '}') | Some(c @ '|') => {
                                Ok(vec![MathNode::Operator(c.to_string())])
                            }
                            _ => Err(self.err(format!("invalid delimiter after \\{name}"))),
                        }
                    }
                    Some(c @ '(') | Some(c @ ')') | Some(c @ '[') | Some(c @ ']')
                    | Some(c @ '|') => Ok(vec![MathNode::Operator(c.to_string())]),
                    _ => Err(self.err(format!("invalid delimiter after \\{name}"))),
                }
            }
            "quad" | "qquad" => Ok(vec![]),
            "cdot" => Ok(vec![MathNode::Operator("⋅".into())]),
            "times" => Ok(vec![MathNode::Operator("×".into())]),
            "div" => Ok(vec![MathNode::Operator("/".into())]),
            "pm" => Ok(vec![MathNode::Operator("±".into())]),
            "leq" | "le" => Ok(vec![MathNode::Operator("≤".into())]),
            "geq" | "ge" => Ok(vec![MathNode::Operator("≥".into())]),
            "neq" | "ne" => Ok(vec![MathNode::Operator("≠".into())]),
            "to" | "rightarrow" => Ok(vec![MathNode::Operator("→".into())]),
            "infty" => Ok(vec![MathNode::Identifier("∞".into())]),
            "sin" | "cos" | "tan" | "log" | "ln" | "exp" | "lim" | "min" | "max" => {
                Ok(vec![MathNode::Identifier(name)])
            }
            _ => {
                if let Some(greek) = greek_letter(&name) {
                    Ok(vec![MathNode::Identifier(greek.to_string())])
                } else {
                    Err(self.err(format!("unknown command '\\{name}'")))
                }
            }
        }
    }
}

fn greek_letter(name: &str) -> Option<&'static str> {
    let glyph = match name {
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" | "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" => "θ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "pi" => "π",
        "rho" => "ρ",
        "sigma" => "σ",
        "tau" => "τ",
        "upsilon" => "υ",
        "phi" | "varphi" => "φ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Phi" => "Φ",
        "Omega" => "Ω",
        _ => return None,
    };
    Some(glyph)
}
