//! Math tree model
//!
//! The interchange type between the math engine and the speech engine: a
//! small MathML-shaped tree. Serialization to MathML text is used for
//! verbose diagnostics only; the speech engine walks the tree directly.

use std::fmt::Write as _;

/// One node of a parsed math expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathNode {
    /// Identifier (variable name, Greek letter, function name)
    Identifier(String),
    /// Numeric literal
    Number(String),
    /// Operator or punctuation
    Operator(String),
    /// Horizontal run of children
    Row(Vec<MathNode>),
    /// Superscript: base, exponent
    Sup(Box<MathNode>, Box<MathNode>),
    /// Subscript: base, script
    Sub(Box<MathNode>, Box<MathNode>),
    /// Fraction: numerator, denominator
    Frac(Box<MathNode>, Box<MathNode>),
    /// Square root
    Sqrt(Box<MathNode>),
}

impl MathNode {
    /// Wrap a list of nodes in a row, unless it is already a single node.
    pub fn row(mut nodes: Vec<MathNode>) -> MathNode {
        if nodes.len() == 1 {
            nodes.remove(0)
        } else {
            MathNode::Row(nodes)
        }
    }

    /// Serialize to MathML text (without the outer `<math>` wrapper).
    pub fn to_mathml(&self) -> String {
        let mut out = String::new();
        self.write_mathml(&mut out);
        out
    }

    fn write_mathml(&self, out: &mut String) {
        match self {
            MathNode::Identifier(s) => {
                let _ = write!(out, "<mi>{}</mi>", escape_xml(s));
            }
            MathNode::Number(s) => {
                let _ = write!(out, "<mn>{}</mn>", escape_xml(s));
            }
            MathNode::Operator(s) => {
                let _ = write!(out, "<mo>{}</mo>", escape_xml(s));
            }
            MathNode::Row(children) => {
                out.push_str("<mrow>");
                for child in children {
                    child.write_mathml(out);
                }
                out.push_str("</mrow>");
            }
            MathNode::Sup(base, exp) => {
                out.push_str("<msup>");
                base.write_mathml(out);
                exp.write_mathml(out);
                out.push_str("</msup>");
            }
            MathNode::Sub(base, script) => {
                out.push_str("<msub>");
                base.write_mathml(out);
                script.write_mathml(out);
                out.push_str("</msub>");
            }
            MathNode::Frac(num, den) => {
                out.push_str("<mfrac>");
                num.write_mathml(out);
                den.write_mathml(out);
                out.push_str("</mfrac>");
            }
            MathNode::Sqrt(inner) => {
                out.push_str("<msqrt>");
                inner.write_mathml(out);
                out.push_str("</msqrt>");
            }
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_unwraps_single_node() {
        let node = MathNode::row(vec![MathNode::Identifier("x".into())]);
        assert_eq!(node, MathNode::Identifier("x".into()));
    }

    #[test]
    fn test_mathml_simple_equation() {
        let node = MathNode::Row(vec![
            MathNode::Identifier("x".into()),
            MathNode::Operator("=".into()),
            MathNode::Number("1".into()),
        ]);
        assert_eq!(
            node.to_mathml(),
            "<mrow><mi>x</mi><mo>=</mo><mn>1</mn></mrow>"
        );
    }

    #[test]
    fn test_mathml_escapes_operators() {
        let node = MathNode::Operator("<".into());
        assert_eq!(node.to_mathml(), "<mo>&lt;</mo>");
    }

    #[test]
    fn test_mathml_superscript() {
        let node = MathNode::Sup(
            Box::new(MathNode::Identifier("a".into())),
            Box::new(MathNode::Number("2".into())),
        );
        assert_eq!(node.to_mathml(), "<msup><mi>a</mi><mn>2</mn></msup>");
    }
}
