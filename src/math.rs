//! MathML to linear text, like `x**2 + sqrt(y) / 2`.

use crate::MathError;
use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// The invisible function application operator. Typesetting only, so it renders as nothing.
const FUNCTION_APPLICATION: &str = "\u{2061}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathNode {
    /// Character data between elements, usually just indentation.
    Text(String),
    Identifier(String),
    Number(String),
    Operator(String),
    Row(Vec<MathNode>),
    Fraction {
        numerator: Box<MathNode>,
        denominator: Box<MathNode>,
    },
    Fenced {
        open: String,
        close: String,
        children: Vec<MathNode>,
    },
    Superscript {
        base: Box<MathNode>,
        exponent: Box<MathNode>,
    },
    Subscript {
        base: Box<MathNode>,
        index: Box<MathNode>,
    },
    SubSuperscript {
        base: Box<MathNode>,
        sub: Box<MathNode>,
        sup: Box<MathNode>,
    },
    /// Rows of cells, each cell holding its children.
    Table(Vec<Vec<Vec<MathNode>>>),
    SquareRoot(Box<MathNode>),
}

impl MathNode {
    /// Builds the tree for a `<math>` element or any MathML element below it.
    pub fn from_element(element: ElementRef) -> Result<Self, MathError> {
        Self::from_markup(*element)
    }

    fn from_markup(node: NodeRef<Node>) -> Result<Self, MathError> {
        let element = match node.value() {
            Node::Element(element) => element,
            Node::Text(text) => return Ok(Self::Text(text.to_string())),
            _ => return Ok(Self::Text(String::new())),
        };

        let output = match element.name() {
            "mi" => Self::Identifier(text_of(node)),
            "mn" => Self::Number(text_of(node)),
            "mo" => Self::Operator(text_of(node)),
            "math" | "mrow" => Self::Row(Self::row(node)?),
            "mfrac" => {
                let [numerator, denominator] = Self::fixed("mfrac", node)?;
                Self::Fraction {
                    numerator: Box::new(numerator),
                    denominator: Box::new(denominator),
                }
            }
            "mfenced" => Self::Fenced {
                open: element.attr("open").unwrap_or("(").to_owned(),
                close: element.attr("close").unwrap_or(")").to_owned(),
                children: Self::row(node)?,
            },
            "msup" => {
                let [base, exponent] = Self::fixed("msup", node)?;
                Self::Superscript {
                    base: Box::new(base),
                    exponent: Box::new(exponent),
                }
            }
            "msub" => {
                let [base, index] = Self::fixed("msub", node)?;
                Self::Subscript {
                    base: Box::new(base),
                    index: Box::new(index),
                }
            }
            "msubsup" => {
                let [base, sub, sup] = Self::fixed("msubsup", node)?;
                Self::SubSuperscript {
                    base: Box::new(base),
                    sub: Box::new(sub),
                    sup: Box::new(sup),
                }
            }
            "mtable" => Self::Table(Self::table(node)?),
            "msqrt" => {
                let mut children = Self::elements(node)?;
                match children.len() {
                    0 => {
                        return Err(MathError::Arity {
                            element: "msqrt".to_owned(),
                            expected: 1,
                            found: 0,
                        })
                    }
                    1 => Self::SquareRoot(Box::new(children.remove(0))),
                    // several children form an inferred row
                    _ => Self::SquareRoot(Box::new(Self::Row(children))),
                }
            }
            other => return Err(MathError::UnknownElement(other.to_owned())),
        };

        Ok(output)
    }

    /// Every child, text included. Comments are left out.
    fn row(node: NodeRef<Node>) -> Result<Vec<Self>, MathError> {
        node.children()
            .filter(|child| child.value().is_text() || child.value().is_element())
            .map(Self::from_markup)
            .collect()
    }

    fn elements(node: NodeRef<Node>) -> Result<Vec<Self>, MathError> {
        node.children()
            .filter(|child| child.value().is_element())
            .map(Self::from_markup)
            .collect()
    }

    fn fixed<const N: usize>(name: &str, node: NodeRef<Node>) -> Result<[Self; N], MathError> {
        let children = Self::elements(node)?;
        let found = children.len();

        children.try_into().map_err(|_| MathError::Arity {
            element: name.to_owned(),
            expected: N,
            found,
        })
    }

    fn table(node: NodeRef<Node>) -> Result<Vec<Vec<Vec<Self>>>, MathError> {
        let mut rows = vec![];
        for tr in node.children() {
            match tr.value() {
                Node::Element(e) if e.name() == "mtr" => {
                    let mut cells = vec![];
                    for td in tr.children() {
                        match td.value() {
                            Node::Element(e) if e.name() == "mtd" => cells.push(Self::row(td)?),
                            Node::Element(e) => {
                                return Err(MathError::MalformedTable(e.name().to_owned()))
                            }
                            _ => {}
                        }
                    }
                    rows.push(cells);
                }
                Node::Element(e) => return Err(MathError::MalformedTable(e.name().to_owned())),
                _ => {}
            }
        }

        Ok(rows)
    }

    /// Renders the tree as a single line of text, or a grid of lines for tables.
    pub fn expand(&self) -> String {
        match self {
            Self::Text(txt) | Self::Identifier(txt) | Self::Number(txt) | Self::Operator(txt) => {
                let txt = txt.trim();
                if txt == FUNCTION_APPLICATION {
                    String::new()
                } else {
                    txt.to_owned()
                }
            }
            Self::Row(children) => join(children),
            Self::Fraction {
                numerator,
                denominator,
            } => format!("{} / {}", numerator.expand(), denominator.expand()),
            Self::Fenced {
                open,
                close,
                children,
            } => format!("{}{}{}", open, join(children).trim(), close),
            Self::Superscript { base, exponent } => {
                format!("{}**{}", base.expand(), exponent.expand())
            }
            Self::Subscript { base, index } => format!("{}_{}", base.expand(), index.expand()),
            Self::SubSuperscript { base, sub, sup } => {
                format!("{}_{}^{}", base.expand(), sub.expand(), sup.expand())
            }
            Self::Table(rows) => {
                let mut output = String::new();
                for row in rows {
                    for cell in row {
                        output.push_str(&join(cell));
                        output.push_str("  ");
                    }
                    output.push('\n');
                }
                output
            }
            Self::SquareRoot(argument) => format!("sqrt({})", argument.expand()),
        }
    }

    /// [`expand`](Self::expand), cleaned up for use inside a line of prose.
    pub fn escape(&self) -> String {
        self.expand().replace(" \t\r", " ").replace("δ ", "δ")
    }
}

fn join(nodes: &[MathNode]) -> String {
    nodes
        .iter()
        .map(MathNode::expand)
        .collect::<Vec<_>>()
        .join(" ")
}

fn text_of(node: NodeRef<Node>) -> String {
    ElementRef::wrap(node)
        .map(|e| e.text().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn parse(markup: &str) -> Result<MathNode, MathError> {
        let doc = Html::parse_fragment(markup);
        let math = doc
            .select(&Selector::parse("math").unwrap())
            .next()
            .unwrap();
        MathNode::from_element(math)
    }

    fn ident(s: &str) -> MathNode {
        MathNode::Identifier(s.to_owned())
    }

    #[test]
    fn fraction() {
        let node = MathNode::Fraction {
            numerator: Box::new(ident("a")),
            denominator: Box::new(ident("b")),
        };
        assert_eq!(node.expand(), "a / b");
    }

    #[test]
    fn fenced() {
        let node = MathNode::Fenced {
            open: "(".into(),
            close: ")".into(),
            children: vec![ident("x"), ident("y")],
        };
        assert_eq!(node.expand(), "(x y)");

        let node = MathNode::Fenced {
            open: "[".into(),
            close: "]".into(),
            children: vec![MathNode::Text("\n".into()), ident("x"), MathNode::Text("\n".into())],
        };
        assert_eq!(node.expand(), "[x]");
    }

    #[test]
    fn scripts_and_roots() {
        let expr = parse(
            "<math><msup><mi>x</mi><mn>2</mn></msup><mo>+</mo>\
             <msub><mi>a</mi><mi>i</mi></msub><mo>+</mo>\
             <msubsup><mi>b</mi><mn>0</mn><mn>3</mn></msubsup><mo>+</mo>\
             <msqrt><mi>y</mi></msqrt></math>",
        )
        .unwrap();
        assert_eq!(expr.expand(), "x**2 + a_i + b_0^3 + sqrt(y)");
    }

    #[test]
    fn parsed_fraction_and_fence() {
        let expr = parse(
            "<math><mfrac><mi>a</mi><mi>b</mi></mfrac></math>",
        )
        .unwrap();
        assert_eq!(expr.expand(), "a / b");

        let expr = parse(
            "<math><mfenced open=\"|\" close=\"|\"><mi>v</mi></mfenced></math>",
        )
        .unwrap();
        assert_eq!(expr.expand(), "|v|");

        let expr = parse("<math><mfenced><mi>v</mi></mfenced></math>").unwrap();
        assert_eq!(expr.expand(), "(v)");
    }

    #[test]
    fn function_application_is_dropped() {
        let expr = parse("<math><mi>sin</mi><mo>&#x2061;</mo><mi>x</mi></math>").unwrap();
        assert_eq!(expr.expand(), "sin  x");
    }

    #[test]
    fn table_layout() {
        let expr = parse(
            "<math><mtable>\
             <mtr><mtd><mi>a</mi></mtd><mtd><mi>b</mi></mtd></mtr>\
             <mtr><mtd><mn>0</mn></mtd><mtd><mn>1</mn></mtd></mtr>\
             </mtable></math>",
        )
        .unwrap();
        assert_eq!(expr.expand(), "a  b  \n0  1  \n");
    }

    #[test]
    fn table_rejects_stray_elements() {
        let err = parse("<math><mtable><mi>x</mi></mtable></math>").unwrap_err();
        assert_eq!(err, MathError::MalformedTable("mi".into()));
    }

    #[test]
    fn unknown_element_fails() {
        let err = parse("<math><mtext>hi</mtext></math>").unwrap_err();
        assert_eq!(err, MathError::UnknownElement("mtext".into()));
    }

    #[test]
    fn wrong_arity_fails() {
        let err = parse("<math><msup><mi>x</mi></msup></math>").unwrap_err();
        assert_eq!(
            err,
            MathError::Arity {
                element: "msup".into(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn comments_are_dropped() {
        let expr = parse("<math><mi>x</mi><!-- spacing --><mi>y</mi></math>").unwrap();
        assert_eq!(expr.expand(), "x y");
    }

    #[test]
    fn escape_joins_delta() {
        let node = MathNode::Row(vec![ident("δ"), ident("x")]);
        assert_eq!(node.escape(), "δx");

        assert_eq!(ident("a \t\rb").escape(), "a b");
    }
}
