use crate::{math::MathNode, MathError};
use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Node, Selector};

static MATH: Lazy<Selector> = Lazy::new(|| Selector::parse("math").expect("static selector"));
static MTABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("mtable").expect("static selector"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markdown {
    Italic,
    CodeSnippet,
    CodeFull,
}

impl Markdown {
    /// Converts a `<p>` of the description into a single markdown paragraph.
    ///
    /// A paragraph holding a table of math (a matrix, or a system of equations) becomes a
    /// fenced code block. Everything else becomes one line of text.
    pub fn convert_paragraph(paragraph: ElementRef) -> Result<String, MathError> {
        if let Some(table) = paragraph
            .select(&MATH)
            .next()
            .and_then(|math| math.select(&MTABLE).next())
        {
            let table = MathNode::from_element(table)?;
            let mut output = String::new();
            Self::write_in_md(Markdown::CodeFull, &table.expand(), &mut output);
            return Ok(output);
        }

        let mut output = String::new();
        Self::to_md(*paragraph, &mut output, false)?;

        Ok(output.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn to_md(
        container: NodeRef<Node>,
        output: &mut String,
        in_code: bool,
    ) -> Result<(), MathError> {
        for child in container.children() {
            let element = match child.value() {
                Node::Text(txt) => {
                    output.push_str(txt);
                    continue;
                }
                Node::Element(_) => match ElementRef::wrap(child) {
                    Some(element) => element,
                    None => continue,
                },
                _ => continue,
            };

            match element.value().name() {
                "em" => {
                    let txt: String = element.text().collect();
                    Self::write_in_md(Markdown::Italic, &txt, output);
                }
                "code" => {
                    let mut buff = String::new();
                    Self::to_md(child, &mut buff, true)?;
                    Self::write_in_md(Markdown::CodeSnippet, &buff, output);
                }
                // code is flattened before math is rendered, so math in code stays raw text
                "math" if in_code == false => {
                    let math = MathNode::from_element(element)?;
                    Self::write_in_md(Markdown::CodeSnippet, &math.escape(), output);
                }
                _ => Self::to_md(child, output, in_code)?,
            }
        }

        Ok(())
    }

    fn write_in_md(txt_desc: Markdown, txt: &str, buf: &mut String) {
        match txt_desc {
            Markdown::Italic => {
                buf.push('_');
                buf.push_str(txt);
                buf.push('_');
            }
            Markdown::CodeSnippet => {
                buf.push('`');
                buf.push_str(txt);
                buf.push('`');
            }
            Markdown::CodeFull => {
                buf.push_str("```\n");
                buf.push_str(txt);
                buf.push_str("\n```\n");
            }
        }
    }
}
