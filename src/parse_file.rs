use crate::{
    markdown::Markdown,
    parse_declaration::{parse_prototype, parse_variable},
    versions::VersionMatrix,
    DocumentError, GlFunction, GlVariable,
};
use log::*;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::path::Path;

/// Stands in for `<p>` so the HTML tree builder keeps the nesting the XHTML was written with.
/// A real `<p>` is closed early by any block element inside it, like an equation's `<div>`.
const PARAGRAPH_TAG: &str = "gl-para";

static EMPTY_PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p(\s[^>]*)?/>").expect("static regex"));
static PARAGRAPH_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)p([\s>])").expect("static regex"));

static DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#description").expect("static selector"));
static PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse(PARAGRAPH_TAG).expect("static selector"));
static VERSIONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#versions").expect("static selector"));
static FIELD_SYNOPSIS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".fieldsynopsis").expect("static selector"));
static FUNC_PROTOTYPE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".funcprototype-table").expect("static selector"));

/// Everything declared on a single page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub variables: Vec<GlVariable>,
    pub functions: Vec<GlFunction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Variable,
    Function,
}

impl DocKind {
    /// Built-in variable pages are named after the variable, like `gl_FragCoord.xhtml`.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.starts_with("gl_") {
            DocKind::Variable
        } else {
            DocKind::Function
        }
    }
}

pub fn parse_file(fpath: &Path) -> Result<Option<Document>, DocumentError> {
    trace!("{:?}", fpath);
    let markup = std::fs::read_to_string(fpath).map_err(|source| DocumentError::Io {
        path: fpath.to_owned(),
        source,
    })?;
    let file_name = fpath
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    parse_document(&file_name, &markup)
}

/// Parses one page. Pages without a description aren't reference pages, and give `None`.
pub fn parse_document(file_name: &str, markup: &str) -> Result<Option<Document>, DocumentError> {
    let doc = Html::parse_document(&preserve_paragraphs(markup));

    let description = match doc.select(&DESCRIPTION).next() {
        Some(description) => description,
        None => {
            debug!("{} has no description, skipping", file_name);
            return Ok(None);
        }
    };
    let description = description
        .select(&PARAGRAPH)
        .map(Markdown::convert_paragraph)
        .collect::<Result<Vec<_>, _>>()?;

    let versions = doc
        .select(&VERSIONS)
        .next()
        .ok_or(DocumentError::MissingRegion("versions"))?;
    let versions = VersionMatrix::parse(versions)?;

    let mut output = Document::default();
    match DocKind::from_file_name(file_name) {
        DocKind::Variable => {
            for node in doc.select(&FIELD_SYNOPSIS) {
                let decl = parse_variable(&node.text().collect::<String>())?;
                output.variables.push(GlVariable {
                    modifier: decl.modifier,
                    ty: decl.ty,
                    name: decl.name,
                    description: description.clone(),
                    // one row covers every variable on the page
                    versions: versions.for_declaration(0)?.to_vec(),
                });
            }
        }
        DocKind::Function => {
            for (i, node) in doc.select(&FUNC_PROTOTYPE).enumerate() {
                let decl = parse_prototype(&node.text().collect::<String>())?;
                output.functions.push(GlFunction {
                    return_type: decl.return_type,
                    name: decl.name,
                    parameters: decl.parameters,
                    description: description.clone(),
                    versions: versions.for_declaration(i)?.to_vec(),
                });
            }
        }
    }

    Ok(Some(output))
}

/// Renames every `<p>` so paragraphs keep their written children.
pub fn preserve_paragraphs(markup: &str) -> String {
    let markup = EMPTY_PARAGRAPH.replace_all(markup, format!("<{0}$1></{0}>", PARAGRAPH_TAG));
    PARAGRAPH_TAGS
        .replace_all(&markup, format!("<${{1}}{}$2", PARAGRAPH_TAG))
        .into_owned()
}
