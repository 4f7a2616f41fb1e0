#![allow(clippy::bool_comparison)]

use serde::{Deserialize, Serialize};

pub mod error;
pub mod markdown;
pub mod math;
pub mod parse_declaration;
pub mod parse_file;
pub mod tokenize;
pub mod versions;

pub use error::{DeclarationError, DocumentError, MathError};
pub use parse_file::{parse_document, parse_file, Document};

/// The comment stamped at the top of every generated spec.
pub const SPEC_COMMENT: &str = "generated from docs.gl";

/// A version identifier, such as `310` for `3.10` or `31` for `3.1`.
pub type Version = u32;

/// The whole generated output: every variable and every function found in the docs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlSpec {
    pub comment: String,
    pub variables: Vec<GlVariable>,
    pub functions: Vec<GlFunction>,
}

impl Default for GlSpec {
    fn default() -> Self {
        Self {
            comment: SPEC_COMMENT.to_owned(),
            variables: vec![],
            functions: vec![],
        }
    }
}

impl GlSpec {
    /// Moves the records of a single parsed document into the spec.
    pub fn extend(&mut self, document: Document) {
        self.variables.extend(document.variables);
        self.functions.extend(document.functions);
    }

    /// Pretty prints the spec with a four space indent. Non-ASCII text is kept as is.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;

        Ok(buf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlVariable {
    /// The storage qualifier, like `in`, `out` or `const`.
    pub modifier: String,

    /// The type, including any array suffix such as `float[]`.
    #[serde(rename = "type")]
    pub ty: String,

    pub name: String,

    /// Each paragraph of the description, converted to markdown.
    pub description: Vec<String>,

    /// The versions in which this variable is available.
    pub versions: Vec<Version>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlFunction {
    pub return_type: String,

    pub name: String,

    /// The parameters of the function. Empty when the prototype reads `(void)`.
    pub parameters: Vec<GlParameter>,

    /// Each paragraph of the description, converted to markdown.
    pub description: Vec<String>,

    /// The versions in which this overload is available.
    pub versions: Vec<Version>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlParameter {
    /// Whether the parameter was wrapped in `[ ]` in the prototype.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ParameterModifier>,

    /// The type, including any array suffix such as `vec2[4]`.
    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The direction qualifier of a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterModifier {
    In,
    Out,
    Inout,
}

impl ParameterModifier {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            "inout" => Some(Self::Inout),
            _ => None,
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
