use crate::{tokenize::tokenize, DeclarationError, GlParameter, ParameterModifier};

/// A variable declaration, without the description and versions of its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub modifier: String,
    pub ty: String,
    pub name: String,
}

/// A function prototype, without the description and versions of its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeDecl {
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<GlParameter>,
}

struct Tokens(Vec<String>);

impl Tokens {
    fn get(&self, position: usize) -> Result<&str, DeclarationError> {
        self.0
            .get(position)
            .map(String::as_str)
            .ok_or(DeclarationError::UnexpectedEnd(position))
    }

    fn expect(&self, position: usize, expected: &'static str) -> Result<(), DeclarationError> {
        let found = self.get(position)?;
        if found == expected {
            Ok(())
        } else {
            Err(DeclarationError::Unexpected {
                expected,
                found: found.to_owned(),
                position,
            })
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Parses `modifier type name;`, where anything between the name and the `;`
/// (usually an array suffix) is glued onto the type.
pub fn parse_variable(text: &str) -> Result<VariableDecl, DeclarationError> {
    let tokens = Tokens(tokenize(text));

    let modifier = tokens.get(0)?.to_owned();
    let mut ty = tokens.get(1)?.to_owned();
    let name = tokens.get(2)?.to_owned();

    let last = tokens.len() - 1;
    tokens.expect(last, ";")?;
    if last > 3 {
        ty.push_str(&tokens.0[3..last].concat());
    }

    Ok(VariableDecl { modifier, ty, name })
}

/// Parses `return_type name( params );`.
///
/// Each parameter reads `[ modifier? type name? array? ]`, with the brackets marking it
/// optional. A bare `void` ends the list, so `(void)` yields no parameters at all.
pub fn parse_prototype(text: &str) -> Result<PrototypeDecl, DeclarationError> {
    let tokens = Tokens(tokenize(text));

    let return_type = tokens.get(0)?.to_owned();
    let name = tokens.get(1)?.to_owned();
    tokens.expect(2, "(")?;

    // `get(2)` succeeded, so there are at least three tokens
    let end = tokens.len() - 2;

    let mut parameters = vec![];
    let mut i = 3;
    while i < end {
        let optional = tokens.get(i)? == "[";
        if optional {
            i += 1;
        }

        let modifier = ParameterModifier::from_token(tokens.get(i)?);
        if modifier.is_some() {
            i += 1;
        }

        let ty = tokens.get(i)?;
        if ty == "void" {
            break;
        }
        i += 1;

        let mut parameter = GlParameter {
            optional,
            modifier,
            ty: ty.to_owned(),
            name: None,
        };

        let name = tokens.get(i)?;
        if name.starts_with(char::is_alphanumeric) {
            parameter.name = Some(name.to_owned());
            i += 1;
        }

        if tokens.get(i)? == "[" {
            let array_start = i;
            while i < tokens.len() && tokens.0[i] != "]" {
                i += 1;
            }
            i += 1;
            let array_end = i.min(tokens.len());
            parameter.ty.push_str(&tokens.0[array_start..array_end].concat());

            // `type[N] name` puts the name after the array suffix
            if parameter.name.is_none()
                && i < end
                && tokens.0[i].starts_with(char::is_alphanumeric)
            {
                parameter.name = Some(tokens.0[i].clone());
                i += 1;
            }
        }

        parameters.push(parameter);

        if optional {
            tokens.expect(i, "]")?;
            i += 1;
        }
        if tokens.get(i)? == "," {
            i += 1;
        }
    }

    tokens.expect(end, ")")?;
    tokens.expect(end + 1, ";")?;

    Ok(PrototypeDecl {
        return_type,
        name,
        parameters,
    })
}
