/// Splits a declaration into words and single punctuation characters.
///
/// A word starts with an alphanumeric character and continues over alphanumerics
/// and underscores. Every other non-whitespace character is its own token.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c.is_alphanumeric() {
            let mut end = start + c.len_utf8();
            while let Some(&(idx, next)) = chars.peek() {
                if next.is_alphanumeric() || next == '_' {
                    end = idx + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(text[start..end].to_owned());
            continue;
        }

        tokens.push(c.to_string());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_split() {
        assert_eq!(
            tokenize("a, b[3];"),
            vec!["a", ",", "b", "[", "3", "]", ";"]
        );
    }

    #[test]
    fn words_keep_underscores() {
        assert_eq!(
            tokenize("out float gl_ClipDistance[];"),
            vec!["out", "float", "gl_ClipDistance", "[", "]", ";"]
        );
    }

    #[test]
    fn leading_underscore_is_punctuation() {
        // only an alphanumeric can start a word
        assert_eq!(tokenize("_x"), vec!["_", "x"]);
    }

    #[test]
    fn tokens_cover_every_non_whitespace_char() {
        let text = "genType  clamp(\n\tgenType x,\n genType minVal ) ;";
        let joined: String = tokenize(text).concat();
        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize(" \n\t").is_empty());
    }
}
