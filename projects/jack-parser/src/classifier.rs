use jack_ast::{Keyword, Symbol, TokenKind};
use jack_types::{JackError, Result, Span};

/// Largest value an integer constant may take.
pub const MAX_INTEGER: u16 = 32767;

/// Assigns exactly one token class to a bare lexeme.
///
/// String constants never reach this function; the lexer tags them while
/// scanning quotes.
pub fn classify(lexeme: &str, span: Span, line: usize) -> Result<TokenKind> {
    if let Some(keyword) = Keyword::from_lexeme(lexeme) {
        return Ok(TokenKind::Keyword(keyword));
    }

    let mut chars = lexeme.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Err(JackError::lexical(span, line, lexeme, "empty lexeme")),
    };

    if chars.as_str().is_empty() {
        if let Some(symbol) = Symbol::from_char(first) {
            return Ok(TokenKind::Symbol(symbol));
        }
    }

    if first.is_ascii_digit() {
        if !lexeme.bytes().all(|b| b.is_ascii_digit()) {
            return Err(JackError::lexical(span, line, lexeme, "identifier cannot start with a digit"));
        }
        return match lexeme.parse::<u16>() {
            Ok(value) if value <= MAX_INTEGER => Ok(TokenKind::IntegerConstant(value)),
            _ => Err(JackError::lexical(span, line, lexeme, "integer constant out of range 0..=32767")),
        };
    }

    Ok(TokenKind::Identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_types::JackErrorKind;

    fn kind_of(lexeme: &str) -> Result<TokenKind> {
        classify(lexeme, Span::new(0, lexeme.len()), 1)
    }

    #[test]
    fn test_keywords_win_over_identifiers() {
        assert_eq!(kind_of("while").unwrap(), TokenKind::Keyword(Keyword::While));
        assert_eq!(kind_of("whilst").unwrap(), TokenKind::Identifier);
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(kind_of("0").unwrap(), TokenKind::IntegerConstant(0));
        assert_eq!(kind_of("32767").unwrap(), TokenKind::IntegerConstant(32767));
        assert!(kind_of("32768").is_err());
        assert!(kind_of("99999999999").is_err());
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(kind_of("_tmp1").unwrap(), TokenKind::Identifier);
        assert_eq!(kind_of("Main").unwrap(), TokenKind::Identifier);
        assert_eq!(kind_of(";").unwrap(), TokenKind::Symbol(Symbol::Semicolon));
    }

    #[test]
    fn test_rejections_carry_lexeme() {
        let error = kind_of("1abc").unwrap_err();
        match error.kind() {
            JackErrorKind::LexicalError { lexeme, line, .. } => {
                assert_eq!(lexeme, "1abc");
                assert_eq!(*line, 1);
            }
            other => panic!("Expected lexical error, got {:?}", other),
        }
        assert!(kind_of("9$").is_err());
    }

    #[test]
    fn test_anything_not_digit_leading_is_an_identifier() {
        for lexeme in ["a$b", "x#", "caf\u{e9}", "!", "@home"] {
            assert_eq!(kind_of(lexeme).unwrap(), TokenKind::Identifier, "{}", lexeme);
        }
    }
}
