use jack_ast::{Symbol, Token, TokenKind};
use jack_types::{JackError, Result, Span};

use crate::classifier::classify;

/// An open `/*` or `/**` comment waiting for its `*/`.
#[derive(Debug, Clone, Copy)]
struct BlockComment {
    span: Span,
    line: usize,
}

/// Line-oriented scanner turning one source unit into classified tokens.
///
/// Quote state is reset at every line end; block-comment state carries over
/// line boundaries.
pub struct Lexer<'a> {
    source: &'a str,
    block_comment: Option<BlockComment>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, block_comment: None, tokens: Vec::new() }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut offset = 0;
        for (index, line) in self.source.split_inclusive('\n').enumerate() {
            self.scan_line(line, offset, index + 1)?;
            offset += line.len();
        }

        if let Some(comment) = self.block_comment {
            return Err(JackError::lexical(comment.span, comment.line, "/*", "unterminated block comment"));
        }

        Ok(self.tokens)
    }

    fn scan_line(&mut self, text: &str, base: usize, line: usize) -> Result<()> {
        let mut chars = text.char_indices().peekable();
        let mut word_start: Option<usize> = None;

        while let Some((i, c)) = chars.next() {
            if self.block_comment.is_some() {
                if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    self.block_comment = None;
                }
                continue;
            }

            match c {
                '/' if matches!(chars.peek(), Some((_, '/'))) => {
                    self.flush_word(text, base, line, &mut word_start, i)?;
                    return Ok(());
                }
                '/' if matches!(chars.peek(), Some((_, '*'))) => {
                    self.flush_word(text, base, line, &mut word_start, i)?;
                    chars.next();
                    self.block_comment = Some(BlockComment { span: Span::new(base + i, base + i + 2), line });
                }
                '"' => {
                    self.flush_word(text, base, line, &mut word_start, i)?;
                    let close = loop {
                        match chars.next() {
                            Some((j, '"')) => break Some(j),
                            Some(_) => continue,
                            None => break None,
                        }
                    };
                    match close {
                        Some(j) => self.tokens.push(Token {
                            kind: TokenKind::StringConstant,
                            text: text[i + 1..j].to_string(),
                            span: Span::new(base + i, base + j + 1),
                            line,
                        }),
                        None => {
                            let rest = text[i..].trim_end_matches(['\r', '\n']);
                            return Err(JackError::lexical(
                                Span::new(base + i, base + i + rest.len()),
                                line,
                                rest,
                                "unterminated string constant",
                            ));
                        }
                    }
                }
                c if c.is_whitespace() => {
                    self.flush_word(text, base, line, &mut word_start, i)?;
                }
                c => match Symbol::from_char(c) {
                    Some(symbol) => {
                        self.flush_word(text, base, line, &mut word_start, i)?;
                        self.tokens.push(Token {
                            kind: TokenKind::Symbol(symbol),
                            text: c.to_string(),
                            span: Span::new(base + i, base + i + 1),
                            line,
                        });
                    }
                    None => {
                        word_start.get_or_insert(i);
                    }
                },
            }
        }

        self.flush_word(text, base, line, &mut word_start, text.len())
    }

    fn flush_word(&mut self, text: &str, base: usize, line: usize, start: &mut Option<usize>, end: usize) -> Result<()> {
        if let Some(start) = start.take() {
            let lexeme = &text[start..end];
            let span = Span::new(base + start, base + end);
            let kind = classify(lexeme, span, line)?;
            self.tokens.push(Token { kind, text: lexeme.to_string(), span, line });
        }
        Ok(())
    }
}

/// Lexes a whole source unit eagerly.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}
