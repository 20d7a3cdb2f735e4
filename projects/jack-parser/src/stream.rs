use jack_ast::Token;
use jack_types::Span;

/// Forward-only cursor over the tokens of one source unit.
///
/// Tokens are stored in reverse so that consuming one is a `pop`, which moves
/// it out of the stream; a token can therefore be handed out at most once.
pub struct TokenStream {
    pending: Vec<Token>,
    len: usize,
    last: Option<(Span, usize)>,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let len = tokens.len();
        tokens.reverse();
        Self { pending: tokens, len, last: None }
    }

    /// The token under the cursor, without consuming it.
    pub fn current(&self) -> Option<&Token> {
        self.pending.last()
    }

    /// Removes and returns the token under the cursor.
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.pending.pop()?;
        self.last = Some((token.span, token.line));
        Some(token)
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.len - self.pending.len()
    }

    /// Total number of tokens the stream was created with.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Zero-width span and line just past the last consumed token, used to
    /// locate "unexpected end of input" errors.
    pub fn end_position(&self) -> (Span, usize) {
        match self.last {
            Some((span, line)) => (Span::new(span.end, span.end), line),
            None => (Span::default(), 1),
        }
    }
}
