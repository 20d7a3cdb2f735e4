use crate::lexer::tokenize;
use crate::stream::TokenStream;
use jack_ast::*;
use jack_types::{JackError, Result};
use tracing::trace;

/// Where an expression occurs. The context names the tokens that legally end
/// the expression; those tokens are always left for the caller to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    /// Right-hand side of `let`, value of `return`; ends at `;`.
    Statement,
    /// Condition of `if` and `while`; ends at `)`.
    Condition,
    /// Array subscript; ends at `]`.
    Index,
    /// Element of an expression list; ends at `,` or `)`.
    Argument,
    /// Inside `( expression )` within a term; ends at `)`.
    Parenthesized,
}

impl ExprContext {
    pub fn is_terminator(self, token: &Token) -> bool {
        match self {
            ExprContext::Statement => token.is_symbol(Symbol::Semicolon),
            ExprContext::Condition | ExprContext::Parenthesized => token.is_symbol(Symbol::RParen),
            ExprContext::Index => token.is_symbol(Symbol::RBracket),
            ExprContext::Argument => token.is_symbol(Symbol::Comma) || token.is_symbol(Symbol::RParen),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            ExprContext::Statement => "';'",
            ExprContext::Condition | ExprContext::Parenthesized => "')'",
            ExprContext::Index => "']'",
            ExprContext::Argument => "',' or ')'",
        }
    }
}

pub struct Parser {
    stream: TokenStream,
}

impl Parser {
    /// Lexes `source` eagerly and positions the cursor on its first token.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self::from_tokens(tokenize(source)?))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { stream: TokenStream::new(tokens) }
    }

    pub fn is_eof(&self) -> bool {
        self.stream.is_exhausted()
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.stream.position()
    }

    /// Fails unless every token has been consumed.
    pub fn finish(&self) -> Result<()> {
        match self.stream.current() {
            None => Ok(()),
            Some(_) => Err(self.error_here("expected end of input")),
        }
    }

    // --- Cursor helpers ---

    fn current(&self) -> Option<&Token> {
        self.stream.current()
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.current(), Some(token) if token.is_keyword(keyword))
    }

    fn at_symbol(&self, symbol: Symbol) -> bool {
        matches!(self.current(), Some(token) if token.is_symbol(symbol))
    }

    fn error_here(&self, message: &str) -> JackError {
        match self.current() {
            Some(token) => JackError::parse(token.span, token.line, token.to_string(), message),
            None => {
                let (span, line) = self.stream.end_position();
                JackError::parse(span, line, "end of input", message)
            }
        }
    }

    /// Consumes the current token if `accept` holds for it.
    fn expect_with(&mut self, accept: impl Fn(&Token) -> bool, message: &str) -> Result<Token> {
        if !self.current().is_some_and(|token| accept(token)) {
            return Err(self.error_here(message));
        }
        self.stream.advance().ok_or_else(|| self.error_here(message))
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token> {
        self.expect_with(|t| t.is_keyword(keyword), &format!("expected '{}'", keyword.as_str()))
    }

    fn expect_symbol(&mut self, symbol: Symbol) -> Result<Token> {
        self.expect_with(|t| t.is_symbol(symbol), &format!("expected '{}'", symbol.as_char()))
    }

    fn expect_identifier(&mut self) -> Result<Token> {
        self.expect_with(|t| t.kind == TokenKind::Identifier, "expected an identifier")
    }

    fn enter(&self, kind: NodeKind) -> Node {
        if let Some(token) = self.current() {
            trace!(rule = kind.label(), line = token.line, "enter");
        }
        Node::new(kind)
    }

    // --- Program structure ---

    /// `'class' identifier '{' classVarDec* subroutineDec* '}'`, followed by
    /// end of input.
    pub fn parse_class(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::Class);
        node.push_token(self.expect_keyword(Keyword::Class)?);
        node.push_token(self.expect_identifier()?);
        node.push_token(self.expect_symbol(Symbol::LBrace)?);

        while self.at_keyword(Keyword::Static) || self.at_keyword(Keyword::Field) {
            node.push_node(self.parse_class_var_dec()?);
        }

        while self.at_keyword(Keyword::Constructor) || self.at_keyword(Keyword::Function) || self.at_keyword(Keyword::Method) {
            node.push_node(self.parse_subroutine_dec()?);
        }

        node.push_token(self.expect_with(|t| t.is_symbol(Symbol::RBrace), "expected a class member or '}'")?);
        self.finish()?;
        Ok(node)
    }

    /// `('static'|'field') type identifier (',' identifier)* ';'`
    pub fn parse_class_var_dec(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::ClassVarDec);
        node.push_token(self.expect_with(
            |t| t.is_keyword(Keyword::Static) || t.is_keyword(Keyword::Field),
            "expected 'static' or 'field'",
        )?);
        self.parse_typed_names(&mut node)?;
        Ok(node)
    }

    /// `type identifier (',' identifier)* ';'`, shared by classVarDec and varDec.
    fn parse_typed_names(&mut self, node: &mut Node) -> Result<()> {
        node.push_token(self.parse_type(false)?);
        node.push_token(self.expect_identifier()?);
        while self.at_symbol(Symbol::Comma) {
            node.push_token(self.expect_symbol(Symbol::Comma)?);
            node.push_token(self.expect_identifier()?);
        }
        node.push_token(self.expect_symbol(Symbol::Semicolon)?);
        Ok(())
    }

    /// `'int' | 'char' | 'boolean' | identifier`, plus `'void'` for return types.
    fn parse_type(&mut self, allow_void: bool) -> Result<Token> {
        let message = if allow_void { "expected a return type" } else { "expected a type" };
        self.expect_with(
            |t| match t.kind {
                TokenKind::Keyword(keyword) => keyword.is_primitive_type() || (allow_void && keyword == Keyword::Void),
                TokenKind::Identifier => true,
                _ => false,
            },
            message,
        )
    }

    /// `('constructor'|'function'|'method') (type|'void') identifier
    /// '(' parameterList ')' subroutineBody`
    ///
    /// The `(` after the name always opens the parameter list; parenthesized
    /// expressions only start inside terms.
    pub fn parse_subroutine_dec(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::SubroutineDec);
        node.push_token(self.expect_with(
            |t| matches!(t.keyword(), Some(Keyword::Constructor | Keyword::Function | Keyword::Method)),
            "expected 'constructor', 'function' or 'method'",
        )?);
        node.push_token(self.parse_type(true)?);
        node.push_token(self.expect_identifier()?);
        node.push_token(self.expect_symbol(Symbol::LParen)?);
        node.push_node(self.parse_parameter_list()?);
        node.push_token(self.expect_symbol(Symbol::RParen)?);
        node.push_node(self.parse_subroutine_body()?);
        Ok(node)
    }

    /// `( type identifier (',' type identifier)* )?`
    pub fn parse_parameter_list(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::ParameterList);
        if self.at_symbol(Symbol::RParen) {
            return Ok(node);
        }

        loop {
            node.push_token(self.parse_type(false)?);
            node.push_token(self.expect_identifier()?);
            if !self.at_symbol(Symbol::Comma) {
                break;
            }
            node.push_token(self.expect_symbol(Symbol::Comma)?);
        }
        Ok(node)
    }

    /// `'{' varDec* statements '}'`
    pub fn parse_subroutine_body(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::SubroutineBody);
        node.push_token(self.expect_symbol(Symbol::LBrace)?);
        while self.at_keyword(Keyword::Var) {
            node.push_node(self.parse_var_dec()?);
        }
        node.push_node(self.parse_statements()?);
        node.push_token(self.expect_block_close()?);
        Ok(node)
    }

    /// `'var' type identifier (',' identifier)* ';'`
    pub fn parse_var_dec(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::VarDec);
        node.push_token(self.expect_keyword(Keyword::Var)?);
        self.parse_typed_names(&mut node)?;
        Ok(node)
    }

    // --- Statements ---

    /// `statement*`; stops at the first token that cannot start a statement.
    pub fn parse_statements(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::Statements);
        loop {
            let statement = match self.current().and_then(Token::keyword) {
                Some(Keyword::Let) => self.parse_let_statement()?,
                Some(Keyword::If) => self.parse_if_statement()?,
                Some(Keyword::While) => self.parse_while_statement()?,
                Some(Keyword::Do) => self.parse_do_statement()?,
                Some(Keyword::Return) => self.parse_return_statement()?,
                _ => break,
            };
            node.push_node(statement);
        }
        Ok(node)
    }

    fn expect_block_close(&mut self) -> Result<Token> {
        self.expect_with(|t| t.is_symbol(Symbol::RBrace), "expected a statement or '}'")
    }

    /// `'{' statements '}'`, appended to `node`.
    fn parse_block(&mut self, node: &mut Node) -> Result<()> {
        node.push_token(self.expect_symbol(Symbol::LBrace)?);
        node.push_node(self.parse_statements()?);
        node.push_token(self.expect_block_close()?);
        Ok(())
    }

    /// `'let' identifier ('[' expression ']')? '=' expression ';'`
    pub fn parse_let_statement(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::LetStatement);
        node.push_token(self.expect_keyword(Keyword::Let)?);
        node.push_token(self.expect_identifier()?);
        if self.at_symbol(Symbol::LBracket) {
            node.push_token(self.expect_symbol(Symbol::LBracket)?);
            node.push_node(self.parse_expression(ExprContext::Index)?);
            node.push_token(self.expect_symbol(Symbol::RBracket)?);
        }
        node.push_token(self.expect_with(|t| t.is_symbol(Symbol::Eq), "expected '[' or '='")?);
        node.push_node(self.parse_expression(ExprContext::Statement)?);
        node.push_token(self.expect_symbol(Symbol::Semicolon)?);
        Ok(node)
    }

    /// `'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?`
    ///
    /// The else branch is detected by looking at the token right after the
    /// closing brace of the first block.
    pub fn parse_if_statement(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::IfStatement);
        node.push_token(self.expect_keyword(Keyword::If)?);
        self.parse_condition(&mut node)?;
        self.parse_block(&mut node)?;
        if self.at_keyword(Keyword::Else) {
            node.push_token(self.expect_keyword(Keyword::Else)?);
            self.parse_block(&mut node)?;
        }
        Ok(node)
    }

    /// `'while' '(' expression ')' '{' statements '}'`
    pub fn parse_while_statement(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::WhileStatement);
        node.push_token(self.expect_keyword(Keyword::While)?);
        self.parse_condition(&mut node)?;
        self.parse_block(&mut node)?;
        Ok(node)
    }

    fn parse_condition(&mut self, node: &mut Node) -> Result<()> {
        node.push_token(self.expect_symbol(Symbol::LParen)?);
        node.push_node(self.parse_expression(ExprContext::Condition)?);
        node.push_token(self.expect_symbol(Symbol::RParen)?);
        Ok(())
    }

    /// `'do' subroutineCall ';'`; the call is inlined into the statement.
    pub fn parse_do_statement(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::DoStatement);
        node.push_token(self.expect_keyword(Keyword::Do)?);
        node.push_token(self.expect_identifier()?);
        self.parse_call_rest(&mut node)?;
        node.push_token(self.expect_symbol(Symbol::Semicolon)?);
        Ok(node)
    }

    /// `'return' expression? ';'`
    pub fn parse_return_statement(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::ReturnStatement);
        node.push_token(self.expect_keyword(Keyword::Return)?);
        if !self.at_symbol(Symbol::Semicolon) {
            node.push_node(self.parse_expression(ExprContext::Statement)?);
        }
        node.push_token(self.expect_symbol(Symbol::Semicolon)?);
        Ok(node)
    }

    // --- Expressions ---

    /// `term (binaryOp term)*`
    ///
    /// Stops in front of one of the terminators of `ctx` without consuming it;
    /// any other token after a complete term is an error.
    pub fn parse_expression(&mut self, ctx: ExprContext) -> Result<Node> {
        let mut node = self.enter(NodeKind::Expression);
        node.push_node(self.parse_term()?);

        loop {
            match self.current() {
                Some(token) if token.symbol().is_some_and(Symbol::is_binary_op) => {
                    node.push_token(self.expect_with(|_| true, "expected an operator")?);
                    node.push_node(self.parse_term()?);
                }
                Some(token) if ctx.is_terminator(token) => return Ok(node),
                _ => return Err(self.error_here(&format!("expected an operator or {}", ctx.expected()))),
            }
        }
    }

    /// ```text
    /// integerConstant | stringConstant | keywordConstant | identifier
    ///   | identifier '[' expression ']' | subroutineCall
    ///   | '(' expression ')' | unaryOp term
    /// ```
    ///
    /// Bracketed sub-expressions open their own context and this rule
    /// consumes their closing delimiter.
    pub fn parse_term(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::Term);
        let kind = match self.current() {
            Some(token) => token.kind,
            None => return Err(self.error_here("expected a term")),
        };

        match kind {
            TokenKind::IntegerConstant(_) | TokenKind::StringConstant => {
                node.push_token(self.expect_with(|_| true, "expected a term")?);
            }
            TokenKind::Keyword(keyword) if keyword.is_constant() => {
                node.push_token(self.expect_keyword(keyword)?);
            }
            TokenKind::Identifier => {
                node.push_token(self.expect_identifier()?);
                if self.at_symbol(Symbol::LBracket) {
                    node.push_token(self.expect_symbol(Symbol::LBracket)?);
                    node.push_node(self.parse_expression(ExprContext::Index)?);
                    node.push_token(self.expect_symbol(Symbol::RBracket)?);
                } else if self.at_symbol(Symbol::LParen) || self.at_symbol(Symbol::Dot) {
                    self.parse_call_rest(&mut node)?;
                }
            }
            TokenKind::Symbol(Symbol::LParen) => {
                node.push_token(self.expect_symbol(Symbol::LParen)?);
                node.push_node(self.parse_expression(ExprContext::Parenthesized)?);
                node.push_token(self.expect_symbol(Symbol::RParen)?);
            }
            TokenKind::Symbol(symbol) if symbol.is_unary_op() => {
                node.push_token(self.expect_symbol(symbol)?);
                node.push_node(self.parse_term()?);
            }
            _ => return Err(self.error_here("expected a term")),
        }

        Ok(node)
    }

    /// Remainder of `subroutineCall` once its first identifier is in `node`:
    /// `('.' identifier)? '(' expressionList ')'`
    fn parse_call_rest(&mut self, node: &mut Node) -> Result<()> {
        if self.at_symbol(Symbol::Dot) {
            node.push_token(self.expect_symbol(Symbol::Dot)?);
            node.push_token(self.expect_identifier()?);
        }
        node.push_token(self.expect_with(|t| t.is_symbol(Symbol::LParen), "expected '(' or '.'")?);
        node.push_node(self.parse_expression_list()?);
        node.push_token(self.expect_symbol(Symbol::RParen)?);
        Ok(())
    }

    /// `( expression (',' expression)* )?`
    pub fn parse_expression_list(&mut self) -> Result<Node> {
        let mut node = self.enter(NodeKind::ExpressionList);
        if self.at_symbol(Symbol::RParen) {
            return Ok(node);
        }

        loop {
            node.push_node(self.parse_expression(ExprContext::Argument)?);
            if !self.at_symbol(Symbol::Comma) {
                break;
            }
            node.push_token(self.expect_symbol(Symbol::Comma)?);
        }
        Ok(node)
    }
}
