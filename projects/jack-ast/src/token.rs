//! Token model and the fixed keyword and symbol tables of the Jack language.

use jack_types::Span;
use std::fmt::{Display, Formatter};

/// The 21 reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    pub fn from_lexeme(lexeme: &str) -> Option<Keyword> {
        let keyword = match lexeme {
            "class" => Keyword::Class,
            "constructor" => Keyword::Constructor,
            "function" => Keyword::Function,
            "method" => Keyword::Method,
            "field" => Keyword::Field,
            "static" => Keyword::Static,
            "var" => Keyword::Var,
            "int" => Keyword::Int,
            "char" => Keyword::Char,
            "boolean" => Keyword::Boolean,
            "void" => Keyword::Void,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            "let" => Keyword::Let,
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "return" => Keyword::Return,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }

    /// `true`, `false`, `null` and `this`.
    pub fn is_constant(self) -> bool {
        matches!(self, Keyword::True | Keyword::False | Keyword::Null | Keyword::This)
    }

    /// Built-in type names usable in declarations.
    pub fn is_primitive_type(self) -> bool {
        matches!(self, Keyword::Int | Keyword::Char | Keyword::Boolean)
    }
}

/// The 19 single-character symbols. The language has no multi-character
/// operators, so every symbol is self-delimiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    Dot,       // .
    Comma,     // ,
    Semicolon, // ;
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Ampersand, // &
    Pipe,      // |
    Less,      // <
    Greater,   // >
    Eq,        // =
    Tilde,     // ~
}

impl Symbol {
    pub const ALL: [Symbol; 19] = [
        Symbol::LBrace,
        Symbol::RBrace,
        Symbol::LParen,
        Symbol::RParen,
        Symbol::LBracket,
        Symbol::RBracket,
        Symbol::Dot,
        Symbol::Comma,
        Symbol::Semicolon,
        Symbol::Plus,
        Symbol::Minus,
        Symbol::Star,
        Symbol::Slash,
        Symbol::Ampersand,
        Symbol::Pipe,
        Symbol::Less,
        Symbol::Greater,
        Symbol::Eq,
        Symbol::Tilde,
    ];

    pub fn from_char(c: char) -> Option<Symbol> {
        let symbol = match c {
            '{' => Symbol::LBrace,
            '}' => Symbol::RBrace,
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            '[' => Symbol::LBracket,
            ']' => Symbol::RBracket,
            '.' => Symbol::Dot,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '&' => Symbol::Ampersand,
            '|' => Symbol::Pipe,
            '<' => Symbol::Less,
            '>' => Symbol::Greater,
            '=' => Symbol::Eq,
            '~' => Symbol::Tilde,
            _ => return None,
        };
        Some(symbol)
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::LBrace => '{',
            Symbol::RBrace => '}',
            Symbol::LParen => '(',
            Symbol::RParen => ')',
            Symbol::LBracket => '[',
            Symbol::RBracket => ']',
            Symbol::Dot => '.',
            Symbol::Comma => ',',
            Symbol::Semicolon => ';',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Star => '*',
            Symbol::Slash => '/',
            Symbol::Ampersand => '&',
            Symbol::Pipe => '|',
            Symbol::Less => '<',
            Symbol::Greater => '>',
            Symbol::Eq => '=',
            Symbol::Tilde => '~',
        }
    }

    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            Symbol::Plus
                | Symbol::Minus
                | Symbol::Star
                | Symbol::Slash
                | Symbol::Ampersand
                | Symbol::Pipe
                | Symbol::Less
                | Symbol::Greater
                | Symbol::Eq
        )
    }

    pub fn is_unary_op(self) -> bool {
        matches!(self, Symbol::Minus | Symbol::Tilde)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(Symbol),
    IntegerConstant(u16),
    StringConstant,
    Identifier,
}

impl TokenKind {
    /// Element name used by the serializers.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::IntegerConstant(_) => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::Identifier => "identifier",
        }
    }
}

/// A classified lexeme. Immutable once the lexer has produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The lexeme; for string constants, the text between the quotes.
    pub text: String,
    pub span: Span,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

/// Renders as `keyword 'class'`, the form used in diagnostics.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Keyword(_) => write!(f, "keyword '{}'", self.text),
            TokenKind::Symbol(_) => write!(f, "'{}'", self.text),
            TokenKind::IntegerConstant(_) => write!(f, "integer constant {}", self.text),
            TokenKind::StringConstant => write!(f, "string constant \"{}\"", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
        }
    }
}
