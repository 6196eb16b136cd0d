use ast::ast::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Then,
    Else,
    Let,
    In,
    Of,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Keyword> {
        match word {
            "if" => Some(Keyword::If),
            "then" => Some(Keyword::Then),
            "else" => Some(Keyword::Else),
            "let" => Some(Keyword::Let),
            "in" => Some(Keyword::In),
            "of" => Some(Keyword::Of),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier,
    Bool(bool),
    Int(i64),
    /// Decoded code points of a string literal.
    Str(Vec<i64>),
    Keyword(Keyword),
    Operator,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    /// True for an operator or punctuation token spelled `symbol`.
    pub fn is(&self, symbol: &str) -> bool {
        matches!(self.kind, TokenKind::Operator | TokenKind::Punctuation) && self.text == symbol
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Human readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier '{}'", self.text),
            TokenKind::Bool(_) => format!("boolean '{}'", self.text),
            TokenKind::Int(_) => format!("integer '{}'", self.text),
            TokenKind::Str(_) => format!("string {}", self.text),
            TokenKind::Keyword(_) => format!("keyword '{}'", self.text),
            TokenKind::Operator | TokenKind::Punctuation => format!("'{}'", self.text),
        }
    }
}
