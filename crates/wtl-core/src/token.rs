#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKind {
    LeftBrace,
    RightBrace,
    LeftParenthesis,
    RightParenthesis,
    Semicolon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Identifier,
    StringLiteral,
    Number,
    Boolean,
    HexLiteral,
    Placeholder,
}

/// One lexed token. Offsets and lengths are UTF-16 code units into the
/// source the token came from; tokens are produced in source order and
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Structural {
        kind: StructuralKind,
        offset: usize,
        length: usize,
    },
    Value {
        kind: ValueKind,
        value: String,
        offset: usize,
        length: usize,
    },
}

impl Token {
    pub fn offset(&self) -> usize {
        match self {
            Token::Structural { offset, .. } | Token::Value { offset, .. } => *offset,
        }
    }

    pub fn length(&self) -> usize {
        match self {
            Token::Structural { length, .. } | Token::Value { length, .. } => *length,
        }
    }

    pub fn end(&self) -> usize {
        self.offset() + self.length()
    }

    pub fn structural_kind(&self) -> Option<StructuralKind> {
        match self {
            Token::Structural { kind, .. } => Some(*kind),
            Token::Value { .. } => None,
        }
    }

    pub fn value_kind(&self) -> Option<ValueKind> {
        match self {
            Token::Value { kind, .. } => Some(*kind),
            Token::Structural { .. } => None,
        }
    }

    pub fn value_text(&self) -> Option<&str> {
        match self {
            Token::Value { value, .. } => Some(value.as_str()),
            Token::Structural { .. } => None,
        }
    }

    pub fn is_structural(&self, expected: StructuralKind) -> bool {
        self.structural_kind() == Some(expected)
    }
}
