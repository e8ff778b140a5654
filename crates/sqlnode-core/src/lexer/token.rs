//! Token types for the SQL lexer.

use core::fmt;

use super::Span;

macro_rules! keywords {
    ($($name:ident => $text:literal),+ $(,)?) => {
        /// Reserved SQL keywords.
        ///
        /// Words that only matter in one position (`NULLS`, `ESCAPE`, `IF`,
        /// type names, aggregate names, ...) are not reserved; they lex as
        /// identifiers and the grammar matches them in context.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "`")]
                $name,
            )+
        }

        impl Keyword {
            /// Looks up a reserved word, ignoring ASCII case.
            #[must_use]
            pub fn lookup(word: &str) -> Option<Self> {
                match word.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$name),)+
                    _ => None,
                }
            }

            /// Returns the keyword as written in upper case.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$name => $text,)+
                }
            }
        }
    };
}

keywords! {
    Select => "SELECT",
    From => "FROM",
    Where => "WHERE",
    Order => "ORDER",
    By => "BY",
    Group => "GROUP",
    Having => "HAVING",
    Limit => "LIMIT",
    Offset => "OFFSET",
    Distinct => "DISTINCT",
    All => "ALL",
    Join => "JOIN",
    Inner => "INNER",
    Left => "LEFT",
    Right => "RIGHT",
    Full => "FULL",
    Outer => "OUTER",
    Cross => "CROSS",
    On => "ON",
    Using => "USING",
    Union => "UNION",
    Intersect => "INTERSECT",
    Except => "EXCEPT",
    Insert => "INSERT",
    Into => "INTO",
    Values => "VALUES",
    Update => "UPDATE",
    Set => "SET",
    Delete => "DELETE",
    Create => "CREATE",
    Drop => "DROP",
    Table => "TABLE",
    Default => "DEFAULT",
    Call => "CALL",
    And => "AND",
    Or => "OR",
    Not => "NOT",
    In => "IN",
    Between => "BETWEEN",
    Like => "LIKE",
    Is => "IS",
    Null => "NULL",
    True => "TRUE",
    False => "FALSE",
    Exists => "EXISTS",
    Asc => "ASC",
    Desc => "DESC",
    As => "AS",
    Case => "CASE",
    When => "WHEN",
    Then => "THEN",
    Else => "ELSE",
    End => "END",
    Cast => "CAST",
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal that fits `i64`.
    Integer(i64),
    /// Exact numeric literal: has a decimal point or overflows `i64`.
    Decimal(String),
    /// Approximate numeric literal (has an exponent).
    Float(f64),
    /// String literal, unescaped.
    String(String),

    // Identifiers and keywords
    /// Unquoted identifier, cased per the configured policy.
    Identifier(String),
    /// Quoted identifier, verbatim.
    QuotedIdentifier(String),
    /// Reserved keyword.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// &&
    DoubleAmpersand,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ^
    BitXor,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(text) => f.write_str(text),
            Self::Float(value) => write!(f, "{value:e}"),
            Self::String(value) => write!(f, "'{value}'"),
            Self::Identifier(name) => f.write_str(name),
            Self::QuotedIdentifier(name) => write!(f, "\"{name}\""),
            Self::Keyword(keyword) => f.write_str(keyword.as_str()),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Eq => f.write_str("="),
            Self::NotEq => f.write_str("<>"),
            Self::Lt => f.write_str("<"),
            Self::LtEq => f.write_str("<="),
            Self::Gt => f.write_str(">"),
            Self::GtEq => f.write_str(">="),
            Self::Concat => f.write_str("||"),
            Self::DoubleAmpersand => f.write_str("&&"),
            Self::BitAnd => f.write_str("&"),
            Self::BitOr => f.write_str("|"),
            Self::BitXor => f.write_str("^"),
            Self::BitNot => f.write_str("~"),
            Self::LeftShift => f.write_str("<<"),
            Self::RightShift => f.write_str(">>"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
            Self::Semicolon => f.write_str(";"),
            Self::Dot => f.write_str("."),
            Self::Question => f.write_str("?"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its location in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Character range in the source.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character, counted in characters.
    pub column: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span, line: usize, column: usize) -> Self {
        Self {
            kind,
            span,
            line,
            column,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this is the unquoted word `word`, in any case.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_ignores_case() {
        assert_eq!(Keyword::lookup("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("nulls"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Call.as_str(), "CALL");
        assert_eq!(Keyword::Where.to_string(), "WHERE");
    }

    #[test]
    fn test_contextual_word() {
        let token = Token::new(TokenKind::Identifier("nulls".into()), Span::new(0, 5), 1, 1);
        assert!(token.is_word("NULLS"));
        let quoted = Token::new(
            TokenKind::QuotedIdentifier("nulls".into()),
            Span::new(0, 7),
            1,
            1,
        );
        assert!(!quoted.is_word("NULLS"));
    }
}
