//! SQL tokenizer.

use super::{Keyword, Span, Token, TokenKind};
use crate::config::{Features, IdentifierCase, ParserConfig};

/// A character sequence that does not form a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct LexError {
    /// What went wrong.
    pub message: String,
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column of the offending character, counted in characters.
    pub column: usize,
}

/// A reusable lexer.
///
/// The lexer keeps its character buffer between inputs: [`Lexer::reset`]
/// refills it in place, so a long-lived parser does not reallocate for
/// every statement it reads. Offsets, lines and columns are all counted in
/// characters.
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    identifier_case: IdentifierCase,
    double_quoted_strings: bool,
}

/// Start position of the token being scanned.
#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Creates a lexer with an empty input.
    #[must_use]
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            chars: Vec::new(),
            pos: 0,
            line: 1,
            column: 1,
            identifier_case: config.identifier_case,
            double_quoted_strings: config.has(Features::DOUBLE_QUOTED_STRING),
        }
    }

    /// Starts over on `input`, picking up the current configuration.
    pub fn reset(&mut self, input: &str, config: &ParserConfig) {
        self.chars.clear();
        self.chars.extend(input.chars());
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.identifier_case = config.identifier_case;
        self.double_quoted_strings = config.has(Features::DOUBLE_QUOTED_STRING);
    }

    #[cfg(test)]
    fn buffer_capacity(&self) -> usize {
        self.chars.capacity()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    const fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn error_at(mark: Mark, message: impl Into<String>) -> LexError {
        LexError {
            message: message.into(),
            line: mark.line,
            column: mark.column,
        }
    }

    fn token(&self, mark: Mark, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(mark.pos, self.pos), mark.line, mark.column)
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let mark = self.mark();
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(Self::error_at(mark, "unterminated comment")),
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    fn scan_identifier(&mut self, mark: Mark) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }
        let text = self.text_from(mark.pos);
        let kind = Keyword::lookup(&text).map_or_else(
            || TokenKind::Identifier(self.identifier_case.apply(&text)),
            TokenKind::Keyword,
        );
        self.token(mark, kind)
    }

    /// Scans up to the closing `quote`, undoubling escaped quotes.
    fn scan_quoted(&mut self, mark: Mark, quote: char, what: &str) -> Result<String, LexError> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                Some(c) => value.push(c),
                None => return Err(Self::error_at(mark, format!("unterminated {what}"))),
            }
        }
    }

    fn scan_quoted_identifier(&mut self, mark: Mark, quote: char) -> Result<Token, LexError> {
        let name = self.scan_quoted(mark, quote, "quoted identifier")?;
        if name.is_empty() {
            return Err(Self::error_at(mark, "zero-length quoted identifier"));
        }
        Ok(self.token(mark, TokenKind::QuotedIdentifier(name)))
    }

    fn skip_digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            count += 1;
        }
        count
    }

    fn malformed_number(&self, mark: Mark) -> LexError {
        Self::error_at(
            mark,
            format!("malformed number '{}'", self.text_from(mark.pos)),
        )
    }

    fn scan_number(&mut self, mark: Mark) -> Result<Token, LexError> {
        let integer_digits = self.skip_digits();
        let mut exact_fraction = false;
        if self.peek() == Some('.') {
            self.advance();
            let fraction_digits = self.skip_digits();
            if integer_digits + fraction_digits == 0 {
                return Err(self.malformed_number(mark));
            }
            exact_fraction = true;
        }

        let mut exponent = false;
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(self.malformed_number(mark));
            }
            exponent = true;
        }

        if self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
            return Err(self.malformed_number(mark));
        }

        let text = self.text_from(mark.pos);
        let kind = if exponent {
            let value = text
                .parse::<f64>()
                .map_err(|_| self.malformed_number(mark))?;
            if !value.is_finite() {
                return Err(Self::error_at(
                    mark,
                    format!("numeric literal '{text}' is outside the range of DOUBLE"),
                ));
            }
            TokenKind::Float(value)
        } else if exact_fraction {
            TokenKind::Decimal(text)
        } else {
            match text.parse::<i64>() {
                Ok(value) => TokenKind::Integer(value),
                Err(_) => TokenKind::Decimal(text),
            }
        };
        Ok(self.token(mark, kind))
    }

    fn single(&mut self, mark: Mark, kind: TokenKind) -> Token {
        self.advance();
        self.token(mark, kind)
    }

    fn either(&mut self, mark: Mark, next: char, double: TokenKind, single: TokenKind) -> Token {
        self.advance();
        if self.peek() == Some(next) {
            self.advance();
            self.token(mark, double)
        } else {
            self.token(mark, single)
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for unterminated strings, quoted identifiers
    /// and comments, malformed numbers and characters that start no token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        let mark = self.mark();

        let Some(c) = self.peek() else {
            return Ok(self.token(mark, TokenKind::Eof));
        };

        let token = match c {
            '(' => self.single(mark, TokenKind::LeftParen),
            ')' => self.single(mark, TokenKind::RightParen),
            ',' => self.single(mark, TokenKind::Comma),
            ';' => self.single(mark, TokenKind::Semicolon),
            '+' => self.single(mark, TokenKind::Plus),
            '-' => self.single(mark, TokenKind::Minus),
            '*' => self.single(mark, TokenKind::Star),
            '/' => self.single(mark, TokenKind::Slash),
            '%' => self.single(mark, TokenKind::Percent),
            '=' => self.single(mark, TokenKind::Eq),
            '~' => self.single(mark, TokenKind::BitNot),
            '^' => self.single(mark, TokenKind::BitXor),
            '?' => self.single(mark, TokenKind::Question),
            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number(mark)?
            }
            '.' => self.single(mark, TokenKind::Dot),
            '<' => {
                self.advance();
                match self.peek() {
                    Some('=') => self.single(mark, TokenKind::LtEq),
                    Some('>') => self.single(mark, TokenKind::NotEq),
                    Some('<') => self.single(mark, TokenKind::LeftShift),
                    _ => self.token(mark, TokenKind::Lt),
                }
            }
            '>' => {
                self.advance();
                match self.peek() {
                    Some('=') => self.single(mark, TokenKind::GtEq),
                    Some('>') => self.single(mark, TokenKind::RightShift),
                    _ => self.token(mark, TokenKind::Gt),
                }
            }
            '!' if self.peek_next() == Some('=') => {
                self.advance();
                self.single(mark, TokenKind::NotEq)
            }
            '|' => self.either(mark, '|', TokenKind::Concat, TokenKind::BitOr),
            '&' => self.either(mark, '&', TokenKind::DoubleAmpersand, TokenKind::BitAnd),
            '\'' => {
                let value = self.scan_quoted(mark, '\'', "string literal")?;
                self.token(mark, TokenKind::String(value))
            }
            '"' if self.double_quoted_strings => {
                let value = self.scan_quoted(mark, '"', "string literal")?;
                self.token(mark, TokenKind::String(value))
            }
            '"' | '`' => self.scan_quoted_identifier(mark, c)?,
            c if c.is_ascii_digit() => self.scan_number(mark)?,
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(mark),
            c => return Err(Self::error_at(mark, format!("unexpected character '{c}'"))),
        };
        Ok(token)
    }

    /// Scans the remaining input, ending with an EOF token.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_with(input: &str, config: &ParserConfig) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(config);
        lexer.reset(input, config);
        lexer.tokenize()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex_with(input, &ParserConfig::default())
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds("  \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("SELECT -- comment\n /* block */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_casing() {
        assert_eq!(
            kinds("Price \"Price\" `Mixed`"),
            vec![
                TokenKind::Identifier("price".into()),
                TokenKind::QuotedIdentifier("Price".into()),
                TokenKind::QuotedIdentifier("Mixed".into()),
                TokenKind::Eof,
            ]
        );

        let upper = ParserConfig::new().with_identifier_case(IdentifierCase::Upper);
        let tokens = lex_with("price", &upper).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier("PRICE".into()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.25 .5 1e3 9223372036854775808"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Decimal("3.25".into()),
                TokenKind::Decimal(".5".into()),
                TokenKind::Float(1000.0),
                TokenKind::Decimal("9223372036854775808".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("<> != <= >= << >> || && & | ^ ~"),
            vec![
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::Concat,
                TokenKind::DoubleAmpersand,
                TokenKind::BitAnd,
                TokenKind::BitOr,
                TokenKind::BitXor,
                TokenKind::BitNot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds("'it''s'"),
            vec![TokenKind::String("it's".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_double_quoted_string_feature() {
        let config = ParserConfig::new().enable(Features::DOUBLE_QUOTED_STRING);
        let tokens = lex_with("\"abc\"", &config).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("abc".into()));
    }

    #[test]
    fn test_positions_are_in_characters() {
        let tokens = lex_with("SELECT 'é'\n  , x", &ParserConfig::default()).unwrap();
        assert_eq!(tokens[1].span, Span::new(7, 10));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!(tokens[3].span, Span::new(15, 16));
    }

    #[test]
    fn test_lexical_errors() {
        let config = ParserConfig::default();
        let err = lex_with("SELECT 'open", &config).unwrap_err();
        assert_eq!((err.line, err.column), (1, 8));
        assert!(err.message.contains("unterminated string literal"));

        let err = lex_with("SELECT\n  12abc", &config).unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));

        let err = lex_with("SELECT #", &config).unwrap_err();
        assert!(err.message.contains("unexpected character"));

        let err = lex_with("SELECT 2e308", &config).unwrap_err();
        assert_eq!((err.line, err.column), (1, 8));
        assert!(err.message.contains("outside the range of DOUBLE"));
    }

    #[test]
    fn test_reset_reuses_buffer() {
        let config = ParserConfig::default();
        let mut lexer = Lexer::new(&config);
        lexer.reset("SELECT a, b, c FROM some_table", &config);
        lexer.tokenize().unwrap();
        let capacity = lexer.buffer_capacity();
        lexer.reset("SELECT 1", &config);
        assert_eq!(lexer.buffer_capacity(), capacity);
        assert_eq!(lexer.tokenize().unwrap().len(), 3);
    }
}
