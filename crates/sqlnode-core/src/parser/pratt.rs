//! Operator precedence for the Pratt expression loop.
//!
//! Higher binding power binds tighter. Every binary operator is left
//! associative (`left < right`). Operators that belong to an optional
//! feature only exist while that feature is enabled.

use crate::ast::NodeType;
use crate::config::Features;
use crate::lexer::{Keyword, Token, TokenKind};

/// Binding power of `IS`, `IN`, `BETWEEN`, `LIKE` and their `NOT` forms.
pub const PREDICATE: (u8, u8) = (5, 6);

/// Operand binding power of prefix `NOT`.
pub const PREFIX_NOT: u8 = 5;

/// Operand binding power of prefix `-`, `+` and `~`.
pub const PREFIX_UNARY: u8 = 19;

/// Returns the node type and `(left, right)` binding power of an infix
/// operator, or `None` if `token` is not one under `features`.
#[must_use]
pub fn infix_operator(token: &Token, features: Features) -> Option<(NodeType, (u8, u8))> {
    let bit_ops = features.contains(Features::INFIX_BIT_OPERATORS);
    let logical_ops = features.contains(Features::INFIX_LOGICAL_OPERATORS);
    let operator = match &token.kind {
        TokenKind::Keyword(Keyword::Or) => (NodeType::Or, (1, 2)),
        TokenKind::Concat if logical_ops => (NodeType::Or, (1, 2)),

        TokenKind::Keyword(Keyword::And) => (NodeType::And, (3, 4)),
        TokenKind::DoubleAmpersand if logical_ops => (NodeType::And, (3, 4)),

        TokenKind::Eq => (NodeType::BinaryEquals, (5, 6)),
        TokenKind::NotEq => (NodeType::BinaryNotEquals, (5, 6)),
        TokenKind::Lt => (NodeType::BinaryLessThan, (5, 6)),
        TokenKind::LtEq => (NodeType::BinaryLessEquals, (5, 6)),
        TokenKind::Gt => (NodeType::BinaryGreaterThan, (5, 6)),
        TokenKind::GtEq => (NodeType::BinaryGreaterEquals, (5, 6)),

        TokenKind::BitOr if bit_ops => (NodeType::BitOr, (7, 8)),
        TokenKind::BitAnd if bit_ops => (NodeType::BitAnd, (9, 10)),
        TokenKind::LeftShift if bit_ops => (NodeType::LeftShift, (11, 12)),
        TokenKind::RightShift if bit_ops => (NodeType::RightShift, (11, 12)),

        TokenKind::Plus => (NodeType::BinaryPlus, (13, 14)),
        TokenKind::Minus => (NodeType::BinaryMinus, (13, 14)),
        TokenKind::Concat => (NodeType::Concatenation, (13, 14)),

        TokenKind::Star => (NodeType::BinaryTimes, (15, 16)),
        TokenKind::Slash => (NodeType::BinaryDivide, (15, 16)),
        TokenKind::Percent if features.contains(Features::INFIX_MOD) => (NodeType::Mod, (15, 16)),
        TokenKind::Identifier(_)
            if features.contains(Features::DIV_OPERATOR) && token.is_word("DIV") =>
        {
            (NodeType::BinaryDiv, (15, 16))
        }

        TokenKind::BitXor if bit_ops => (NodeType::BitXor, (17, 18)),
        _ => return None,
    };
    Some(operator)
}

/// Returns the node type of a symbolic prefix operator.
#[must_use]
pub fn prefix_operator(kind: &TokenKind, features: Features) -> Option<NodeType> {
    match kind {
        TokenKind::Minus => Some(NodeType::UnaryMinus),
        TokenKind::Plus => Some(NodeType::UnaryPlus),
        TokenKind::BitNot if features.contains(Features::INFIX_BIT_OPERATORS) => {
            Some(NodeType::UnaryBitNot)
        }
        _ => None,
    }
}

/// Returns true for tokens that start a predicate suffix
/// (`IS`, `IN`, `BETWEEN`, `LIKE` or `NOT` before one of the last three).
#[must_use]
pub const fn starts_predicate(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(
            Keyword::Is | Keyword::In | Keyword::Between | Keyword::Like | Keyword::Not
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    fn token(kind: TokenKind) -> Token {
        Token::new(kind, Span::new(0, 1), 1, 1)
    }

    fn power(kind: TokenKind, features: Features) -> (u8, u8) {
        infix_operator(&token(kind), features).unwrap().1
    }

    #[test]
    fn test_precedence_ordering() {
        let features = Features::default();
        let add = power(TokenKind::Plus, features);
        let mul = power(TokenKind::Star, features);
        assert!(mul.0 > add.0);

        let and = power(TokenKind::Keyword(Keyword::And), features);
        let or = power(TokenKind::Keyword(Keyword::Or), features);
        assert!(and.0 > or.0);

        let eq = power(TokenKind::Eq, features);
        assert!(eq.0 > and.0);
        assert_eq!(eq, PREDICATE);
        assert!(PREFIX_NOT > and.0);
        assert!(PREFIX_UNARY > mul.1);
    }

    #[test]
    fn test_left_associativity() {
        let (left, right) = power(TokenKind::Minus, Features::default());
        assert!(left < right);
    }

    #[test]
    fn test_concat_depends_on_logical_operators() {
        let plain = infix_operator(&token(TokenKind::Concat), Features::empty());
        assert_eq!(plain.map(|(ty, _)| ty), Some(NodeType::Concatenation));

        let logical = infix_operator(
            &token(TokenKind::Concat),
            Features::INFIX_LOGICAL_OPERATORS,
        );
        assert_eq!(logical.map(|(ty, _)| ty), Some(NodeType::Or));
        assert!(infix_operator(&token(TokenKind::DoubleAmpersand), Features::empty()).is_none());
    }

    #[test]
    fn test_feature_gated_operators() {
        let percent = token(TokenKind::Percent);
        assert!(infix_operator(&percent, Features::empty()).is_none());
        assert_eq!(
            infix_operator(&percent, Features::INFIX_MOD).map(|(ty, _)| ty),
            Some(NodeType::Mod)
        );

        let div = token(TokenKind::Identifier("div".into()));
        assert!(infix_operator(&div, Features::empty()).is_none());
        assert_eq!(
            infix_operator(&div, Features::DIV_OPERATOR).map(|(ty, _)| ty),
            Some(NodeType::BinaryDiv)
        );

        let amp = token(TokenKind::BitAnd);
        assert!(infix_operator(&amp, Features::default()).is_none());
        assert!(infix_operator(&amp, Features::INFIX_BIT_OPERATORS).is_some());
        assert_eq!(prefix_operator(&TokenKind::BitNot, Features::empty()), None);
    }
}
