//! Operator precedence and recovery tables

use crate::token::TokenKind;

/// Binding power, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Assignment,
    Conditional,
    Logical,
    Comparison,
    Bitwise,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
    Attribute,
}

impl Precedence {
    /// Precedence of a token in infix position, if it is an infix operator.
    pub fn of_infix(kind: TokenKind) -> Option<Self> {
        use TokenKind::*;
        let precedence = match kind {
            k if k.is_assignment() => Precedence::Assignment,
            If => Precedence::Conditional,
            And | Or | AndAnd | OrOr => Precedence::Logical,
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual | In | Is => {
                Precedence::Comparison
            }
            Amp | Pipe | Caret | Shl | Shr => Precedence::Bitwise,
            Plus | Minus => Precedence::Sum,
            Star | Slash | Percent | Power | As => Precedence::Product,
            LParen => Precedence::Call,
            LBracket => Precedence::Index,
            Dot => Precedence::Attribute,
            _ => return None,
        };
        Some(precedence)
    }
}

/// Precedence of a binary or assignment operator by its spelling.
pub fn operator_precedence(operator: &str) -> Option<Precedence> {
    let precedence = match operator {
        "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "&=" | "|=" | "^=" | "<<=" | ">>=" | "**=" => {
            Precedence::Assignment
        }
        "and" | "or" | "&&" | "||" => Precedence::Logical,
        "==" | "!=" | "<" | ">" | "<=" | ">=" | "in" | "not in" | "is" | "is not" => {
            Precedence::Comparison
        }
        "&" | "|" | "^" | "<<" | ">>" => Precedence::Bitwise,
        "+" | "-" => Precedence::Sum,
        "*" | "/" | "%" | "**" | "as" => Precedence::Product,
        _ => return None,
    };
    Some(precedence)
}

/// Tokens panic-mode recovery stops at.
pub const SYNC_TOKENS: &[TokenKind] = &[
    TokenKind::Newline,
    TokenKind::Semicolon,
    TokenKind::Class,
    TokenKind::Func,
    TokenKind::Var,
    TokenKind::Const,
    TokenKind::If,
    TokenKind::For,
    TokenKind::While,
    TokenKind::Match,
    TokenKind::Return,
    TokenKind::Indent,
    TokenKind::Dedent,
    TokenKind::Eof,
];

pub fn is_sync_token(kind: TokenKind) -> bool {
    SYNC_TOKENS.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_agrees_with_spelling() {
        for kind in [TokenKind::Plus, TokenKind::Star, TokenKind::Equal, TokenKind::And, TokenKind::PlusAssign] {
            let text = kind.text().unwrap();
            assert_eq!(Precedence::of_infix(kind), operator_precedence(text), "{}", text);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(Precedence::Assignment < Precedence::Conditional);
        assert!(Precedence::Sum < Precedence::Product);
        assert!(Precedence::Call < Precedence::Attribute);
    }
}
