use crate::{
    ast::ast::{Expr, Operator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(next_bp) = parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
        .filter(|next_bp| *next_bp > bp)
    {
        let led = match parser.get_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Number => {
            let value = token.value.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            parser.checker.integer(value, token.span)
        }
        TokenKind::String => parser.checker.string(&token.value, token.span),
        TokenKind::Identifier => {
            if parser.current_token_kind() == TokenKind::OpenParen {
                parse_call_expr(parser, token.value, token.span)
            } else {
                parser.checker.identifier(&token.value, token.span)
            }
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

/// `name(args)`. Only a bare name can be called, so calls are recognised
/// at the name rather than as a postfix operator.
fn parse_call_expr(parser: &mut Parser, name: String, name_span: Span) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
    let span = parser.span_from(name_span.start);

    parser.checker.call(&name, arguments, span)
}

/// Comma-separated expressions up to and including `close`.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    while parser.current_token_kind() != close {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != close {
            return Err(parser.unexpected_detailed("expected `,` or a closing bracket"));
        }
    }

    parser.expect(close)?;
    Ok(items)
}

fn binary_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Or => Some(Operator::Or),
        TokenKind::And => Some(Operator::And),
        TokenKind::Less => Some(Operator::Less),
        TokenKind::LessEquals => Some(Operator::LessEquals),
        TokenKind::Greater => Some(Operator::Greater),
        TokenKind::GreaterEquals => Some(Operator::GreaterEquals),
        TokenKind::Equals => Some(Operator::Equals),
        TokenKind::NotEquals => Some(Operator::NotEquals),
        TokenKind::Pipe => Some(Operator::BitOr),
        TokenKind::Caret => Some(Operator::BitXor),
        TokenKind::Ampersand => Some(Operator::BitAnd),
        TokenKind::ShiftLeft => Some(Operator::ShiftLeft),
        TokenKind::ShiftRight => Some(Operator::ShiftRight),
        TokenKind::Plus => Some(Operator::Add),
        TokenKind::Dash => Some(Operator::Subtract),
        TokenKind::Star => Some(Operator::Multiply),
        TokenKind::Slash | TokenKind::SlashSlash => Some(Operator::Divide),
        _ => None,
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = binary_operator(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;
    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    parser.checker.binary(left, operator, right, span)
}

/// `a % b` is spelled as a call to the `modulus` built-in.
pub fn parse_modulus_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let right = parse_expr(parser, bp)?;
    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    parser.checker.call("modulus", vec![left, right], span)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let (operator, bp) = match operator_token.kind {
        TokenKind::Not => (Operator::Not, BindingPower::Not),
        TokenKind::Tilde => (Operator::BitNot, BindingPower::Unary),
        _ => (Operator::Subtract, BindingPower::Unary),
    };

    let operand = parse_expr(parser, bp)?;
    let span = Span {
        start: operator_token.span.start.clone(),
        end: operand.span.end.clone(),
    };

    parser.checker.unary(operator, operand, span)
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;
    let span = parser.span_from(start);

    parser.checker.list(elements, span)
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let span = parser.span_from(left.span.start.clone());
    parser.checker.index(left, index, span)
}
