//! Type annotation parsing.
//!
//! Annotations are optional everywhere. The recognised forms are:
//!
//! - `int`, `str`
//! - `None` as a return type
//! - `list[T]` and `T[]` for lists
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing nested annotations.

use std::collections::HashMap;

use crate::{ast::types::Type, errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;
pub type TypeLEDHandler = fn(&mut Parser, Type, BindingPower) -> Result<Type, Error>;

pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::None, parse_none_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<Type, Error> {
    match parser.current_token().value.as_str() {
        "int" => {
            parser.advance();
            Ok(Type::int())
        }
        "str" => {
            parser.advance();
            Ok(Type::Text)
        }
        "list" => {
            parser.advance();
            parser.expect(TokenKind::OpenBracket)?;
            let element = parse_type(parser, BindingPower::Default)?;
            parser.expect(TokenKind::CloseBracket)?;
            Ok(Type::list_of(element))
        }
        _ => Err(parser.unexpected_detailed("expected `int`, `str` or `list[...]`")),
    }
}

pub fn parse_none_type(parser: &mut Parser) -> Result<Type, Error> {
    parser.expect(TokenKind::None)?;
    Ok(Type::Void)
}

/// `T[]`
pub fn parse_array_type(parser: &mut Parser, left: Type, _bp: BindingPower) -> Result<Type, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Type::list_of(left))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<Type, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_detailed("expected a type")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while let Some(next_bp) = parser
        .get_type_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
        .filter(|next_bp| *next_bp > bp)
    {
        let led = match parser.get_type_led_lookup().get(&parser.current_token_kind()) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}
