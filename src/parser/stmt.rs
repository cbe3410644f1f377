use crate::{
    ast::{
        ast::{Block, ConditionalBlock, ExprKind, Operator, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_simple_stmt(parser)
}

/// An assignment or a bare expression, ending the line.
fn parse_simple_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::Identifier {
        let compound = match parser.peek_kind(1) {
            TokenKind::Assignment => Some(None),
            TokenKind::PlusEquals => Some(Some(Operator::Add)),
            TokenKind::MinusEquals => Some(Some(Operator::Subtract)),
            TokenKind::StarEquals => Some(Some(Operator::Multiply)),
            _ => None,
        };

        if let Some(operator) = compound {
            let name_token = parser.advance().clone();
            parser.advance();

            let mut value = parse_expr(parser, BindingPower::Default)?;

            // `x += e` is `x = x + e`
            if let Some(operator) = operator {
                let target = parser
                    .checker
                    .identifier(&name_token.value, name_token.span.clone())?;
                let span = Span {
                    start: name_token.span.start.clone(),
                    end: value.span.end.clone(),
                };
                value = parser.checker.binary(target, operator, value, span)?;
            }

            let span = parser.span_from(start);
            parse_line_end(parser)?;
            return parser
                .checker
                .assignment(&name_token.value, name_token.span, value, span);
        }
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        let span = parser.span_from(start);
        parse_line_end(parser)?;

        return match expr.kind {
            ExprKind::Index { target, index } => {
                parser
                    .checker
                    .index_assignment(*target, *index, value, span)
            }
            _ => Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("="),
                    message: String::from("only names and list elements can be assigned"),
                },
                expr.span.end,
            )),
        };
    }

    let span = parser.span_from(start);
    parse_line_end(parser)?;
    parser.checker.expression_stmt(expr, span)
}

/// Consumes the newline ending a simple statement. A block end or the end
/// of input also ends the line.
fn parse_line_end(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Newline => {
            parser.advance();
            Ok(())
        }
        TokenKind::Dedent | TokenKind::EOF => Ok(()),
        _ => Err(parser.unexpected_detailed("expected the end of the line")),
    }
}

/// The statements after a `:`, either an indented block or a single
/// statement on the same line. Scoping is up to the caller.
fn parse_suite(parser: &mut Parser) -> Result<Block, Error> {
    parser.expect(TokenKind::Colon)?;

    if parser.current_token_kind() != TokenKind::Newline {
        return Ok(Block::new(vec![parse_stmt(parser)?]));
    }

    parser.advance();
    parser.expect_error(
        TokenKind::Indent,
        Some(parser.unexpected_detailed("expected an indented block")),
    )?;

    let mut statements = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Dedent | TokenKind::EOF
    ) {
        statements.push(parse_stmt(parser)?);
    }

    if parser.current_token_kind() == TokenKind::Dedent {
        parser.advance();
    }

    Ok(Block::new(statements))
}

/// A suite in its own block scope.
fn parse_scoped_suite(parser: &mut Parser) -> Result<Block, Error> {
    parser.checker.begin_block();
    let block = parse_suite(parser)?;
    parser.checker.end_block();

    Ok(block)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_scoped_suite(parser)?;

    let mut elifs = vec![];
    while parser.current_token_kind() == TokenKind::Elif {
        parser.advance();
        let condition = parse_expr(parser, BindingPower::Default)?;
        let body = parse_scoped_suite(parser)?;
        elifs.push(ConditionalBlock { condition, body });
    }

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_scoped_suite(parser)?)
    } else {
        None
    };

    let span = parser.span_from(start);
    parser
        .checker
        .if_stmt(condition, body, elifs, else_body, span)
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_scoped_suite(parser)?;

    let span = parser.span_from(start);
    parser.checker.while_stmt(condition, body, span)
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let variable = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected_detailed("expected a loop variable")),
    )?;
    parser.expect(TokenKind::In)?;
    let iterable = parse_expr(parser, BindingPower::Default)?;

    let header = parser
        .checker
        .begin_for(&variable.value, variable.span, iterable)?;
    let body = parse_suite(parser)?;

    let span = parser.span_from(start);
    parser.checker.end_for(header, body, span)
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect_error(
        TokenKind::Identifier,
        Some(parser.unexpected_detailed("expected a function name")),
    )?;
    parser.expect(TokenKind::OpenParen)?;

    let mut params: Vec<(String, Option<Type>, Span)> = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let param = parser.expect_error(
            TokenKind::Identifier,
            Some(parser.unexpected_detailed("expected a parameter name")),
        )?;

        let param_type = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            let type_position = parser.get_position();
            let param_type = parse_type(parser, BindingPower::Default)?;
            if param_type.is_void() {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: String::from("None"),
                        message: String::from("a parameter cannot be None"),
                    },
                    type_position,
                ));
            }
            Some(param_type)
        } else {
            None
        };

        params.push((param.value, param_type, param.span));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected_detailed("expected `,` or `)`"));
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let span = parser.span_from(start);
    let header = parser
        .checker
        .begin_function(&name.value, params, return_type, span)?;
    let body = parse_suite(parser)?;

    parser.checker.end_function(header, body)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if matches!(
        parser.current_token_kind(),
        TokenKind::Newline | TokenKind::Dedent | TokenKind::EOF
    ) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    let span = parser.span_from(start);
    parse_line_end(parser)?;
    parser.checker.return_stmt(value, span)
}

pub fn parse_pass_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    parse_line_end(parser)?;
    parser.checker.pass_stmt(span)
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    parse_line_end(parser)?;
    parser.checker.break_stmt(span)
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let span = parser.advance().span.clone();
    parse_line_end(parser)?;
    parser.checker.continue_stmt(span)
}
