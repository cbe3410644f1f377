use std::{rc::Rc, time::Instant};

use lazy_static::lazy_static;
use log::{info, trace};
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Every pattern is a fixed literal, anchored at the cursor
        regex: Regex::new(regex).unwrap(),
        handler,
    }
}

lazy_static! {
    /// Tried in order at the cursor, so longer operators come before their
    /// prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^\\r?\\n(?:[ \\t]*(?:#[^\\n]*)?\\r?\\n)*[ \\t]*", newline_handler),
        pattern("^[ \\t]+", skip_handler),
        pattern("^\\\\\\r?\\n", skip_handler),
        pattern("^#[^\\n]*", skip_handler),
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("^[0-9]+", number_handler),
        pattern("^\"(?:[^\"\\\\\\n]|\\\\.)*\"", string_handler),
        pattern("^'(?:[^'\\\\\\n]|\\\\.)*'", string_handler),
        pattern("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("^<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern("^>>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("^&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("^\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern("^\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern("^~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        pattern("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("^->", MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")),
        pattern("^\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern("^-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern("^\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("^//", MK_DEFAULT_HANDLER!(TokenKind::SlashSlash, "//")),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
    /// Widths of the open indented blocks, innermost last
    indent_stack: Vec<usize>,
    /// Open parentheses and brackets; line breaks inside them are ignored
    nesting: usize,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file: file_name,
            indent_stack: vec![0],
            nesting: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        match token.kind {
            TokenKind::OpenParen | TokenKind::OpenBracket => self.nesting += 1,
            TokenKind::CloseParen | TokenKind::CloseBracket => {
                self.nesting = self.nesting.saturating_sub(1)
            }
            _ => {}
        }

        trace!("{} {:?}", token.kind, token.value);
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span of the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| found.as_str().to_string())
            .unwrap_or_default()
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind)
    }

    /// Ends the current logical line, unless nothing is on it.
    fn push_newline(&mut self) {
        if !matches!(
            self.last_kind(),
            None | Some(TokenKind::Newline) | Some(TokenKind::Indent) | Some(TokenKind::Dedent)
        ) {
            let span = self.span_of(0);
            self.push(MK_TOKEN!(TokenKind::Newline, String::from("\\n"), span));
        }
    }

    /// Opens or closes blocks so that the innermost open block has `width`.
    fn indent_to(&mut self, width: usize) -> Result<(), Error> {
        let current = self.indent_stack.last().copied().unwrap_or(0);

        if width > current {
            self.indent_stack.push(width);
            let span = self.span_of(0);
            self.push(MK_TOKEN!(TokenKind::Indent, String::new(), span));
            return Ok(());
        }

        while width < self.indent_stack.last().copied().unwrap_or(0) {
            self.indent_stack.pop();
            let span = self.span_of(0);
            self.push(MK_TOKEN!(TokenKind::Dedent, String::new(), span));
        }

        if self.indent_stack.last().copied().unwrap_or(0) != width {
            return Err(Error::new(
                ErrorImpl::InconsistentIndentation { width },
                self.position(),
            ));
        }

        Ok(())
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    Ok(())
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());

    if lexer.nesting > 0 {
        return Ok(());
    }

    lexer.push_newline();

    // Trailing blank lines and a final comment open no block
    let rest = lexer.remainder();
    if rest.is_empty() || (rest.starts_with('#') && !rest.contains('\n')) {
        return Ok(());
    }

    let width = matched
        .rsplit('\n')
        .next()
        .map(|indent| indent.len())
        .unwrap_or(0);
    lexer.indent_to(width)
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
    Ok(())
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = lexer.matched(regex);
    let span = lexer.span_of(matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, matched, span));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = lexer.matched(regex);
    let span = lexer.span_of(value.len());
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let start = Instant::now();
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex
                .remainder()
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default();
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken { token },
                lex.position(),
            ));
        }
    }

    lex.push_newline();
    while lex.indent_stack.len() > 1 {
        lex.indent_stack.pop();
        let span = lex.span_of(0);
        lex.push(MK_TOKEN!(TokenKind::Dedent, String::new(), span));
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));

    info!(
        "Tokenized {} into {} tokens in {:.2?}",
        lex.file,
        lex.tokens.len(),
        start.elapsed()
    );
    Ok(lex.tokens)
}
