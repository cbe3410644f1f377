//! Lexical analysis module for the compiler.
//!
//! Converts source text into a stream of tokens for parsing:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Indentation turned into `Newline`, `Indent` and `Dedent` tokens
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
