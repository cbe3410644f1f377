//! Parser module for building the checked program tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions with proper
//! operator precedence and handles:
//!
//! - Statement parsing (assignments, functions, control flow)
//! - Block structure from `Indent` and `Dedent` tokens
//! - Expression parsing (binary ops, calls, lists, indexing, literals)
//! - Type parsing for annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. Each
//! node is built through the `TypeChecker`, so a successful parse is also a
//! successful semantic check.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
