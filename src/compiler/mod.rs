//! Code generation.
//!
//! Renders a constructed program as target-language text:
//!
//! - compiler: the generator state and the translation unit layout
//! - stmt: statements, blocks and nested functions
//! - expr: expressions and `for` loop headers
//! - stdlib: calls to built-in functions

pub mod compiler;
pub mod expr;
pub mod stdlib;
pub mod stmt;
