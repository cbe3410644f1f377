//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for tokenizing, parsing and semantic analysis
//! - Separation of user diagnostics from internal generator failures
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
