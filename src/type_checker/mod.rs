//! Semantic analysis.
//!
//! The checker is the construction context the parser builds the tree
//! through. It owns the program arenas while they grow:
//!
//! - scope: scope tables and their parent links
//! - definitions: variables, parameters, functions and built-ins
//! - builtins: the built-in library and its argument rules
//! - program: the arenas plus type queries and type propagation
//! - type_checker: the construction context itself
//! - expressions / statements: node constructors, one per node kind

pub mod builtins;
pub mod definitions;
pub mod expressions;
pub mod program;
pub mod scope;
pub mod statements;
pub mod type_checker;
