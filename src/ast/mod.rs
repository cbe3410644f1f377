/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: statement and expression variants, blocks and operators
/// - types: type descriptors attached to expressions and bindings
pub mod ast;
pub mod types;
