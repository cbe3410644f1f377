//! Main compiler module.
//!
//! Walks a constructed `Program` and renders it as one target-language
//! translation unit. Construction has already resolved every name and type,
//! so generation only reads the program. The one piece of state it keeps is
//! the set of variables whose declaration has been emitted, so that the
//! first assignment of a variable carries its type and later ones do not.

use std::{collections::HashSet, time::Instant};

use log::info;

use crate::{
    config::Config,
    errors::errors::{At, Error},
    type_checker::{
        definitions::{DefId, FunctionDecl},
        program::Program,
    },
};

use super::stmt::gen_block;

const INDENT: &str = "  ";

pub struct Compiler<'a> {
    /// The program being rendered
    pub program: &'a Program,
    pub config: &'a Config,
    /// Generated text so far
    pub output: String,
    /// Variables whose declaration has been emitted
    pub declared: HashSet<DefId>,
}

impl<'a> Compiler<'a> {
    pub fn new(program: &'a Program, config: &'a Config) -> Self {
        Compiler {
            program,
            config,
            output: String::new(),
            declared: HashSet::new(),
        }
    }

    pub fn write_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.output.push_str(INDENT);
        }
    }

    /// Writes one full line at the given indentation.
    pub fn write_line(&mut self, level: usize, line: &str) {
        self.write_indent(level);
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// Parameter list as `T a,U b`.
    pub fn gen_params(&self, function: &FunctionDecl) -> Result<String, Error> {
        let params = function
            .params
            .iter()
            .map(|param| {
                Ok(format!(
                    "{} {}",
                    param.param_type.canonical_name().at(&param.position)?,
                    param.name
                ))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(params.join(","))
    }

    /// `T name(params)`, shared by forward declarations and definitions.
    pub fn gen_signature(&self, function: &FunctionDecl) -> Result<String, Error> {
        Ok(format!(
            "{} {}({})",
            function
                .return_type
                .canonical_name()
                .at(&function.position)?,
            function.name,
            self.gen_params(function)?
        ))
    }

    /// Lays out the whole translation unit: the runtime include, forward
    /// declarations for top-level functions, `main` holding the root
    /// statements, then the top-level function definitions.
    pub fn gen_program(&mut self) -> Result<(), Error> {
        if let Some(header) = &self.config.runtime_header {
            self.output.push_str(&format!("#include \"{}\"\n\n", header));
        }

        let program = self.program;
        let functions: Vec<&FunctionDecl> = program.top_level_functions().collect();

        if !functions.is_empty() {
            for function in &functions {
                let signature = self.gen_signature(function)?;
                self.write_line(0, &format!("{};", signature));
            }
            self.output.push('\n');
        }

        let body = &program.body;
        if self.config.wrap_main {
            self.write_line(0, "int main() {");
            gen_block(self, body, 1)?;
            self.write_line(0, "}");
        } else {
            gen_block(self, body, 0)?;
        }

        for function in functions {
            self.output.push('\n');
            let signature = self.gen_signature(function)?;
            self.write_line(0, &format!("{} {{", signature));
            gen_block(self, &function.body, 1)?;
            self.write_line(0, "}");
        }

        Ok(())
    }
}

/// Renders a constructed program.
///
/// Any failure here means construction let through something it should
/// have rejected, so errors come back as internal errors.
pub fn compile(program: &Program, config: &Config) -> Result<String, Error> {
    let start = Instant::now();

    let mut compiler = Compiler::new(program, config);
    compiler.gen_program().map_err(Error::into_internal)?;

    info!(
        "Generated {} bytes in {:.2?}",
        compiler.output.len(),
        start.elapsed()
    );

    Ok(compiler.output)
}
