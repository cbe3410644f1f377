use crate::{
    ast::ast::{Block, Stmt, StmtKind},
    errors::errors::{At, Error},
    type_checker::definitions::FunctionId,
};

use super::{
    compiler::Compiler,
    expr::{gen_expression, gen_iterator_header},
};

pub fn gen_block(compiler: &mut Compiler, block: &Block, level: usize) -> Result<(), Error> {
    for statement in block.iter() {
        gen_statement(compiler, statement, level)?;
    }

    Ok(())
}

pub fn gen_statement(compiler: &mut Compiler, statement: &Stmt, level: usize) -> Result<(), Error> {
    match &statement.kind {
        StmtKind::Expression(expr) => {
            let expr = gen_expression(compiler, expr)?;
            compiler.write_line(level, &format!("{};", expr));
        }
        StmtKind::Assignment {
            name,
            definition,
            value,
        } => {
            let program = compiler.program;
            let value = gen_expression(compiler, value)?;

            // The first emitted assignment declares the variable
            let declaration = if !program.definition(*definition).is_predeclared()
                && compiler.declared.insert(*definition)
            {
                let var_type = program
                    .definition_type(*definition)
                    .canonical_name()
                    .at(&statement.span.start)?;
                format!("{} ", var_type)
            } else {
                String::new()
            };

            compiler.write_line(level, &format!("{}{} = {};", declaration, name, value));
        }
        StmtKind::IndexAssignment {
            target,
            index,
            value,
        } => {
            let target = gen_expression(compiler, target)?;
            let index = gen_expression(compiler, index)?;
            let value = gen_expression(compiler, value)?;
            compiler.write_line(level, &format!("{}[{}] = {};", target, index, value));
        }
        StmtKind::If {
            condition,
            body,
            elifs,
            else_body,
        } => {
            let condition = gen_expression(compiler, condition)?;
            compiler.write_line(level, &format!("if ({}) {{", condition));
            gen_block(compiler, body, level + 1)?;
            compiler.write_line(level, "}");

            for elif in elifs {
                let condition = gen_expression(compiler, &elif.condition)?;
                compiler.write_line(level, &format!("else if ({}) {{", condition));
                gen_block(compiler, &elif.body, level + 1)?;
                compiler.write_line(level, "}");
            }

            if let Some(else_body) = else_body {
                compiler.write_line(level, "else {");
                gen_block(compiler, else_body, level + 1)?;
                compiler.write_line(level, "}");
            }
        }
        StmtKind::While { condition, body } => {
            let condition = gen_expression(compiler, condition)?;
            compiler.write_line(level, &format!("while ({}) {{", condition));
            gen_block(compiler, body, level + 1)?;
            compiler.write_line(level, "}");
        }
        StmtKind::For {
            variable,
            definition,
            iterable,
            body,
        } => {
            let header = gen_iterator_header(compiler, variable, *definition, iterable)?;
            compiler.write_line(level, &header);
            gen_block(compiler, body, level + 1)?;
            compiler.write_line(level, "}");
        }
        StmtKind::FunctionDecl(function) => gen_nested_function(compiler, *function, level)?,
        StmtKind::Return(value) => match value {
            Some(value) => {
                let value = gen_expression(compiler, value)?;
                compiler.write_line(level, &format!("return {};", value));
            }
            None => compiler.write_line(level, "return;"),
        },
        StmtKind::Pass => {}
        StmtKind::Break => compiler.write_line(level, "break;"),
        StmtKind::Continue => compiler.write_line(level, "continue;"),
    }

    Ok(())
}

/// A function declared anywhere but the root block becomes a local lambda.
/// Lambdas capture nothing, matching the function scope's isolation.
fn gen_nested_function(compiler: &mut Compiler, id: FunctionId, level: usize) -> Result<(), Error> {
    let program = compiler.program;
    let function = program.function(id);

    // Emitted after main
    if function.is_top_level() {
        return Ok(());
    }

    let params = compiler.gen_params(function)?;
    let header = if function.return_type.is_void() {
        format!("auto {} = []({}) {{", function.name, params)
    } else {
        format!(
            "auto {} = []({}) -> {} {{",
            function.name,
            params,
            function
                .return_type
                .canonical_name()
                .at(&function.position)?
        )
    };

    compiler.write_line(level, &header);
    gen_block(compiler, &function.body, level + 1)?;
    compiler.write_line(level, "};");

    Ok(())
}
