#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc, time::Instant};

use log::info;

use crate::{
    config::Config,
    errors::errors::{Error, ErrorTip},
};

pub mod ast;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Byte offset into a named source file.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Runs the whole pipeline over one source file and returns the generated
/// translation unit.
pub fn compile_source(source: &str, file_name: &str, config: &Config) -> Result<String, Error> {
    let start = Instant::now();

    let tokens = lexer::lexer::tokenize(source.to_string(), Some(file_name.to_string()))?;
    let program = parser::parser::parse(tokens, Rc::new(file_name.to_string()))?;
    let output = compiler::compiler::compile(&program, config)?;

    info!("Compiled {} in {:.2?}", file_name, start.elapsed());

    Ok(output)
}

/// Line number (from 1), line text and column of a byte offset in `source`.
/// An offset at the very end points just past the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // End of input
    match source.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => {
            Some((line_number - 1, line.to_string(), line.len()))
        }
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders an error against the source it was raised for.
///
/// ```text
/// Error: TypeConflict (Expected type `int`, received `std::string`)
/// -> main.py
///   |
/// 2 | x = "a"
///   | ----^
/// ```
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    const SOURCE: &str = "x = 1\nif x:\n    print(y)\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 4).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "x = 1\n");
        assert_eq!(line_pos, 4);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 22).unwrap();
        assert_eq!(line_number, 3);
        assert_eq!(line, "    print(y)\n");
        assert_eq!(line_pos, 10);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(SOURCE, 500).is_none());

        let (line_number, line, line_pos) = super::get_line_at_position("a = 1", 5).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "a = 1");
        assert_eq!(line_pos, 5);
    }

    #[test]
    fn test_format_error_points_at_column() {
        let error = Error::new(
            ErrorImpl::UndefinedVariable {
                name: String::from("y"),
            },
            Position(22, Rc::new(String::from("main.py"))),
        );

        let rendered = super::format_error(&error, SOURCE, "main.py");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "Error: UndefinedVariable (Variable `y` not declared)"
        );
        assert_eq!(lines[1], "-> main.py");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "3 | print(y)");
        assert_eq!(lines[4], "  | ------^");
    }

    #[test]
    fn test_position_display() {
        let position = Position(7, Rc::new(String::from("main.py")));
        assert_eq!(position.to_string(), "main.py:7");
    }
}
