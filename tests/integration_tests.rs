//! Integration tests for end-to-end translation.
//!
//! These tests verify that the complete pipeline works correctly from
//! source code through tokenization, parsing with semantic checks, and C++
//! generation, including the errors each stage reports.

use std::rc::Rc;

use javelin::{
    compile_source,
    config::Config,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn translate(source: &str) -> Result<String, Error> {
    compile_source(source, "test.py", &Config::default())
}

fn check(source: &str) -> Result<(), Error> {
    let tokens = tokenize(source.to_string(), Some("test.py".to_string()))?;
    parse(tokens, Rc::new("test.py".to_string())).map(|_| ())
}

#[test]
fn test_compile_full_program() {
    let source = r#"
def fib(n: int) -> int:
    if n < 2:
        return n
    return fib(n - 1) + fib(n - 2)

def show(values: list[int]):
    for value in values:
        print(value)

total = 0
for i in range(10):
    total += fib(i)
show([total, fib(5)])
"#;

    let output = translate(source).unwrap();

    assert_eq!(
        output,
        "#include \"javelin.h\"\n\
         \n\
         int fib(int n);\n\
         void show(std::vector<int> values);\n\
         \n\
         int main() {\n\
         \x20 int total = 0;\n\
         \x20 for (int i = 0; i < 10 || (i-- && false); i++) {\n\
         \x20   total = total + fib(i);\n\
         \x20 }\n\
         \x20 show(std::vector<int>{total,fib(5)});\n\
         }\n\
         \n\
         int fib(int n) {\n\
         \x20 if (n < 2) {\n\
         \x20   return n;\n\
         \x20 }\n\
         \x20 return fib(n - 1) + fib(n - 2);\n\
         }\n\
         \n\
         void show(std::vector<int> values) {\n\
         \x20 for (int value : values) {\n\
         \x20   std::cout << value << std::endl;\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_return_type_inferred_once() {
    let output = translate("def name():\n    return \"javelin\"\nprint(name())\n").unwrap();
    assert!(output.contains("std::string name();\n"));

    let error = check("def f():\n    return 1\n    return \"one\"\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::TypeConflict { .. }));

    // A bare return cannot satisfy an inferred int
    let error = check("def f():\n    return 1\n    return\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::VoidFunctionReturnsValue { function } if function == "f"
    ));
}

#[test]
fn test_parameter_inferred_from_body() {
    let output = translate("def twice(x):\n    return x * 2\nprint(twice(4))\n").unwrap();
    assert!(output.contains("int twice(int x) {\n  return x * 2;\n}\n"));
}

#[test]
fn test_uninferable_parameter() {
    let error = check("def f(x):\n    pass\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UndeclaredType { name: Some(name) } if name == "x"
    ));
}

#[test]
fn test_list_must_be_homogeneous() {
    let error = check("xs = [1, \"two\"]\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::ListTypeMismatch { .. }));

    let error = check("xs = []\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::EmptyUntypedList));
}

#[test]
fn test_function_scope_is_isolated() {
    let error = check("x = 1\ndef f() -> int:\n    return x\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::UndefinedVariable { name } if name == "x"
    ));

    // Built-ins are still visible inside
    assert!(check("def f(x: int):\n    print(x)\n").is_ok());
}

#[test]
fn test_block_variables_stay_in_block() {
    let error = check("if 1:\n    y = 2\nprint(y)\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::UndefinedVariable { .. }));
}

#[test]
fn test_conflicting_redeclaration() {
    let error = check("x = 1\nx = \"one\"\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::ConflictingRedeclaration { name, .. } if name == "x"
    ));
}

#[test]
fn test_call_errors() {
    let error = check("missing(1)\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::UndefinedFunction { .. }));

    let error = check("x = 1\nx(2)\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::NotAFunction { .. }));

    let error = check("def f(a: int) -> int:\n    return a\nf(1, 2)\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::ArgumentMismatch { .. }));

    let error = check("exit(\"no\")\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::ArgumentMismatch { .. }));
}

#[test]
fn test_return_errors() {
    let error = check("return 1\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::ReturnOutsideFunction));

    let error = check("def f() -> None:\n    return 1\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::TypeConflict { expected, received } if expected == "void" && received == "int"
    ));

    let error = check("def f(n):\n    if n > 1:\n        return n\n    return\n").unwrap_err();
    assert!(matches!(
        error.get_kind(),
        ErrorImpl::VoidFunctionReturnsValue { function } if function == "f"
    ));

    let error = check("def f():\n    pass\nx = f()\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::TypeConflict { .. }));
}

#[test]
fn test_range_only_in_loop_header() {
    let error = check("xs = range(3)\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::Unsupported { .. }));
}

#[test]
fn test_iteration_errors() {
    let error = check("for i in 5:\n    pass\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::NotIterable { .. }));

    let error = check("s = \"ab\"\ns[0] = \"c\"\n").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::Unsupported { .. }));
}

#[test]
fn test_print_spacing() {
    let output = translate("print(\"a\", 1, \"b\")\n").unwrap();
    assert!(output.contains(
        "  std::cout << std::string(\"a\") << ' ' << 1 << ' ' << std::string(\"b\") << std::endl;\n"
    ));
}

#[test]
fn test_error_position_points_into_source() {
    let source = "x = 1\ny = undefined\n";
    let error = check(source).unwrap_err();

    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_position().1.as_str(), "test.py");

    let rendered = javelin::format_error(&error, source, "test.py");
    assert!(rendered.starts_with("Error: UndefinedVariable"));
    assert!(rendered.contains("2 | y = undefined"));
}

#[test]
fn test_modulus_uses_runtime_helper() {
    let output = translate("print(-1 % 5)\n").unwrap();
    assert!(output.contains("std::cout << javelin::modulus(-1,5) << std::endl;"));
}

#[test]
fn test_empty_range_keeps_compensated_header() {
    let output = translate("n = 3\nfor i in range(n, n):\n    print(i)\n").unwrap();
    assert!(output.contains("  for (int i = n; i < n || (i-- && false); i++) {\n"));
}
