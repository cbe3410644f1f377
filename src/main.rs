use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::{Parser, Subcommand};
use javelin::{
    compile_source, config::Config, errors::errors::Error as CompileError, format_error,
    lexer::lexer::tokenize, parser::parser::parse,
};
use log::{info, warn};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "javelin")]
#[command(about = "Translates a statically typed Python dialect to C++", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a source file to C++
    Compile {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with a .cpp extension, `-` for stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit the root statements without wrapping them in `main`
        #[arg(long)]
        no_main: bool,

        /// Header included at the top of the output
        #[arg(long, value_name = "HEADER", default_value = "javelin.h")]
        runtime_header: String,

        /// Do not include a runtime header
        #[arg(long, conflicts_with = "runtime_header")]
        no_runtime_header: bool,

        /// Print verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check a source file without generating output
    Check {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Error)]
enum DriverError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    CompilationError(String),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            no_main,
            runtime_header,
            no_runtime_header,
            verbose,
        } => {
            let header = if no_runtime_header {
                None
            } else {
                Some(runtime_header)
            };
            let config = Config::default()
                .with_runtime_header(header)
                .with_wrap_main(!no_main);
            compile_file(input, output, &config, verbose)
        }
        Commands::Check { input, verbose } => check_file(input, verbose),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error.to_string().trim_end());
            ExitCode::FAILURE
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn diagnostic(error: &CompileError, source: &str, path: &Path) -> DriverError {
    if error.is_internal() {
        warn!("Internal error while generating output: {}", error);
    }
    DriverError::CompilationError(format_error(error, source, &path.to_string_lossy()))
}

fn compile_file(
    input: PathBuf,
    output: Option<PathBuf>,
    config: &Config,
    verbose: bool,
) -> Result<(), DriverError> {
    let start = Instant::now();
    let source = fs::read_to_string(&input)?;

    let generated = compile_source(&source, &file_name(&input), config)
        .map_err(|error| diagnostic(&error, &source, &input))?;

    let output = output.unwrap_or_else(|| input.with_extension("cpp"));
    if output.as_os_str() == "-" {
        std::io::stdout().write_all(generated.as_bytes())?;
    } else {
        fs::write(&output, &generated)?;
        if verbose {
            println!("Wrote {}", output.display());
        }
    }

    info!("Translated {} in {:.2?}", input.display(), start.elapsed());
    if verbose {
        println!("Translated {} in {:.2?}", input.display(), start.elapsed());
    }

    Ok(())
}

fn check_file(input: PathBuf, verbose: bool) -> Result<(), DriverError> {
    let start = Instant::now();
    let source = fs::read_to_string(&input)?;
    let name = file_name(&input);

    let program = tokenize(source.clone(), Some(name.clone()))
        .and_then(|tokens| parse(tokens, Rc::new(name)))
        .map_err(|error| diagnostic(&error, &source, &input))?;

    if verbose {
        println!(
            "{}: {} functions, {} statements, checked in {:.2?}",
            input.display(),
            program.functions.len(),
            program.statement_count(),
            start.elapsed()
        );
    }

    Ok(())
}
