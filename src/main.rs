use clap::Parser;
use clovis::codegen::Emitter;
use clovis::error::ToolchainError;
use clovis::grammer::lexer::Lexer;
use clovis::grammer::parsercore::Parser as ClovisParser;
use clovis::semantics::checker::SemanticChecker;
use color_print::cprintln;
use std::fs;
use std::process::{self, Command};

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input source file
    input: String,

    /// Output executable
    #[clap(short, long, default_value = "out")]
    output: String,

    /// Enable verbose output
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let mut err_occurred = false;

    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            cprintln!("<red,bold>error</>: cannot open {}: {}", args.input, err);
            process::exit(1);
        }
    };

    // 1. Lexing
    if args.verbose {
        cprintln!("<blue,bold>1. Lexing</> {}", args.input);
    }
    let (tokens, lex_errors) = Lexer::new(&source).lex();
    for err in &lex_errors {
        err_occurred = true;
        eprintln!("{err}");
    }
    if args.verbose {
        for token in &tokens {
            println!("  {token}");
        }
    }

    // 2. Parsing
    if args.verbose {
        cprintln!("<blue,bold>2. Parsing</>");
    }
    let (mut stmts, parse_errors) = ClovisParser::new(tokens).parse();
    for err in &parse_errors {
        err_occurred = true;
        eprintln!("{err}");
    }

    let mut plog = String::new();
    for stmt in &stmts {
        plog.push_str(&stmt.pretty(0));
        plog.push_str("\n\n");
    }
    if let Err(err) = fs::write("plog.txt", &plog) {
        cprintln!("<yellow,bold>warn</>: cannot write plog.txt: {}", err);
    }

    // 3. Semantic analysis
    if args.verbose {
        cprintln!("<blue,bold>3. Semantic analysis</>");
    }
    let mut checker = SemanticChecker::new();
    let mut slog = String::new();
    for stmt in stmts.iter_mut() {
        match checker.check_stmt(stmt) {
            Ok(()) => {
                slog.push_str(&format!(
                    "-----------------------------------------------------\n\n{}\n\n{}\n-----------------------------------------------------\n",
                    stmt.pretty(0),
                    checker
                ));
            }
            Err(err) => {
                err_occurred = true;
                slog.push_str(&format!("{err}\n"));
                eprintln!("{err}");
            }
        }
    }
    if let Err(err) = fs::write("slog.txt", &slog) {
        cprintln!("<yellow,bold>warn</>: cannot write slog.txt: {}", err);
    }

    if err_occurred {
        process::exit(1);
    }

    // 4. Code generation
    if args.verbose {
        cprintln!("<blue,bold>4. Code generation</>");
    }
    let mut emitter = Emitter::new();
    for stmt in &stmts {
        emitter.emit_stmt(stmt);
    }
    let asm = emitter.finish();
    if let Err(err) = fs::write("out.asm", &asm) {
        cprintln!("<red,bold>error</>: cannot write out.asm: {}", err);
        process::exit(1);
    }

    // 5. Assemble and link
    if args.verbose {
        cprintln!("<blue,bold>5. Assemble and link</>");
    }
    if let Err(err) = assemble_and_link(&args.output) {
        eprintln!("{err}");
        process::exit(1);
    }

    if args.verbose {
        cprintln!("<green,bold>done</>: {}", args.output);
    }
}

fn assemble_and_link(output: &str) -> Result<(), ToolchainError> {
    run_tool("nasm", &["-f", "elf64", "out.asm", "-o", "out.o"])?;
    run_tool("ld", &["out.o", "-o", output])?;
    Ok(())
}

fn run_tool(tool: &'static str, args: &[&str]) -> Result<(), ToolchainError> {
    let status = Command::new(tool)
        .args(args)
        .status()
        .map_err(|source| ToolchainError::Spawn { tool, source })?;
    if !status.success() {
        return Err(ToolchainError::Failed { tool, status });
    }
    Ok(())
}
