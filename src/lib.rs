pub mod codegen;
pub mod error;
pub mod grammer;
pub mod semantics;

pub use codegen::Emitter;
pub use error::Error;
pub use grammer::lexer::Lexer;
pub use grammer::parsercore::Parser;
pub use semantics::checker::SemanticChecker;

/// Compile Clovis source text to nasm assembly in memory, with no log files
/// and no toolchain invocation. Errors from every stage are accumulated;
/// code generation runs only when all stages are clean.
pub fn compile(source: &str) -> Result<String, Vec<Error>> {
    let (tokens, lex_errors) = Lexer::new(source).lex();
    let (mut stmts, parse_errors) = Parser::new(tokens).parse();

    let mut checker = SemanticChecker::new();
    for stmt in stmts.iter_mut() {
        let _ = checker.check_stmt(stmt);
    }

    let mut errors: Vec<Error> = Vec::new();
    errors.extend(lex_errors.into_iter().map(Error::from));
    errors.extend(parse_errors.into_iter().map(Error::from));
    errors.extend(checker.errors.into_iter().map(Error::from));
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut emitter = Emitter::new();
    for stmt in &stmts {
        emitter.emit_stmt(stmt);
    }
    Ok(emitter.finish())
}
