mod cli;
mod compilation;
mod gate;
mod narrate;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as _;
use cli::{Cli, Command, InputArgs};
use compilation::CompileOptions;
use gate::RandomGate;
use narrate::NarratingEmitter;
use prolix_backend::{Backend, DriverError};
use prolix_frontend::{LayoutErrorKind, LexerErrorKind};
use prolix_middle::ValidationErrorKind;
use prolix_session::diagnostics::{CountingEmitter, DiagnosticEmitter, PrettyDiagnosticEmitter};
use prolix_session::sourcemap::{Source, SourceId};
use prolix_session::Session;
use target_lexicon::Triple;

#[derive(thiserror::Error, Debug)]
enum CompilerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("source isn't laid out strictly: {0}")]
    Layout(LayoutErrorKind),

    #[error("couldn't tokenize source: {0}")]
    Lex(LexerErrorKind),

    #[error("couldn't parse source")]
    Parse,

    #[error("invalid program: {0}")]
    Validation(ValidationErrorKind),

    #[error("compilation failed by chance, try again")]
    InjectedFailure,

    #[error(transparent)]
    Backend(#[from] DriverError),

    #[error("no backend available for target, pass one with `--backend`")]
    NoBackend,
}

type CompilerResult<T> = Result<T, CompilerError>;

type Emitter = CountingEmitter<Box<dyn DiagnosticEmitter>>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CompilerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            input,
            output,
            emit_ir,
            seed,
            backend,
            backend_args,
            narrate,
            quiet,
        } => {
            let mut session = new_session(narrate);
            let source_id = load_source(&mut session, &input)?;
            let options = CompileOptions {
                strict_layout: input.strict_layout,
                ..CompileOptions::default()
            };

            if !quiet {
                println!("compiling {}...", source_name(&input));
            }

            let mut gate = seed.map_or_else(RandomGate::from_entropy, RandomGate::seeded);
            let result =
                compilation::compile_to_ir(&mut session, source_id, &options, &mut gate);
            report_warnings(&session.diagnostics, quiet);
            let ir = result?;

            if let Some(path) = &emit_ir {
                if path == "-" {
                    print!("{ir}");
                } else {
                    std::fs::write(path, &ir)?;

                    if !quiet {
                        println!("wrote {path}");
                    }
                }

                if output.is_none() {
                    return Ok(());
                }
            }

            let backend = match backend {
                Some(program) => Backend::Custom(program, backend_args),
                None => Backend::detect(&session.target).ok_or(CompilerError::NoBackend)?,
            };

            let output = output.unwrap_or_else(|| default_output(&input));
            backend.build(&ir, &output)?;

            if !quiet {
                println!("wrote {}", output.display());
            }

            Ok(())
        }

        Command::Check { input } => {
            let mut session = new_session(None);
            let source_id = load_source(&mut session, &input)?;
            let options = CompileOptions {
                strict_layout: input.strict_layout,
                ..CompileOptions::default()
            };

            let result = compilation::check(&mut session, source_id, &options);
            report_warnings(&session.diagnostics, false);
            result?;

            println!("{} is a valid program", source_name(&input));

            Ok(())
        }
    }
}

fn new_session(narrator: Option<String>) -> Session<Emitter> {
    let pretty = PrettyDiagnosticEmitter::default();

    let emitter: Box<dyn DiagnosticEmitter> = match narrator {
        Some(program) => Box::new(NarratingEmitter::new(pretty, program)),
        None => Box::new(pretty),
    };

    Session::new(Triple::host(), CountingEmitter::new(emitter))
}

fn source_name(input: &InputArgs) -> &str {
    if input.source {
        "<source>"
    } else {
        &input.input
    }
}

fn load_source(session: &mut Session<Emitter>, input: &InputArgs) -> CompilerResult<SourceId> {
    let source = if input.source {
        Source::new(source_name(input), input.input.as_str())
    } else {
        let text = std::fs::read_to_string(&input.input)?;
        Source::new(source_name(input), text).with_path(&input.input)
    };

    Ok(session.sources.insert(source))
}

/// The input path without its extension, or `a.out` when that would clobber the input.
fn default_output(input: &InputArgs) -> PathBuf {
    let path = Path::new(&input.input);

    match path.extension() {
        Some(_) if !input.source => path.with_extension(""),
        _ => PathBuf::from("a.out"),
    }
}

fn report_warnings(emitter: &Emitter, quiet: bool) {
    if quiet || emitter.warnings == 0 {
        return;
    }

    let plural = if emitter.warnings == 1 { "" } else { "s" };
    eprintln!("{} warning{plural} emitted", emitter.warnings);
}
