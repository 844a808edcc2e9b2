use prolix_backend::emit_module;
use prolix_interner::Interner;
use prolix_middle::{validate, ExternalTable, ValidatedProgram, ValidationRules};
use prolix_session::diagnostics::sources::{Source as _, Sources as _};
use prolix_session::diagnostics::DiagnosticEmitter;
use prolix_session::sourcemap::SourceId;
use prolix_session::Session;

use crate::gate::{FailureGate, GateOutcome, InjectedFailure};
use crate::{CompilerError, CompilerResult};

/// Knobs that don't come from the source itself.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub strict_layout: bool,
    pub rules: ValidationRules,
    pub externals: ExternalTable,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict_layout: false,
            rules: ValidationRules::default(),
            externals: ExternalTable::c_runtime(),
        }
    }
}

/// A validated program and the interner its identifiers live in.
pub struct Checked {
    pub program: ValidatedProgram,
    pub interner: Interner,
}

/// Runs every stage up to and including validation, reporting the first error.
pub fn check<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source_id: SourceId,
    options: &CompileOptions,
) -> CompilerResult<Checked> {
    let source = session
        .sources
        .get_source(source_id)
        .expect("source id not in sources")
        .source_str()
        .to_owned();

    if options.strict_layout {
        if let Err(err) = prolix_frontend::check_layout(&source) {
            let kind = err.kind;
            let _ = session.report(err, &source_id);
            return Err(CompilerError::Layout(kind));
        }
    }

    let mut interner = Interner::new();

    let tokens = match prolix_frontend::lex(&source, &mut interner) {
        Ok(tokens) => tokens,
        Err(err) => {
            let kind = err.kind;
            let _ = session.report(err, &source_id);
            return Err(CompilerError::Lex(kind));
        }
    };

    let ast = match prolix_frontend::parse(tokens) {
        Ok(ast) => ast,
        Err(err) => {
            let _ = session.report(err, &source_id);
            return Err(CompilerError::Parse);
        }
    };

    let (result, warnings) = validate(
        &ast,
        source_id,
        &interner,
        &options.externals,
        options.rules,
    );

    // warnings never fail a compilation
    let _ = session.report_all(warnings, &interner);

    match result {
        Ok(program) => Ok(Checked { program, interner }),
        Err(err) => {
            let kind = err.kind();
            let _ = session.report(err, &interner);
            Err(CompilerError::Validation(kind))
        }
    }
}

/// Checks the program, rolls the failure gate once, then emits LLVM IR.
pub fn compile_to_ir<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    source_id: SourceId,
    options: &CompileOptions,
    gate: &mut dyn FailureGate,
) -> CompilerResult<String> {
    let Checked { program, interner } = check(session, source_id, options)?;

    if gate.roll() == GateOutcome::Fail {
        let _ = session.report(InjectedFailure, &());
        return Err(CompilerError::InjectedFailure);
    }

    let name = session
        .sources
        .get_source(source_id)
        .expect("source id not in sources")
        .name_str()
        .to_owned();

    Ok(emit_module(
        &program.module,
        &program.symbols,
        &interner,
        &name,
        Some(&session.target),
    ))
}
