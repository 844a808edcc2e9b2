use prolix_frontend::{LayoutErrorKind, LexerErrorKind};
use prolix_middle::ValidationErrorKind;
use prolix_session::diagnostics::{Diagnostic, Severity};
use prolix_session::sourcemap::Source;
use prolix_session::Session;
use target_lexicon::Triple;

use crate::compilation::{check, compile_to_ir, CompileOptions};
use crate::gate::{AlwaysFail, AlwaysPass, FailureGate};
use crate::CompilerError;

const I32: &str = "integer_meaning_whole_in_latin_with_exactly_thirty_two_bits";

fn func(ordinal: i32, name: &str, params: &[&str], body: &str) -> String {
    let params: Vec<_> = params.iter().map(|p| format!("{p} is {I32}")).collect();
    format!(
        "the function numbered {ordinal} is {I32} shall be equal to {name}\n\
         left_bracket {} right_bracket\n\
         left_parenthesis\n{body}\nright_parenthesis\n",
        params.join(" comma ")
    )
}

fn invoke(name: &str, args: &str) -> String {
    format!(
        "i shall invoke the function named {name} and it shall take the parameters \
         left_brace {args} right_brace"
    )
}

fn hello_world() -> String {
    let body: String = "Hello, World!\n"
        .bytes()
        .map(|byte| format!("{} period\n", invoke("putchar", &byte.to_string())))
        .collect();

    func(1, "main", &[], &(body + "return 0 period"))
}

fn fib() -> String {
    let main = func(
        1,
        "main",
        &[],
        &format!("return {} period", invoke("fib", "5")),
    );
    let fib = func(
        2,
        "fib",
        &["n"],
        &format!(
            "in the case that n is zero do return 1 period\n\
             in the case that n minus 1 is zero do return 1 period\n\
             return {} plus {} period",
            invoke("fib", "n minus 1"),
            invoke("fib", "n minus 2"),
        ),
    );

    main + &fib
}

struct Outcome {
    result: Result<String, CompilerError>,
    diagnostics: Vec<Diagnostic>,
}

fn compile_with(source: &str, options: &CompileOptions, gate: &mut dyn FailureGate) -> Outcome {
    let mut session = Session::new(Triple::host(), Vec::<Diagnostic>::new());
    let source_id = session.sources.insert(Source::new("test", source));

    let result = compile_to_ir(&mut session, source_id, options, gate);

    Outcome {
        result,
        diagnostics: session.diagnostics,
    }
}

fn compile(source: &str) -> Outcome {
    compile_with(source, &CompileOptions::default(), &mut AlwaysPass)
}

fn error_ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .filter_map(|d| d.id.as_deref())
        .collect()
}

#[test]
fn hello_world_compiles() {
    let outcome = compile(&hello_world());
    let ir = outcome.result.unwrap();

    assert!(outcome.diagnostics.is_empty());
    assert!(ir.contains("define i32 @main()"));
    assert!(ir.contains("declare i32 @putchar(i32)"));
    assert_eq!(ir.matches("call i32 @putchar(i32 ").count(), 14);
}

#[test]
fn fib_compiles() {
    let ir = compile(&fib()).result.unwrap();

    assert!(ir.contains("define i32 @fib(i32 %p.n)"));
    assert!(ir.contains("call i32 @fib(i32 5)"));
    assert!(!ir.contains("declare"));
}

#[test]
fn output_is_deterministic() {
    let first = compile(&fib()).result.unwrap();
    let second = compile(&fib()).result.unwrap();

    assert_eq!(first, second);
}

#[test]
fn ir_targets_the_session_triple() {
    let ir = compile(&hello_world()).result.unwrap();

    assert!(ir.contains(&format!("target triple = \"{}\"", Triple::host())));
}

#[test]
fn injected_failure_discards_the_program() {
    let outcome = compile_with(&hello_world(), &CompileOptions::default(), &mut AlwaysFail);

    assert!(matches!(outcome.result, Err(CompilerError::InjectedFailure)));
    assert_eq!(error_ids(&outcome.diagnostics), ["injected-failure"]);
}

#[test]
fn gate_is_not_rolled_for_invalid_programs() {
    let source = func(1, "main", &[], "return x period");
    let outcome = compile_with(&source, &CompileOptions::default(), &mut AlwaysFail);

    assert!(matches!(
        outcome.result,
        Err(CompilerError::Validation(ValidationErrorKind::UndefinedVariable))
    ));
    assert_eq!(error_ids(&outcome.diagnostics), ["undefined-variable"]);
}

#[test]
fn lonely_variable() {
    let source = func(
        1,
        "main",
        &[],
        &format!(
            "i am declaring a variable named x is {I32} shall be equal to 3 period\n\
             return 0 period"
        ),
    );
    let outcome = compile(&source);

    assert!(matches!(
        outcome.result,
        Err(CompilerError::Validation(ValidationErrorKind::LonelyVariable))
    ));
    assert_eq!(error_ids(&outcome.diagnostics), ["lonely-variable"]);
}

#[test]
fn duplicate_ordinal() {
    let source = func(1, "main", &[], "return 0 period") + &func(1, "two", &[], "return 2 period");
    let outcome = compile(&source);

    assert!(matches!(
        outcome.result,
        Err(CompilerError::Validation(ValidationErrorKind::DuplicateOrdinal))
    ));
    assert_eq!(error_ids(&outcome.diagnostics), ["duplicate-ordinal"]);
}

#[test]
fn unresolved_call() {
    let source = func(
        1,
        "main",
        &[],
        &format!("return {} period", invoke("nope", "1")),
    );
    let outcome = compile(&source);

    assert!(matches!(
        outcome.result,
        Err(CompilerError::Validation(ValidationErrorKind::UnresolvedCall))
    ));
    assert_eq!(error_ids(&outcome.diagnostics), ["unresolved-call"]);
}

#[test]
fn lex_error() {
    let outcome = compile("return 0 period @");

    assert!(matches!(
        outcome.result,
        Err(CompilerError::Lex(LexerErrorKind::UnexpectedChar('@')))
    ));
    assert_eq!(error_ids(&outcome.diagnostics), ["lex-error"]);
}

#[test]
fn parse_error() {
    let outcome = compile("return 0 period");

    assert!(matches!(outcome.result, Err(CompilerError::Parse)));
    assert_eq!(error_ids(&outcome.diagnostics), ["parse-error"]);
}

#[test]
fn strict_layout_is_opt_in() {
    let source = func(1, "main", &[], "    return 0 period");

    assert!(compile(&source).result.is_ok());

    let options = CompileOptions {
        strict_layout: true,
        ..CompileOptions::default()
    };
    let outcome = compile_with(&source, &options, &mut AlwaysPass);

    assert!(matches!(
        outcome.result,
        Err(CompilerError::Layout(LayoutErrorKind::IndentedLine))
    ));
    assert_eq!(error_ids(&outcome.diagnostics), ["layout-error"]);
}

#[test]
fn ordinal_warnings_do_not_fail() {
    let source = func(1, "main", &[], "return 0 period") + &func(3, "two", &[], "return 2 period");
    let outcome = compile(&source);

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].severity, Severity::Warning);
    assert_eq!(outcome.diagnostics[0].id.as_deref(), Some("ordinal-sequence"));
}

#[test]
fn check_stops_before_codegen() {
    let mut session = Session::new(Triple::host(), Vec::<Diagnostic>::new());
    let source_id = session.sources.insert(Source::new("test", fib()));

    let checked = check(&mut session, source_id, &CompileOptions::default()).unwrap();

    assert_eq!(checked.program.module.funcs.len(), 2);
    assert!(session.diagnostics.is_empty());
}

#[test]
fn injected_failure_blames_chance() {
    use prolix_session::diagnostics::termcolor::NoColor;
    use prolix_session::diagnostics::{Config, IntoDiagnostic};
    use prolix_session::sourcemap::SourceMap;

    use crate::gate::InjectedFailure;

    let diagnostic = InjectedFailure.into_diagnostic(&());

    let mut stream = NoColor::new(vec![]);
    diagnostic
        .write_to_stream(&SourceMap::default(), &Config::default(), &mut stream)
        .unwrap();

    assert_eq!(
        String::from_utf8(stream.into_inner()).unwrap(),
        "[injected-failure] Error: compilation failed by chance\n\
         note: one compilation in 5 fails on purpose, this says nothing about the program\n\
         note: compiling again will most likely succeed\n\n"
    );
}
