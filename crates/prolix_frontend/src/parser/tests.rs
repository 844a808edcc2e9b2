use prolix_interner::Interner;

use super::{ParseError, Parser};
use crate::ast::*;
use crate::lexer::Lexer;

const I32: &str = "integer_meaning_whole_in_latin_with_exactly_thirty_two_bits";

fn parse(source: &str) -> (Result<Module, ParseError>, Interner) {
    let mut interner = Interner::new();
    let tokens = Lexer::new(source, &mut interner).lex().unwrap();
    (Parser::new(tokens).parse(), interner)
}

/// Wraps statements in a `main` function.
fn parse_body(body: &str) -> (Result<Module, ParseError>, Interner) {
    parse(&format!(
        "the function numbered 1 is {I32} shall be equal to main left_bracket right_bracket \
         left_parenthesis {body} right_parenthesis"
    ))
}

fn sexpr(expr: &Expr, interner: &Interner) -> String {
    match &expr.kind {
        ExprKind::Integer(n) => n.to_string(),
        ExprKind::Var(ident) => interner[ident.istr].to_owned(),
        ExprKind::BinOp { op, lhs, rhs } => format!(
            "({op:?} {} {})",
            sexpr(lhs, interner),
            sexpr(rhs, interner)
        ),
        ExprKind::Call(call) => {
            let args: Vec<_> = call.args.iter().map(|a| sexpr(a, interner)).collect();
            format!("{}[{}]", &interner[call.callee.istr], args.join(" "))
        }
    }
}

fn return_expr(body: &str) -> String {
    let (module, interner) = parse_body(body);
    let module = module.unwrap();

    match &module.funcs[0].block.stmts[..] {
        [Stmt::Return(expr)] => sexpr(expr, &interner),
        other => panic!("expected a single return, got {other:?}"),
    }
}

#[test]
fn empty_program() {
    let (module, _) = parse("");
    assert_eq!(module.unwrap().funcs, []);
}

#[test]
fn function_with_params() {
    let (module, interner) = parse(&format!(
        "the function numbered 2 is {I32} shall be equal to fib \
         left_bracket n is {I32} comma m is {I32} right_bracket \
         left_parenthesis return n period right_parenthesis"
    ));
    let module = module.unwrap();

    let func = &module.funcs[0];
    assert_eq!(func.ordinal.node, 2);
    assert_eq!(&interner[func.name.istr], "fib");

    let params: Vec<_> = func.params.iter().map(|p| &interner[p.ident.istr]).collect();
    assert_eq!(params, ["n", "m"]);
}

#[test]
fn precedence() {
    insta::assert_snapshot!(
        return_expr("return 1 plus 2 times 3 minus 4 period"),
        @"(Sub (Add 1 (Mul 2 3)) 4)"
    );
}

#[test]
fn left_associative() {
    insta::assert_snapshot!(
        return_expr("return 10 minus 3 minus 2 div 2 mod 5 period"),
        @"(Sub (Sub 10 3) (Mod (Div 2 2) 5))"
    );
}

#[test]
fn grouping() {
    insta::assert_snapshot!(
        return_expr("return left_brace 1 plus 2 right_brace times 3 semicolon"),
        @"(Mul (Add 1 2) 3)"
    );
}

#[test]
fn call_expression() {
    insta::assert_snapshot!(
        return_expr(
            "return i shall invoke the function named fib and it shall take the parameters \
             left_brace n minus 1 comma 2 right_brace plus 1 period"
        ),
        @"(Add fib[(Sub n 1) 2] 1)"
    );
}

#[test]
fn statements() {
    let (module, _) = parse_body(&format!(
        "i am declaring a variable named x is {I32} shall be equal to 5 period \
         x shall now be equal to x minus 1 period \
         in the case that x is zero do return 1 period \
         during the period that x is not zero do left_parenthesis \
             x shall now be equal to x minus 1 semicolon \
         right_parenthesis \
         i shall invoke the function named putchar and it shall take the parameters \
             left_brace 65 right_brace period \
         return 0 period"
    ));
    let module = module.unwrap();

    let stmts = &module.funcs[0].block.stmts;
    assert!(matches!(stmts[0], Stmt::Declare { .. }));
    assert!(matches!(stmts[1], Stmt::Assign { .. }));
    assert!(matches!(&stmts[2], Stmt::IfZero { then, .. } if matches!(**then, Stmt::Return(_))));
    assert!(
        matches!(&stmts[3], Stmt::WhileNonZero { body, .. } if matches!(**body, Stmt::Block(_)))
    );
    assert!(matches!(&stmts[4], Stmt::Call(call) if call.args.len() == 1));
    assert!(matches!(stmts[5], Stmt::Return(_)));
}

#[test]
fn missing_terminator() {
    let (module, _) = parse_body("return 0 right_parenthesis");
    let err = module.unwrap_err();

    assert_eq!(err.expected, "`period` or `semicolon`");
    assert_eq!(err.found, "`right_parenthesis`");
}

#[test]
fn unclosed_block() {
    let (module, _) = parse(&format!(
        "the function numbered 1 is {I32} shall be equal to main left_bracket right_bracket \
         left_parenthesis return 0 period"
    ));
    let err = module.unwrap_err();

    assert_eq!(err.expected, "a statement");
    assert_eq!(err.found, "end of input");
}

#[test]
fn stray_tokens_at_top_level() {
    let (module, _) = parse("return 0 period");
    let err = module.unwrap_err();

    assert_eq!(err.expected, "a function declaration or end of input");
    assert_eq!(err.found, "`return`");
}

#[test]
fn trailing_comma_is_rejected() {
    let (module, _) = parse_body(
        "return i shall invoke the function named f and it shall take the parameters \
         left_brace 1 comma right_brace period",
    );
    let err = module.unwrap_err();

    assert_eq!(err.expected, "an expression");
    assert_eq!(err.found, "`right_brace`");
}
