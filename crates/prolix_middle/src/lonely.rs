use std::collections::HashSet;

use prolix_ir::ir::*;
use prolix_ir::symbols::{LocalId, Symbols};

use crate::error::{ValidationError, ValidationResult};

/// Fails on the first declared variable that no expression of the function reads.
/// Assigning to a variable doesn't count as reading it. Parameters are exempt.
pub fn check_lonely(func_decl: &FuncDecl, symbols: &Symbols) -> ValidationResult<()> {
    let mut reads = HashSet::new();
    collect_block_reads(&func_decl.body, &mut reads);

    let lonely = func_decl.locals[func_decl.num_params..]
        .iter()
        .find(|local| !reads.contains(*local));

    match lonely {
        Some(&local) => Err(ValidationError::LonelyVariable(
            symbols.locals[local].ident,
        )),
        None => Ok(()),
    }
}

fn collect_block_reads(block: &Block, reads: &mut HashSet<LocalId>) {
    for stmt in &block.stmts {
        collect_stmt_reads(stmt, reads);
    }
}

fn collect_stmt_reads(stmt: &Stmt, reads: &mut HashSet<LocalId>) {
    match stmt {
        Stmt::Assign { expr, .. } | Stmt::Return(expr) | Stmt::Eval(expr) => {
            collect_expr_reads(expr, reads);
        }

        Stmt::IfZero { cond, then: body } | Stmt::WhileNonZero { cond, body } => {
            collect_expr_reads(cond, reads);
            collect_stmt_reads(body, reads);
        }

        Stmt::Block(block) => collect_block_reads(block, reads),
    }
}

fn collect_expr_reads(expr: &Expr, reads: &mut HashSet<LocalId>) {
    match &expr.kind {
        ExprKind::Constant(_) => {}
        ExprKind::Var(local) => {
            reads.insert(*local);
        }
        ExprKind::BinOp { lhs, rhs, .. } => {
            collect_expr_reads(lhs, reads);
            collect_expr_reads(rhs, reads);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                collect_expr_reads(arg, reads);
            }
        }
    }
}
