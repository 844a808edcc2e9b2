//! Lowering of the resolved IR to textual LLVM IR.
//!
//! Every local lives in an `alloca` slot of the entry block, so the output never needs
//! phi nodes. Only `i32`, `i1` and `ptr` values appear.

use std::fmt::Write as _;

use prolix_interner::Interner;
use prolix_ir::ir::*;
use prolix_ir::symbols::{LocalId, Symbols};
use target_lexicon::Triple;

/// Appends one line to the output. Writing to a `String` can't fail.
macro_rules! emit {
    ($codegen:expr) => {{
        $codegen.out.push('\n');
    }};
    ($codegen:expr, $($arg:tt)*) => {{
        let _ = writeln!($codegen.out, $($arg)*);
    }};
}

pub fn emit_module(
    module: &Module,
    symbols: &Symbols,
    interner: &Interner,
    module_name: &str,
    target: Option<&Triple>,
) -> String {
    let mut codegen = Codegen::new(symbols, interner);
    codegen.gen_module(module, module_name, target);
    codegen.out
}

struct Codegen<'a> {
    symbols: &'a Symbols,
    interner: &'a Interner,

    out: String,

    // reset for every function
    next_temp: usize,
    next_label: usize,
    terminated: bool,
}

impl<'a> Codegen<'a> {
    fn new(symbols: &'a Symbols, interner: &'a Interner) -> Self {
        Self {
            symbols,
            interner,

            out: String::new(),

            next_temp: 0,
            next_label: 0,
            terminated: false,
        }
    }

    fn gen_module(&mut self, module: &Module, module_name: &str, target: Option<&Triple>) {
        let name = escape(module_name);
        emit!(self, "; ModuleID = '{name}'");
        emit!(self, "source_filename = \"{name}\"");
        if let Some(target) = target {
            emit!(self, "target triple = \"{target}\"");
        }

        if !self.symbols.externals.is_empty() {
            emit!(self);
            for external in &self.symbols.externals {
                let params = vec!["i32"; external.arity].join(", ");
                emit!(self, "declare i32 @{}({params})", external.name);
            }
        }

        for func_decl in &module.funcs {
            emit!(self);
            self.gen_func_decl(func_decl);
        }
    }

    fn gen_func_decl(&mut self, func_decl: &FuncDecl) {
        self.next_temp = 0;
        self.next_label = 0;
        self.terminated = false;

        let (symbols, interner) = (self.symbols, self.interner);

        let func = &symbols.funcs[func_decl.id];
        let ret_ty = func.ret_ty.llvm_name();
        let name = &interner[func.ident.istr];

        let params: Vec<_> = func_decl
            .params()
            .iter()
            .map(|&local| format!("i32 %p.{}", self.local_name(local)))
            .collect();
        let params = params.join(", ");

        emit!(self, "define {ret_ty} @{name}({params}) {{");
        emit!(self, "entry:");

        for &local in &func_decl.locals {
            let slot = self.slot(local);
            emit!(self, "  {slot} = alloca i32");
        }

        for &local in func_decl.params() {
            let (name, slot) = (self.local_name(local), self.slot(local));
            emit!(self, "  store i32 %p.{name}, ptr {slot}");
        }

        for stmt in &func_decl.body.stmts {
            self.gen_stmt(stmt);
        }

        if !self.terminated {
            emit!(self, "  ret i32 0");
        }

        emit!(self, "}}");
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        if self.terminated {
            let label = format!("dead{}", self.label());
            self.start_block(&label);
        }

        match stmt {
            Stmt::Assign { local, expr } => {
                let value = self.gen_expr(expr);
                let slot = self.slot(*local);
                emit!(self, "  store i32 {value}, ptr {slot}");
            }

            Stmt::IfZero { cond, then } => {
                let value = self.gen_expr(cond);
                let is_zero = self.temp();

                let n = self.label();
                emit!(self, "  {is_zero} = icmp eq i32 {value}, 0");
                emit!(self, "  br i1 {is_zero}, label %then{n}, label %endif{n}");

                self.start_block(&format!("then{n}"));
                self.gen_stmt(then);
                self.branch_to(&format!("endif{n}"));

                self.start_block(&format!("endif{n}"));
            }

            Stmt::WhileNonZero { cond, body } => {
                let n = self.label();
                emit!(self, "  br label %while.cond{n}");

                self.start_block(&format!("while.cond{n}"));
                let value = self.gen_expr(cond);
                let is_nonzero = self.temp();
                emit!(self, "  {is_nonzero} = icmp ne i32 {value}, 0");
                emit!(
                    self,
                    "  br i1 {is_nonzero}, label %while.body{n}, label %while.end{n}"
                );

                self.start_block(&format!("while.body{n}"));
                self.gen_stmt(body);
                self.branch_to(&format!("while.cond{n}"));

                self.start_block(&format!("while.end{n}"));
            }

            Stmt::Block(block) => {
                for stmt in &block.stmts {
                    self.gen_stmt(stmt);
                }
            }

            Stmt::Return(expr) => {
                let value = self.gen_expr(expr);
                emit!(self, "  ret i32 {value}");
                self.terminated = true;
            }

            Stmt::Eval(expr) => {
                self.gen_expr(expr);
            }
        }
    }

    /// Returns the operand holding the value of `expr`.
    fn gen_expr(&mut self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Constant(n) => n.to_string(),

            ExprKind::Var(local) => {
                let slot = self.slot(*local);
                let temp = self.temp();
                emit!(self, "  {temp} = load i32, ptr {slot}");
                temp
            }

            ExprKind::BinOp { op, lhs, rhs } => {
                let lhs = self.gen_expr(lhs);
                let rhs = self.gen_expr(rhs);

                let instruction = op.instruction();
                let temp = self.temp();
                emit!(self, "  {temp} = {instruction} i32 {lhs}, {rhs}");
                temp
            }

            ExprKind::Call { callee, args } => {
                let args: Vec<_> = args
                    .iter()
                    .map(|arg| format!("i32 {}", self.gen_expr(arg)))
                    .collect();

                let args = args.join(", ");

                let (symbols, interner) = (self.symbols, self.interner);
                let name = match *callee {
                    Callee::Func(id) => &interner[symbols.funcs[id].ident.istr],
                    Callee::External(id) => symbols.externals[id].name.as_str(),
                };

                let temp = self.temp();
                emit!(self, "  {temp} = call i32 @{name}({args})");
                temp
            }
        }
    }

    fn branch_to(&mut self, label: &str) {
        if !self.terminated {
            emit!(self, "  br label %{label}");
        }
    }

    fn start_block(&mut self, label: &str) {
        emit!(self, "{label}:");
        self.terminated = false;
    }

    fn temp(&mut self) -> String {
        let temp = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        temp
    }

    fn label(&mut self) -> usize {
        let n = self.next_label;
        self.next_label += 1;
        n
    }

    fn local_name(&self, local: LocalId) -> &'a str {
        let (symbols, interner) = (self.symbols, self.interner);
        &interner[symbols.locals[local].ident.istr]
    }

    fn slot(&self, local: LocalId) -> String {
        format!("%{}.{}", self.local_name(local), local.0)
    }
}

/// Escapes a string for use inside an LLVM string literal or comment.
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());

    for byte in s.bytes() {
        if (0x20..=0x7e).contains(&byte) && !matches!(byte, b'"' | b'\\' | b'\'') {
            escaped.push(char::from(byte));
        } else {
            let _ = write!(escaped, "\\{byte:02X}");
        }
    }

    escaped
}
