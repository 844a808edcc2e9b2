use std::collections::hash_map::Entry;
use std::collections::HashMap;

use prolix_frontend::ast;
use prolix_interner::{Interner, Istr};
use prolix_ir::symbols::*;
use prolix_ir::{ir, Ident, Type};
use prolix_session::sourcemap::{SourceId, SourceSpan};

use crate::error::{IdentRole, OrdinalWarning, ValidationError, ValidationResult};
use crate::externals::ExternalTable;
use crate::lonely::check_lonely;
use crate::rules::ValidationRules;

struct LocalEntry {
    istr: Istr,
    id: LocalId,
}

/// Checks a parsed module and lowers it to the name-resolved IR.
pub struct Resolver<'a> {
    source_id: SourceId,
    interner: &'a Interner,
    externals: &'a ExternalTable,
    rules: ValidationRules,

    symbols: Symbols,
    func_lookup: HashMap<Istr, FuncId>,
    extern_lookup: HashMap<String, ExternId>,

    warnings: Vec<OrdinalWarning>,

    local_stack: Vec<LocalEntry>,
    func_locals: Vec<LocalId>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        source_id: SourceId,
        interner: &'a Interner,
        externals: &'a ExternalTable,
        rules: ValidationRules,
    ) -> Self {
        Self {
            source_id,
            interner,
            externals,
            rules,

            symbols: Symbols::default(),
            func_lookup: HashMap::new(),
            extern_lookup: HashMap::new(),

            warnings: vec![],

            local_stack: vec![],
            func_locals: vec![],
        }
    }

    /// Ordinal warnings are returned even when validation fails.
    pub fn run(
        mut self,
        module: &ast::Module,
    ) -> (ValidationResult<(ir::Module, Symbols)>, Vec<OrdinalWarning>) {
        let result = self.resolve_module(module);
        (result.map(|module| (module, self.symbols)), self.warnings)
    }

    fn resolve_module(&mut self, module: &ast::Module) -> ValidationResult<ir::Module> {
        self.check_ordinals(module)?;
        self.declare_funcs(module)?;
        self.check_ident_lengths(module)?;

        let funcs = module
            .funcs
            .iter()
            .zip(0..)
            .map(|(func_decl, n)| self.lower_func_decl(func_decl, FuncId(n)))
            .collect::<ValidationResult<_>>()?;

        Ok(ir::Module { funcs })
    }

    fn check_ordinals(&mut self, module: &ast::Module) -> ValidationResult<()> {
        let mut seen: HashMap<i32, SourceSpan> = HashMap::new();
        let mut expected = 1;

        for func_decl in &module.funcs {
            let ordinal = func_decl.ordinal.to_source_spanned(self.source_id);

            match seen.entry(ordinal.node) {
                Entry::Occupied(first) => {
                    return Err(ValidationError::DuplicateOrdinal {
                        ordinal: ordinal.node,
                        first: *first.get(),
                        second: ordinal.span,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(ordinal.span);
                }
            }

            if ordinal.node != expected {
                self.warnings.push(OrdinalWarning { ordinal, expected });
            }
            expected = ordinal.node.saturating_add(1);
        }

        Ok(())
    }

    fn declare_funcs(&mut self, module: &ast::Module) -> ValidationResult<()> {
        for func_decl in &module.funcs {
            let ident = func_decl.name.with_source(self.source_id);

            let func_id = self.symbols.funcs.insert(FunctionSymbol {
                ident,
                ordinal: func_decl.ordinal.node,

                ret_ty: func_decl.ret_ty,
                param_tys: func_decl.params.iter().map(|p| p.ty).collect(),
            });

            if let Some(first) = self.func_lookup.insert(ident.istr, func_id) {
                return Err(ValidationError::DuplicateFunction {
                    first: self.symbols.funcs[first].ident,
                    second: ident,
                });
            }
        }

        Ok(())
    }

    fn check_ident_lengths(&self, module: &ast::Module) -> ValidationResult<()> {
        for func_decl in &module.funcs {
            self.check_ident_length(func_decl.name, IdentRole::Function)?;

            for param in &func_decl.params {
                self.check_ident_length(param.ident, IdentRole::Param)?;
            }

            for stmt in &func_decl.block.stmts {
                self.check_declared_lengths(stmt)?;
            }
        }

        Ok(())
    }

    fn check_declared_lengths(&self, stmt: &ast::Stmt) -> ValidationResult<()> {
        match stmt {
            ast::Stmt::Declare { ident, .. } => {
                self.check_ident_length(*ident, IdentRole::Variable)
            }

            ast::Stmt::IfZero { then: stmt, .. } | ast::Stmt::WhileNonZero { body: stmt, .. } => {
                self.check_declared_lengths(stmt)
            }

            ast::Stmt::Block(block) => block
                .stmts
                .iter()
                .try_for_each(|stmt| self.check_declared_lengths(stmt)),

            ast::Stmt::Assign { .. } | ast::Stmt::Return(_) | ast::Stmt::Call(_) => Ok(()),
        }
    }

    fn check_ident_length(&self, ident: Ident, role: IdentRole) -> ValidationResult<()> {
        let max_len = match role {
            IdentRole::Function => self.rules.max_function_name,
            IdentRole::Param | IdentRole::Variable => self.rules.max_variable_name,
        };

        if self.interner[ident.istr].chars().count() > max_len {
            return Err(ValidationError::IdentifierTooLong {
                ident: ident.with_source(self.source_id),
                role,
                max_len,
            });
        }

        Ok(())
    }

    fn lower_func_decl(
        &mut self,
        func_decl: &ast::FuncDecl,
        id: FuncId,
    ) -> ValidationResult<ir::FuncDecl> {
        self.local_stack.clear();
        self.func_locals.clear();

        for param in &func_decl.params {
            self.declare_local(param.ident, param.ty, LocalKind::Param)?;
        }

        let body = self.lower_block(&func_decl.block)?;

        let func_decl = ir::FuncDecl {
            id,
            locals: std::mem::take(&mut self.func_locals),
            num_params: func_decl.params.len(),
            body,
        };

        if func_decl.locals.len() > self.rules.max_locals {
            return Err(ValidationError::CrowdedFunction {
                func: self.symbols.funcs[id].ident,
                num_locals: func_decl.locals.len(),
                max_locals: self.rules.max_locals,
            });
        }

        check_lonely(&func_decl, &self.symbols)?;

        Ok(func_decl)
    }

    fn lower_block(&mut self, block: &ast::Block) -> ValidationResult<ir::Block> {
        self.in_scope(|resolver| {
            let stmts = block
                .stmts
                .iter()
                .map(|stmt| resolver.lower_stmt(stmt))
                .collect::<ValidationResult<_>>()?;

            Ok(ir::Block { stmts })
        })
    }

    fn lower_stmt(&mut self, stmt: &ast::Stmt) -> ValidationResult<ir::Stmt> {
        let stmt = match stmt {
            ast::Stmt::Declare { ident, ty, expr } => {
                // the initializer can't see the variable it initializes
                let expr = self.lower_expr(expr)?;
                let local = self.declare_local(*ident, *ty, LocalKind::Var)?;

                ir::Stmt::Assign { local, expr }
            }

            ast::Stmt::Assign { ident, expr } => {
                let local = self.lookup_local(*ident)?;
                let expr = self.lower_expr(expr)?;

                ir::Stmt::Assign { local, expr }
            }

            ast::Stmt::IfZero { cond, then } => {
                let cond = self.lower_expr(cond)?;
                let then = self.in_scope(|resolver| resolver.lower_stmt(then))?;

                ir::Stmt::IfZero {
                    cond,
                    then: Box::new(then),
                }
            }

            ast::Stmt::WhileNonZero { cond, body } => {
                let cond = self.lower_expr(cond)?;
                let body = self.in_scope(|resolver| resolver.lower_stmt(body))?;

                ir::Stmt::WhileNonZero {
                    cond,
                    body: Box::new(body),
                }
            }

            ast::Stmt::Block(block) => ir::Stmt::Block(self.lower_block(block)?),

            ast::Stmt::Return(expr) => ir::Stmt::Return(self.lower_expr(expr)?),

            ast::Stmt::Call(call) => {
                let kind = self.lower_call(call)?;
                ir::Stmt::Eval(ir::Expr::new(kind, call.span))
            }
        };

        Ok(stmt)
    }

    fn lower_expr(&mut self, expr: &ast::Expr) -> ValidationResult<ir::Expr> {
        let kind = match &expr.kind {
            ast::ExprKind::Integer(n) => ir::ExprKind::Constant(*n),

            ast::ExprKind::Var(ident) => ir::ExprKind::Var(self.lookup_local(*ident)?),

            ast::ExprKind::BinOp { op, lhs, rhs } => ir::ExprKind::BinOp {
                op: *op,
                lhs: Box::new(self.lower_expr(lhs)?),
                rhs: Box::new(self.lower_expr(rhs)?),
            },

            ast::ExprKind::Call(call) => self.lower_call(call)?,
        };

        Ok(ir::Expr::new(kind, expr.span))
    }

    fn lower_call(&mut self, call: &ast::Call) -> ValidationResult<ir::ExprKind> {
        let (callee, expected) = self.resolve_callee(call.callee)?;

        if call.args.len() != expected {
            return Err(ValidationError::ArityMismatch {
                callee: call.callee.with_source(self.source_id),
                expected,
                found: call.args.len(),
            });
        }

        let args = call
            .args
            .iter()
            .map(|arg| self.lower_expr(arg))
            .collect::<ValidationResult<_>>()?;

        Ok(ir::ExprKind::Call { callee, args })
    }

    /// Functions of the program shadow external functions of the same name.
    fn resolve_callee(&mut self, ident: Ident) -> ValidationResult<(ir::Callee, usize)> {
        if let Some(&func_id) = self.func_lookup.get(&ident.istr) {
            let arity = self.symbols.funcs[func_id].param_tys.len();
            return Ok((ir::Callee::Func(func_id), arity));
        }

        let name = &self.interner[ident.istr];
        let Some(external) = self.externals.get(name) else {
            return Err(ValidationError::UnresolvedCall(
                ident.with_source(self.source_id),
            ));
        };

        let extern_id = match self.extern_lookup.get(name) {
            Some(&extern_id) => extern_id,
            None => {
                let extern_id = self.symbols.externals.insert(ExternSymbol {
                    name: external.name.clone(),
                    arity: external.arity,
                });
                self.extern_lookup.insert(external.name.clone(), extern_id);
                extern_id
            }
        };

        Ok((ir::Callee::External(extern_id), external.arity))
    }

    fn declare_local(
        &mut self,
        ident: Ident,
        ty: Type,
        kind: LocalKind,
    ) -> ValidationResult<LocalId> {
        let ident = ident.with_source(self.source_id);

        if let Some(first) = self.find_local(ident.istr) {
            return Err(ValidationError::DuplicateVariable {
                first: self.symbols.locals[first].ident,
                second: ident,
            });
        }

        let id = self.symbols.locals.insert(LocalSymbol { ident, kind, ty });

        self.local_stack.push(LocalEntry {
            istr: ident.istr,
            id,
        });
        self.func_locals.push(id);

        Ok(id)
    }

    fn lookup_local(&self, ident: Ident) -> ValidationResult<LocalId> {
        self.find_local(ident.istr)
            .ok_or_else(|| ValidationError::UndefinedVariable(ident.with_source(self.source_id)))
    }

    fn find_local(&self, istr: Istr) -> Option<LocalId> {
        self.local_stack
            .iter()
            .rev()
            .find(|entry| entry.istr == istr)
            .map(|entry| entry.id)
    }

    fn in_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let len = self.local_stack.len();
        let result = f(self);
        self.local_stack.truncate(len);
        result
    }
}
