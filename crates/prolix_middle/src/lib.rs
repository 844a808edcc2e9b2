mod entry_point;
mod error;
mod externals;
mod lonely;
mod resolver;
mod rules;


pub use error::{IdentRole, OrdinalWarning, ValidationError, ValidationErrorKind, ValidationResult};
pub use externals::{ExternalFunction, ExternalTable};
pub use rules::ValidationRules;

use entry_point::check_entry_point;
use prolix_frontend::ast;
use prolix_interner::Interner;
use prolix_ir::ir::Module;
use prolix_ir::symbols::{FuncId, Symbols};
use prolix_session::sourcemap::SourceId;
use resolver::Resolver;

/// A program that passed every check, ready for codegen.
#[derive(Debug, Clone)]
pub struct ValidatedProgram {
    pub module: Module,
    pub symbols: Symbols,
    pub entry: FuncId,
}

/// Runs every check in order and stops at the first failure.
pub fn validate(
    ast: &ast::Module,
    source_id: SourceId,
    interner: &Interner,
    externals: &ExternalTable,
    rules: ValidationRules,
) -> (ValidationResult<ValidatedProgram>, Vec<OrdinalWarning>) {
    let (resolved, warnings) = Resolver::new(source_id, interner, externals, rules).run(ast);

    let result = resolved.and_then(|(module, symbols)| {
        let entry = check_entry_point(&symbols, interner)?;

        Ok(ValidatedProgram {
            module,
            symbols,
            entry,
        })
    });

    (result, warnings)
}
