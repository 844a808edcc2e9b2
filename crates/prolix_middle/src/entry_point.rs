use prolix_interner::Interner;
use prolix_ir::symbols::{FuncId, Symbols};

use crate::error::{ValidationError, ValidationResult};

pub fn check_entry_point(symbols: &Symbols, interner: &Interner) -> ValidationResult<FuncId> {
    let main_istr = interner
        .get_interned("main")
        .ok_or(ValidationError::MissingMain)?;

    let (main_id, main) = symbols
        .funcs
        .iter_keyed()
        .find(|(_, func)| func.ident.istr == main_istr)
        .ok_or(ValidationError::MissingMain)?;

    if !main.param_tys.is_empty() {
        return Err(ValidationError::MainSignature {
            main: main.ident,
            num_params: main.param_tys.len(),
        });
    }

    Ok(main_id)
}
