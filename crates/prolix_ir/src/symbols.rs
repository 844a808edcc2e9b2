use prolix_utils::keyvec::KeyVec;

use crate::{IdentWithSource, Type};

#[derive(Default, Debug, Clone, serde::Serialize)]
pub struct Symbols {
    pub locals: KeyVec<LocalId, LocalSymbol>,
    pub funcs: KeyVec<FuncId, FunctionSymbol>,

    /// External functions actually called, in order of first use.
    pub externals: KeyVec<ExternId, ExternSymbol>,
}

prolix_utils::declare_key_type! {
    #[derive(serde::Serialize)]
    pub struct LocalId;
}

prolix_utils::declare_key_type! {
    #[derive(serde::Serialize)]
    pub struct FuncId;
}

prolix_utils::declare_key_type! {
    #[derive(serde::Serialize)]
    pub struct ExternId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum LocalKind {
    Param,
    Var,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LocalSymbol {
    pub ident: IdentWithSource,
    pub kind: LocalKind,
    pub ty: Type,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FunctionSymbol {
    pub ident: IdentWithSource,
    pub ordinal: i32,

    pub ret_ty: Type,
    pub param_tys: Vec<Type>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ExternSymbol {
    pub name: String,
    pub arity: usize,
}
