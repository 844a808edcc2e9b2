pub mod codegen;
pub mod driver;

pub use codegen::emit_module;
pub use driver::{Backend, DriverError};
