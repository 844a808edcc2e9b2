/// Limits enforced during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Maximum length of a function name, in characters.
    pub max_function_name: usize,
    /// Maximum length of a parameter or variable name, in characters.
    pub max_variable_name: usize,
    /// Maximum number of parameters and variables in one function.
    pub max_locals: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_function_name: 4,
            max_variable_name: 32,
            max_locals: 9,
        }
    }
}
