/// Functions outside the program that calls may resolve to.
#[derive(Debug, Clone, Default)]
pub struct ExternalTable {
    functions: Vec<ExternalFunction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFunction {
    pub name: String,
    pub arity: usize,
}

impl ExternalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The C runtime functions linked into every executable.
    pub fn c_runtime() -> Self {
        Self::new().with("putchar", 1).with("getchar", 0)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, arity: usize) -> Self {
        self.functions.push(ExternalFunction {
            name: name.into(),
            arity,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ExternalFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::ExternalTable;

    #[test]
    fn c_runtime() {
        let table = ExternalTable::c_runtime();

        assert_eq!(table.get("putchar").map(|f| f.arity), Some(1));
        assert_eq!(table.get("getchar").map(|f| f.arity), Some(0));
        assert!(table.get("printf").is_none());
    }
}
