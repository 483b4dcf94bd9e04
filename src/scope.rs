use crate::types::Statement;

/// Whether emission is inside a function body.
///
/// A function body is the maximal run of non-skip lines that are strictly more
/// indented than its header. Functions never nest, so at most one body is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    TopLevel,
    InFunction {
        /// Indent level of the header that opened the body.
        baseline: usize,
    },
}

impl Default for Scope {
    fn default() -> Self {
        Scope::TopLevel
    }
}

impl Scope {
    pub fn in_function(&self) -> bool {
        matches!(self, Scope::InFunction { .. })
    }

    /// Advance over one line. Returns the next state and whether the open body
    /// must be closed before this line is emitted.
    pub fn step(self, indent: usize, stmt: &Statement) -> (Scope, bool) {
        match (self, stmt) {
            (_, Statement::Skip) => (self, false),
            // A header always closes the previous body and opens its own
            (_, Statement::FunctionHeader(_)) =>
                (Scope::InFunction { baseline: indent }, self.in_function()),
            (Scope::InFunction { baseline }, _) if indent <= baseline =>
                (Scope::TopLevel, true),
            _ => (self, false),
        }
    }

    /// Whether a body is still open at end of input.
    pub fn finish(self) -> bool {
        self.in_function()
    }
}
