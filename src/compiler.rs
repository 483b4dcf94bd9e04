use std::{collections::{HashMap, HashSet}, fmt};
use tap::Tap;
use crate::{
    parser::{parse_line, TranslateError},
    scope::Scope,
    types::{FunctionHeader, SourceLine, Statement, Symbol, TranslateOptions},
};

/// Fixed library includes at the top of every generated program.
pub const PREAMBLE: &str = "#include <stdio.h>\n#include <math.h>\n";

const INDENT: &str = "    ";

/// A complete C translation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CSource(pub String);

impl fmt::Display for CSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translate a whole ML program to C in a single pass over its lines.
pub fn translate(source: &str, opts: &TranslateOptions) -> Result<CSource, TranslateError> {
    let mut generator = Generator::new(opts);
    for (i, raw) in source.lines().enumerate() {
        let line = parse_line(i + 1, raw, opts)?;
        generator.feed(&line);
    }

    Ok(generator.finish()
        .tap(|src| log::trace!("generated C source:\n{}", src)))
}

/// Accumulates generated C for one run.
///
/// Function definitions and the body of `main` are kept in separate buffers so
/// that every ML function becomes a top-level C function ahead of `main`.
pub struct Generator<'o> {
    opts: &'o TranslateOptions,
    scope: Scope,
    functions: String,
    main: String,
    /// Functions declared so far, with their parameter count.
    arity: HashMap<Symbol, usize>,
    /// Names already declared as locals of `main`.
    main_locals: HashSet<Symbol>,
    /// Parameters and locals of the open function.
    fn_locals: HashSet<Symbol>,
}

impl<'o> Generator<'o> {
    pub fn new(opts: &'o TranslateOptions) -> Self {
        Generator {
            opts,
            scope: Scope::default(),
            functions: String::new(),
            main: String::new(),
            arity: HashMap::new(),
            main_locals: HashSet::new(),
            fn_locals: HashSet::new(),
        }
    }

    /// Emit one classified line, closing the open function body first if the
    /// line is not indented past its header.
    pub fn feed(&mut self, line: &SourceLine) {
        let (next, close) = self.scope.step(line.indent, &line.statement);
        if close {
            self.close_function();
        }
        self.scope = next;

        match &line.statement {
            Statement::Skip => {},
            Statement::FunctionHeader(header) => self.open_function(header),
            stmt => {
                let text = self.render(stmt);
                log::debug!("line {} -> {}", line.number, text);

                let body = if self.scope.in_function() { &mut self.functions } else { &mut self.main };
                body.push_str(INDENT);
                body.push_str(&text);
                body.push('\n');
            },
        }
    }

    /// Close anything still open and assemble the program.
    pub fn finish(mut self) -> CSource {
        if self.scope.finish() {
            self.close_function();
            self.scope = Scope::TopLevel;
        }

        let mut out = String::with_capacity(
            PREAMBLE.len() + self.functions.len() + self.main.len() + 64);
        out.push_str(PREAMBLE);
        out.push('\n');
        out.push_str(&self.functions);
        out.push_str("int main(void) {\n");
        out.push_str(&self.main);
        out.push_str(INDENT);
        out.push_str("return 0;\n}\n");

        CSource(out)
    }

    fn open_function(&mut self, header: &FunctionHeader) {
        let params = if header.params.is_empty() {
            "void".to_string()
        } else {
            header.params.iter()
                .map(|p| format!("double {}", p))
                .collect::<Vec<_>>()
                .join(", ")
        };
        log::debug!("opening function {}({})", header.name, params);

        self.functions.push_str(&format!("double {}({}) {{\n", header.name, params));
        self.fn_locals = header.params.iter().cloned().collect();
        if !header.name.is_empty() {
            self.arity.insert(header.name.clone(), header.params.len());
        }
    }

    fn close_function(&mut self) {
        // Bodies that fall off the end still return a double
        self.functions.push_str(INDENT);
        self.functions.push_str("return 0.0;\n}\n\n");
        self.fn_locals.clear();
    }

    fn render(&mut self, stmt: &Statement) -> String {
        match stmt {
            Statement::Return(expr) if expr.is_empty() => "return;".to_string(),
            Statement::Return(expr) => format!("return {};", self.expr(expr)),
            Statement::Print(expr) if expr.is_empty() => "printf(\"%.6f\\n\", );".to_string(),
            Statement::Print(expr) => format!("printf(\"%.6f\\n\", (double)({}));", self.expr(expr)),
            Statement::Assignment(target, expr) => {
                let value = self.expr(expr);
                let locals = if self.scope.in_function() { &mut self.fn_locals } else { &mut self.main_locals };
                // First assignment in a scope declares, later ones mutate
                if locals.insert(target.clone()) {
                    format!("double {} = {};", target, value)
                } else {
                    format!("{} = {};", target, value)
                }
            },
            Statement::GenericExpression(words) => format!("{};", self.expr(words)),
            Statement::Skip | Statement::FunctionHeader(_) => String::new(),
        }
    }

    /// Names declared in the scope currently being emitted.
    fn locals(&self) -> &HashSet<Symbol> {
        if self.scope.in_function() { &self.fn_locals } else { &self.main_locals }
    }

    /// Re-join expression words with single spaces, turning prefix calls to
    /// known functions into C call syntax.
    fn expr(&self, words: &[String]) -> String {
        if !self.opts.rewrite_calls {
            return words.join(" ");
        }

        let mut terms = vec![];
        let mut rest = words;
        while let Some((term, tail)) = self.term(rest) {
            terms.push(term);
            rest = tail;
        }
        terms.join(" ")
    }

    /// Take one term off the front of `words`. A known function name consumes as
    /// many following terms as it has parameters, or whatever is left. Parameters
    /// and locals shadow functions of the same name.
    fn term<'w>(&self, words: &'w [String]) -> Option<(String, &'w [String])> {
        let (first, mut rest) = words.split_first()?;
        let arity = match self.arity.get(first) {
            Some(n) if !self.locals().contains(first) => *n,
            _ => return Some((first.clone(), rest)),
        };

        let mut args = Vec::with_capacity(arity);
        while args.len() < arity {
            match self.term(rest) {
                Some((arg, tail)) => {
                    args.push(arg);
                    rest = tail;
                },
                None => break,
            }
        }
        Some((format!("{}({})", first, args.join(", ")), rest))
    }
}
