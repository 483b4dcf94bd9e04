//! This is runml; a translator from the tab-indented ML notation to C, with a
//! driver that compiles and runs the result.

/// Split source lines into words and classify them into statements.
pub mod parser;
/// Project level types such as statements, source lines and translation options.
pub mod types;
/// Tracks whether emission is inside a function body.
pub mod scope;
/// Generates a C program from classified lines.
pub mod compiler;
/// Build and run generated C with an external compiler.
pub mod executor;
/// Collapse integral floating point values in program output.
pub mod normalizer;
/// Toolchain and translation settings loaded from JSON.
pub mod config;
/// User-facing command line interface.
pub mod cmdline;

pub use compiler::{translate, CSource};
pub use parser::TranslateError;
