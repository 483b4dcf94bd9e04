use serde::{Deserialize, Serialize};

/// Identifiers in ML source: function names, parameters and assignment targets.
pub type Symbol = String;

/// Word limits applied by [TranslateOptions::legacy].
pub const LEGACY_MAX_WORDS: usize = 20;
pub const LEGACY_MAX_WORD_LEN: usize = 12;

/// The closed set of line classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Skip,
    FunctionHeader,
    Return,
    Print,
    Assignment,
    GenericExpression,
}

/// `function <name> <params..>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHeader {
    pub name: Symbol,
    pub params: Vec<Symbol>,
}

/// A classified line. Expression operands are kept as their raw words, they are
/// never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Blank line or `#` comment.
    Skip,
    FunctionHeader(FunctionHeader),
    Return(Vec<String>),
    Print(Vec<String>),
    /// `<target> <- <expr..>`
    Assignment(Symbol, Vec<String>),
    GenericExpression(Vec<String>),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Skip => StatementKind::Skip,
            Statement::FunctionHeader(_) => StatementKind::FunctionHeader,
            Statement::Return(_) => StatementKind::Return,
            Statement::Print(_) => StatementKind::Print,
            Statement::Assignment(..) => StatementKind::Assignment,
            Statement::GenericExpression(_) => StatementKind::GenericExpression,
        }
    }
}

/// One input line after splitting and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based position in the input.
    pub number: usize,
    /// Count of leading tab characters.
    pub indent: usize,
    pub statement: Statement,
}

/// Knobs for the translation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Reject lines with more words than this.
    pub max_words: Option<usize>,
    /// Reject lines containing a word longer than this (in characters).
    pub max_word_len: Option<usize>,
    /// Rewrite `f a b` into `f(a, b)` for functions declared earlier in the input.
    pub rewrite_calls: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            max_words: None,
            max_word_len: None,
            rewrite_calls: true,
        }
    }
}

impl TranslateOptions {
    /// At most 20 words per line and 12 characters per word, enforced as hard
    /// errors instead of truncating.
    pub fn legacy() -> Self {
        TranslateOptions {
            max_words: Some(LEGACY_MAX_WORDS),
            max_word_len: Some(LEGACY_MAX_WORD_LEN),
            ..Default::default()
        }
    }
}
