pub mod tokens;
pub mod syntax;

use std::fmt;
use crate::types::{SourceLine, TranslateOptions};

/// Module-level aggregate error type. Unifies all line-level translation errors.
/// Each variant carries the 1-based line number it was raised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// The line tokenizer did not consume the whole line.
    Syntax { line: usize, msg: String },
    /// More words on a line than [TranslateOptions::max_words] allows.
    TooManyWords { line: usize, count: usize, max: usize },
    /// A word longer than [TranslateOptions::max_word_len] allows.
    WordTooLong { line: usize, word: String, max: usize },
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateError::Syntax { line, msg } =>
                write!(f, "line {}: could not split line: {}", line, msg),
            TranslateError::TooManyWords { line, count, max } =>
                write!(f, "line {}: {} words exceeds the limit of {}", line, count, max),
            TranslateError::WordTooLong { line, word, max } =>
                write!(f, "line {}: `{}` is longer than {} characters", line, word, max),
        }
    }
}

impl std::error::Error for TranslateError {}

/// Split, check and classify one raw line of ML source.
pub fn parse_line(number: usize, raw: &str, opts: &TranslateOptions)
    -> Result<SourceLine, TranslateError>
{
    let (rest, (indent, words)) = tokens::line(raw)
        .map_err(|e| TranslateError::Syntax { line: number, msg: format!("{:?}", e) })?;

    if !rest.is_empty() {
        return Err(TranslateError::Syntax {
            line: number,
            msg: format!("unconsumed input {:?}", rest),
        });
    }

    if let Some(max) = opts.max_words {
        if words.len() > max {
            return Err(TranslateError::TooManyWords { line: number, count: words.len(), max });
        }
    }

    if let Some(max) = opts.max_word_len {
        if let Some(w) = words.iter().find(|w| w.chars().count() > max) {
            return Err(TranslateError::WordTooLong { line: number, word: w.to_string(), max });
        }
    }

    let statement = syntax::classify(&words);
    log::debug!("line {} (indent {}): {:?}", number, indent, statement.kind());

    Ok(SourceLine { number, indent, statement })
}
