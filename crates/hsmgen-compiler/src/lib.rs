//! hsmgen compiler: PlantUML state charts to state-machine source code.
//!
//! The pipeline, leaves first:
//! - `parser` - line-oriented recognizer over the PlantUML subset
//! - `resolve` - closes the model: pre-order, inherited transition tables, catalogs
//! - `plan` - per (state, event) dispatch plans: exit chains, actions, entry chains
//! - `emit` - render context construction and per-target renderers
//! - `diagnostics` - snippet rendering for syntax errors
//!
//! The core is a pure function from input text to output text; all I/O stays
//! with the caller.

pub mod diagnostics;
pub mod emit;
pub mod parser;
pub mod plan;
pub mod resolve;

#[cfg(test)]
pub mod test_utils;

pub use emit::Target;
pub use resolve::Resolved;

use hsmgen_core::Model;

/// Errors produced while parsing a chart or selecting a target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("line {line}: unrecognized statement: {text}")]
    UnrecognizedLine { line: usize, text: String },

    #[error("line {line}: unmatched '}}' with no open composite state")]
    UnbalancedClose { line: usize },

    #[error("line {line}: state '{name}' is already declared under '{parent}'")]
    ConflictingDeclaration {
        line: usize,
        name: String,
        parent: String,
    },

    #[error("unexpected end of input with {depth} unclosed composite scope(s)")]
    UnclosedScope { depth: usize, line: usize },

    #[error("unsupported target language '{requested}', available: {available}")]
    UnsupportedLanguage {
        requested: String,
        available: String,
    },
}

impl Error {
    /// 1-based line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnrecognizedLine { line, .. }
            | Error::UnbalancedClose { line }
            | Error::ConflictingDeclaration { line, .. }
            | Error::UnclosedScope { line, .. } => Some(*line),
            Error::UnsupportedLanguage { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse chart text into a model. Fail-fast on the first syntax error.
pub fn parse(source: &str) -> Result<Model> {
    parser::parse(source)
}

/// Full pipeline: parse, resolve, plan, and render for `target`.
pub fn compile(source: &str, machine_name: &str, target: Target) -> Result<String> {
    let model = parser::parse(source)?;
    let resolved = Resolved::resolve(model);
    Ok(emit::emit(&resolved, machine_name, target))
}
