//! Error types for the code generator.
//!
//! spec §7 names three error kinds. The original reports `OutputOpen`
//! through a listing stream and a module-level `Error` boolean, and treats
//! the other two as effectively fatal aborts. Per spec §9's design note
//! against static mutable state, all three become variants of one
//! `Result`-carried error rather than out-of-band flags.

use std::fmt;

/// Everything that can go wrong generating code for a translation unit.
#[derive(Debug)]
pub enum CodeGenError {
    /// The output path could not be opened for writing.
    OutputOpen(std::io::Error),
    /// A deferred jump's label was never defined by the time emission
    /// finished. Indicates an internal bug in the emitter, not a problem
    /// with the input program.
    UnresolvedLabel(String),
    /// A structural precondition the front end is supposed to guarantee
    /// was violated (an `Id` node with no `declaration`, an array
    /// declaration with `val == 0` that isn't a parameter, an unknown
    /// operator, a callee `lookupSymbol` couldn't find, ...).
    InvalidNode(String),
}

impl fmt::Display for CodeGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeGenError::OutputOpen(e) => write!(f, "unable to open output file for writing: {e}"),
            CodeGenError::UnresolvedLabel(name) => write!(f, "label {name:?} was never defined"),
            CodeGenError::InvalidNode(msg) => write!(f, "invalid AST node: {msg}"),
        }
    }
}

impl std::error::Error for CodeGenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodeGenError::OutputOpen(e) => Some(e),
            _ => None,
        }
    }
}
