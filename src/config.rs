//! Code generator configuration.
//!
//! The original has no configuration surface beyond two loosely related
//! globals: `WORDSIZE` (`CGen.h`, a `#define`) and `TraceCode` (an `extern
//! int` toggled by the driver before calling `codeGen`). Both become fields
//! on one plain struct passed by reference through the pipeline, rather
//! than compile-time constants or module statics (spec §9's design note
//! against static mutable state applies here too).

use crate::common::DEFAULT_WORD_SIZE;

/// Configuration for one `code_gen` invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeGenConfig {
    /// When set, the code generator interleaves cosmetic `* <text>`
    /// comment lines into the D-Code output describing what it is
    /// generating (function headers, statement-kind banners, effective-
    /// address calculations, ...). Mirrors the original's `TraceCode`.
    ///
    /// This only affects the emitted comment lines, never the addressed
    /// instruction stream — turning it on or off doesn't change
    /// `instruction_count()` or any address in the output.
    pub trace_code: bool,
    /// The size, in words, of one scalar or array element. The original
    /// hardcodes this to 1 (`#define WORDSIZE 1` in `CGen.h`); kept
    /// configurable here so frame-size arithmetic isn't tied to a literal
    /// sprinkled through the crate.
    pub word_size: i32,
}

impl Default for CodeGenConfig {
    fn default() -> Self {
        CodeGenConfig {
            trace_code: false,
            word_size: DEFAULT_WORD_SIZE,
        }
    }
}
