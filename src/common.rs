//! Common definitions that are shared between different parts of the back end.

// Use sorted maps for deterministic iteration (label tables, symbol tables).
pub use std::collections::BTreeMap as Map;

/// Interned identifiers: variable/function names and generated label names.
///
/// Using an interned string rather than a plain `String` makes `Id` cheap to
/// copy and compare, which matters since names flow through every AST node
/// and every emitted instruction.
pub type Id = internment::Intern<String>;

/// Intern a name. Accepts anything that converts to an owned `String` so
/// call sites can pass `&str` literals or owned `String`s uniformly.
pub fn intern(name: impl Into<String>) -> Id {
    Id::from(name.into())
}

/// The word size (in abstract "words") of a scalar or array element.
///
/// The original back end hardcodes this to 1; [`crate::CodeGenConfig`] keeps
/// it configurable so layout arithmetic isn't tied to a literal.
pub const DEFAULT_WORD_SIZE: i32 = 1;

/// Install a `tracing` subscriber once per test binary, so the `debug!`
/// traces the layout analyses emit are visible with `--nocapture` instead of
/// silently discarded.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
