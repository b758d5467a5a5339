//! Symbol lookup: the one capability the back end needs from outside its
//! own AST traversal (spec §6).
//!
//! The front end's real symbol table (scoping, shadowing, redeclaration
//! diagnostics) is out of scope here — by the time the back end runs, every
//! `Id` expression node already carries a resolved `declaration` (spec §3's
//! invariant). The single remaining lookup the back end has to do itself is
//! resolving a `Call` node's callee name to a frame size, to compute
//! `-calleeFunc->localSize` when emitting the calling sequence (spec §4.5,
//! "Call", step 3). That's the only field of the callee's declaration the
//! calling convention ever reads, so the lookup capability is narrowed to
//! exactly that rather than handing back a whole declaration handle.

use crate::ast::{DecKind, NodeId, NodeKind, Tree};
use crate::common::{intern, Id, Map};

/// Resolves a callee name to its frame size, called exactly at `Call`
/// sites (spec §6).
pub trait SymbolLookup {
    fn local_size(&self, name: Id) -> Option<i32>;
}

/// A flat symbol table built from a program's top-level declarations, plus
/// the two built-in runtime primitives (spec §4.6).
///
/// C-minus has no nested function declarations and no multiple translation
/// units (spec §1's Non-goals), so "every function declared anywhere in the
/// program" and "every function callable from anywhere in the program" are
/// the same set; a single flat map suffices.
#[derive(Debug, Default)]
pub struct SymbolTable {
    local_sizes: Map<Id, i32>,
}

/// `input`/`output` have no declared parameters or locals in the AST (their
/// bodies are hand-emitted, not generated from a `FuncDec` — spec §4.6) but
/// still need a frame size for the calling convention: just the three-word
/// save area.
const BUILTIN_LOCAL_SIZE: i32 = 3;

impl SymbolTable {
    /// Build a symbol table from the sibling chain of top-level
    /// declarations headed by `program`. Must be called after
    /// `crate::layout::analyze_sizes` has populated every `FuncDec`'s
    /// `local_size`.
    pub fn from_program(tree: &Tree, program: Option<NodeId>) -> Self {
        let mut local_sizes = Map::new();
        local_sizes.insert(intern("input"), BUILTIN_LOCAL_SIZE);
        local_sizes.insert(intern("output"), BUILTIN_LOCAL_SIZE);
        for id in tree.siblings(program) {
            let node = tree.node(id);
            if let NodeKind::Dec(DecKind::FuncDec) = node.kind {
                if let Some(name) = node.name {
                    local_sizes.insert(name, node.local_size);
                }
            }
        }
        SymbolTable { local_sizes }
    }
}

impl SymbolLookup for SymbolTable {
    fn local_size(&self, name: Id) -> Option<i32> {
        self.local_sizes.get(&name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DataType::*;
    use crate::layout::analyze_sizes;

    #[test]
    fn builtins_are_always_resolvable() {
        let table = SymbolTable::from_program(&Tree::new(), None);
        assert_eq!(table.local_size(intern("input")), Some(3));
        assert_eq!(table.local_size(intern("output")), Some(3));
        assert_eq!(table.local_size(intern("nonexistent")), None);
    }

    #[test]
    fn user_functions_resolve_to_their_analyzed_frame_size() {
        let mut tree = Tree::new();
        let local = tree.scalar_dec("t", Int);
        let f = tree.func_dec("f", Void, None, Some(local), None);
        analyze_sizes(&mut tree, Some(f), 1).unwrap();

        let table = SymbolTable::from_program(&tree, Some(f));
        assert_eq!(table.local_size(intern("f")), Some(4));
    }
}
