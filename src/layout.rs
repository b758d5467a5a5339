//! The two preparatory AST analyses (spec §4.2, §4.3): computing each
//! function's frame size and every variable's stack offset.
//!
//! Both are post-order walks over the same tree, so they're implemented as
//! two independent recursive functions sharing the same sibling-chain
//! traversal shape. The original keeps their running totals (`size`, `GP`,
//! `LP`) as C `static` locals that live across the whole walk; spec §9's
//! design note calls that out as a hazard, so here they're `&mut i32`
//! cursors threaded explicitly through the recursion and reset at exactly
//! the points spec §4.2/§4.3 specify (function entry, or the program root
//! for globals) rather than the original's more permissive
//! `(FuncDec) || isGlobal` condition — see spec §9's "Open questions /
//! probable source bugs" for why the corrected condition is the one
//! implemented.

use tracing::debug;

use crate::ast::{DecKind, NodeId, NodeKind, Tree};
use crate::error::CodeGenError;

/// The size, in words, of one declared variable.
///
/// - a scalar: one word.
/// - an array parameter: one word (arrays are passed by reference).
/// - an array local/global: `word_size * val` words.
pub fn var_size(tree: &Tree, id: NodeId, word_size: i32) -> i32 {
    let node = tree.node(id);
    match node.kind {
        NodeKind::Dec(DecKind::ScalarDec) => word_size,
        NodeKind::Dec(DecKind::ArrayDec) => {
            if node.is_parameter {
                word_size
            } else {
                word_size * node.val as i32
            }
        }
        _ => 0,
    }
}

/// Compute `local_size` for every `FuncDec` (and, along the way, a running
/// cumulative size on every variable declaration — spec §3 calls this a
/// "secondary role" for `local_size` on non-function nodes).
///
/// `program` is the sibling-chain head of the whole translation unit
/// (top-level declarations, in order).
pub fn analyze_sizes(tree: &mut Tree, program: Option<NodeId>, word_size: i32) -> Result<(), CodeGenError> {
    let mut global_size = 0;
    walk_sizes(tree, program, &mut global_size, word_size)
}

fn walk_sizes(tree: &mut Tree, start: Option<NodeId>, size: &mut i32, word_size: i32) -> Result<(), CodeGenError> {
    let mut cur = start;
    while let Some(id) = cur {
        let kind = tree.node(id).kind;
        if matches!(kind, NodeKind::Dec(DecKind::FuncDec)) {
            let mut local_size = 0;
            let children = tree.node(id).children;
            for child in children {
                walk_sizes(tree, child, &mut local_size, word_size)?;
            }
            let frame_size = local_size + 3;
            tree.node_mut(id).local_size = frame_size;
            let name = tree.node(id).name;
            debug!(function = ?name, frame_size, "computed localSize attribute");
        } else {
            let children = tree.node(id).children;
            for child in children {
                walk_sizes(tree, child, size, word_size)?;
            }
            if matches!(kind, NodeKind::Dec(DecKind::ScalarDec) | NodeKind::Dec(DecKind::ArrayDec)) {
                let node = tree.node(id);
                if matches!(kind, NodeKind::Dec(DecKind::ArrayDec)) && node.val == 0 && !node.is_parameter {
                    let name = node.name;
                    return Err(CodeGenError::InvalidNode(format!(
                        "array declaration {name:?} has length 0 but is not a parameter (spec §3 invariant)"
                    )));
                }
                *size += var_size(tree, id, word_size);
                tree.node_mut(id).local_size = *size;
            }
        }
        cur = tree.node(id).sibling;
    }
    Ok(())
}

/// Assign a final stack `offset` to every variable declaration: a
/// non-negative, monotonically increasing offset from the global pointer
/// for globals, and a descending negative offset from the frame pointer
/// (reset to `-2` on entry to each function) for locals and parameters.
pub fn analyze_offsets(tree: &mut Tree, program: Option<NodeId>, word_size: i32) -> Result<(), CodeGenError> {
    let mut gp = 0;
    let mut lp = -2;
    walk_offsets(tree, program, &mut gp, &mut lp, word_size)
}

fn walk_offsets(
    tree: &mut Tree,
    start: Option<NodeId>,
    gp: &mut i32,
    lp: &mut i32,
    word_size: i32,
) -> Result<(), CodeGenError> {
    let mut cur = start;
    while let Some(id) = cur {
        let kind = tree.node(id).kind;
        if matches!(kind, NodeKind::Dec(DecKind::FuncDec)) {
            let mut local_lp = -2;
            let children = tree.node(id).children;
            for child in children {
                walk_offsets(tree, child, gp, &mut local_lp, word_size)?;
            }
        } else {
            let children = tree.node(id).children;
            for child in children {
                walk_offsets(tree, child, gp, lp, word_size)?;
            }
            if matches!(kind, NodeKind::Dec(DecKind::ScalarDec) | NodeKind::Dec(DecKind::ArrayDec)) {
                let size = var_size(tree, id, word_size);
                let node = tree.node_mut(id);
                if node.is_global {
                    node.offset = *gp;
                    let name = node.name;
                    let offset = node.offset;
                    *gp += size;
                    debug!(?name, offset, "computed offset attribute (global)");
                } else {
                    *lp -= size;
                    node.offset = *lp;
                    let name = node.name;
                    let offset = node.offset;
                    debug!(?name, offset, "computed offset attribute (local)");
                }
            }
        }
        cur = tree.node(id).sibling;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DataType::*;

    /// Property 2 — frame-size consistency: `local_size == 3 + sum(varSize)`
    /// over a function's locals and parameters.
    #[test]
    fn frame_size_includes_three_word_save_area() {
        crate::common::init_test_tracing();
        let mut tree = Tree::new();
        let param = tree.param_dec("n", Int, None);
        let local = tree.scalar_dec("t", Int);
        let func = tree.func_dec("f", Int, Some(param), Some(local), None);

        analyze_sizes(&mut tree, Some(func), 1).unwrap();

        assert_eq!(tree.node(func).local_size, 3 + 1 + 1);
    }

    #[test]
    fn array_parameter_costs_one_word_array_local_costs_its_length() {
        let mut tree = Tree::new();
        let param = tree.param_dec("a", Int, Some(0));
        let local = tree.array_dec("buf", Int, 10);
        let func = tree.func_dec("f", Void, Some(param), Some(local), None);

        analyze_sizes(&mut tree, Some(func), 1).unwrap();

        assert_eq!(tree.node(func).local_size, 3 + 1 + 10);
    }

    /// Property 1 — offset disjointness: locals/parameters get disjoint
    /// negative offsets; globals get disjoint non-negative offsets.
    #[test]
    fn locals_and_params_get_disjoint_descending_offsets() {
        let mut tree = Tree::new();
        let param = tree.param_dec("n", Int, None);
        let local_a = tree.scalar_dec("a", Int);
        let local_b = tree.scalar_dec("b", Int);
        let locals = tree.chain_all([local_a, local_b]).unwrap();
        let func = tree.func_dec("f", Int, Some(param), Some(locals), None);

        analyze_sizes(&mut tree, Some(func), 1).unwrap();
        analyze_offsets(&mut tree, Some(func), 1).unwrap();

        let offsets = [tree.node(param).offset, tree.node(local_a).offset, tree.node(local_b).offset];
        assert_eq!(offsets, [-2, -3, -4]);

        let mut sorted = offsets;
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), offsets.len(), "offsets must be pairwise disjoint");
    }

    #[test]
    fn globals_get_non_negative_monotonically_increasing_offsets() {
        let mut tree = Tree::new();
        let x = tree.scalar_dec("x", Int);
        tree.node_mut(x).is_global = true;
        let arr = tree.array_dec("buf", Int, 4);
        tree.node_mut(arr).is_global = true;
        let program = tree.chain_all([x, arr]).unwrap();

        analyze_sizes(&mut tree, Some(program), 1).unwrap();
        analyze_offsets(&mut tree, Some(program), 1).unwrap();

        assert_eq!(tree.node(x).offset, 0);
        assert_eq!(tree.node(arr).offset, 1);
    }

    /// spec §3's invariant: a zero-length array declaration is only legal
    /// as a parameter (arrays are passed by reference, so the callee never
    /// needs to know the declared length).
    #[test]
    fn zero_length_non_parameter_array_is_rejected() {
        let mut tree = Tree::new();
        let bad = tree.array_dec("buf", Int, 0);
        let func = tree.func_dec("f", Void, None, Some(bad), None);

        match analyze_sizes(&mut tree, Some(func), 1) {
            Err(CodeGenError::InvalidNode(_)) => {}
            other => panic!("expected InvalidNode, got {other:?}"),
        }
    }

    #[test]
    fn each_function_gets_a_fresh_local_offset_space() {
        let mut tree = Tree::new();
        let a_local = tree.scalar_dec("t", Int);
        let f = tree.func_dec("f", Void, None, Some(a_local), None);

        let b_local = tree.scalar_dec("t", Int);
        let g = tree.func_dec("g", Void, None, Some(b_local), None);

        let program = tree.chain_all([f, g]).unwrap();
        analyze_sizes(&mut tree, Some(program), 1).unwrap();
        analyze_offsets(&mut tree, Some(program), 1).unwrap();

        assert_eq!(tree.node(a_local).offset, -3);
        assert_eq!(tree.node(b_local).offset, -3);
    }
}
