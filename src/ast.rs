//! The decorated abstract syntax tree the back end consumes.
//!
//! The front end (lexer, parser, symbol resolver, type checker) is an
//! external collaborator — see spec §1 — so this module only has to model
//! the tree shape that back end reads and the handful of fields the two
//! layout analyses (`crate::layout`) write into it.
//!
//! The original implementation represents nodes as heap-allocated structs
//! linked by raw `child`/`sibling` pointers, with identifier uses carrying a
//! `declaration` pointer back to their declaring node. Raw pointers don't
//! translate into safe Rust without a lot of unsafe machinery, so nodes live
//! in a single arena (`Tree`) and every pointer becomes a `NodeId` index into
//! it (see spec §9's design note on this).

use derive_more::Display;

use crate::common::{intern, Id};

/// An index into a [`Tree`]'s node arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(usize);

/// One of the two scalar types in C-minus.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum DataType {
    #[display("int")]
    Int,
    #[display("void")]
    Void,
}

/// Binary operators that appear in `Op` expression nodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum BinOp {
    #[display("+")]
    Plus,
    #[display("-")]
    Minus,
    #[display("*")]
    Times,
    #[display("/")]
    Divide,
    #[display("<")]
    Lt,
    #[display(">")]
    Gt,
    #[display("<=")]
    Le,
    #[display(">=")]
    Ge,
    #[display("==")]
    Eq,
    #[display("!=")]
    Ne,
}

impl BinOp {
    /// Whether this operator is relational (yields a materialized 0/1
    /// boolean) as opposed to arithmetic.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne
        )
    }
}

/// Statement sub-kinds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StmtKind {
    If,
    While,
    Return,
    Call,
    Compound,
}

/// Expression sub-kinds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExpKind {
    Op,
    Const,
    Id,
    Assign,
}

/// Declaration sub-kinds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecKind {
    ScalarDec,
    ArrayDec,
    FuncDec,
}

/// The three top-level node categories, each carrying its sub-kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeKind {
    Stmt(StmtKind),
    Exp(ExpKind),
    Dec(DecKind),
}

/// A single AST node.
///
/// Every field here exists in the original `TreeNode`; see spec §3 for the
/// precise meaning of each one. Fields irrelevant to a given `kind` are left
/// at their default (`None`/`0`/`false`) rather than modeled as a
/// `kind`-specific enum of structs, matching the source's one-struct-many-
/// fields shape — this keeps layout/emission code a straightforward field
/// read instead of a nested match just to get at `offset` or `val`.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub children: [Option<NodeId>; 3],
    pub sibling: Option<NodeId>,

    pub name: Option<Id>,
    pub val: i64,
    pub op: Option<BinOp>,
    pub variable_data_type: Option<DataType>,
    pub function_return_type: Option<DataType>,

    /// Set by the (external) symbol resolver on `Id` expression nodes.
    pub declaration: Option<NodeId>,
    pub is_global: bool,
    pub is_parameter: bool,

    /// Written by `crate::layout`: cumulative running size on variable
    /// declarations, final frame size (`3 + locals`) on `FuncDec`.
    pub local_size: i32,
    /// Written by `crate::layout`: the variable's final stack offset.
    pub offset: i32,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            children: [None, None, None],
            sibling: None,
            name: None,
            val: 0,
            op: None,
            variable_data_type: None,
            function_return_type: None,
            declaration: None,
            is_global: false,
            is_parameter: false,
            local_size: 0,
            offset: 0,
        }
    }
}

/// The AST arena. All child/sibling/declaration links are [`NodeId`]s into
/// this vector rather than pointers, so the tree is trivially `Clone`,
/// serializable, and free of lifetime parameters (spec §9).
#[derive(Clone, Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Tree { nodes: Vec::new() }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Link `tail` as the next sibling of the last node in `head`'s sibling
    /// chain, returning `head` unchanged. Used by builders to assemble
    /// sibling lists (declaration lists, statement lists, argument lists).
    pub fn chain(&mut self, head: NodeId, tail: NodeId) -> NodeId {
        let mut cur = head;
        while let Some(next) = self.node(cur).sibling {
            cur = next;
        }
        self.node_mut(cur).sibling = Some(tail);
        head
    }

    /// Chain an arbitrary number of sibling nodes together, returning the
    /// head, or `None` if `items` is empty.
    pub fn chain_all(&mut self, items: impl IntoIterator<Item = NodeId>) -> Option<NodeId> {
        let mut items = items.into_iter();
        let head = items.next()?;
        let mut tail = head;
        for item in items {
            self.node_mut(tail).sibling = Some(item);
            tail = item;
        }
        Some(head)
    }

    /// Iterate a sibling chain starting at (and including) `start`.
    pub fn siblings(&self, start: Option<NodeId>) -> Siblings<'_> {
        Siblings { tree: self, cur: start }
    }

    // ---- builders -------------------------------------------------------
    //
    // These exist because the front end that would normally construct a
    // `Tree` (lexer + parser + symbol resolver) is out of scope (spec §1).
    // Tests, and any future front end, build trees through this API instead
    // of poking at `Vec` indices directly.

    pub fn scalar_dec(&mut self, name: impl Into<String>, ty: DataType) -> NodeId {
        let mut node = Node::new(NodeKind::Dec(DecKind::ScalarDec));
        node.name = Some(intern(name));
        node.variable_data_type = Some(ty);
        self.push(node)
    }

    pub fn array_dec(&mut self, name: impl Into<String>, ty: DataType, len: i64) -> NodeId {
        let mut node = Node::new(NodeKind::Dec(DecKind::ArrayDec));
        node.name = Some(intern(name));
        node.variable_data_type = Some(ty);
        node.val = len;
        self.push(node)
    }

    /// Declare a parameter. `len` is `Some(n)` for an array parameter of
    /// declared length `n` (0 is legal per spec §3's invariant — array
    /// parameters may have unknown length), `None` for a scalar parameter.
    pub fn param_dec(&mut self, name: impl Into<String>, ty: DataType, array: Option<i64>) -> NodeId {
        let id = match array {
            Some(len) => self.array_dec(name, ty, len),
            None => self.scalar_dec(name, ty),
        };
        self.node_mut(id).is_parameter = true;
        id
    }

    /// A function declaration. `params` and `locals` are sibling-chain
    /// heads (or `None`); `body` is the statement list making up the
    /// compound body, i.e. the function's second child slot per spec §3.
    pub fn func_dec(
        &mut self,
        name: impl Into<String>,
        return_type: DataType,
        params: Option<NodeId>,
        locals: Option<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        let mut node = Node::new(NodeKind::Dec(DecKind::FuncDec));
        node.name = Some(intern(name));
        node.function_return_type = Some(return_type);
        let compound = self.compound(locals, body);
        node.children = [params, Some(compound), None];
        self.push(node)
    }

    pub fn compound(&mut self, locals: Option<NodeId>, body: Option<NodeId>) -> NodeId {
        let mut node = Node::new(NodeKind::Stmt(StmtKind::Compound));
        node.children = [locals, body, None];
        self.push(node)
    }

    pub fn const_exp(&mut self, val: i64) -> NodeId {
        let mut node = Node::new(NodeKind::Exp(ExpKind::Const));
        node.val = val;
        self.push(node)
    }

    /// A use of an identifier. `index` is `Some(expr)` for an array-element
    /// access (`a[expr]`), `None` for a scalar use or a bare array name.
    pub fn id_exp(&mut self, declaration: NodeId, index: Option<NodeId>) -> NodeId {
        let mut node = Node::new(NodeKind::Exp(ExpKind::Id));
        node.declaration = Some(declaration);
        node.children = [index, None, None];
        self.push(node)
    }

    pub fn op_exp(&mut self, op: BinOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        let mut node = Node::new(NodeKind::Exp(ExpKind::Op));
        node.op = Some(op);
        node.children = [Some(lhs), Some(rhs), None];
        self.push(node)
    }

    pub fn assign_exp(&mut self, target: NodeId, value: NodeId) -> NodeId {
        let mut node = Node::new(NodeKind::Exp(ExpKind::Assign));
        node.children = [Some(target), Some(value), None];
        self.push(node)
    }

    pub fn if_stmt(&mut self, cond: NodeId, then_branch: Option<NodeId>, else_branch: Option<NodeId>) -> NodeId {
        let mut node = Node::new(NodeKind::Stmt(StmtKind::If));
        node.children = [Some(cond), then_branch, else_branch];
        self.push(node)
    }

    pub fn while_stmt(&mut self, cond: NodeId, body: Option<NodeId>) -> NodeId {
        let mut node = Node::new(NodeKind::Stmt(StmtKind::While));
        node.children = [Some(cond), body, None];
        self.push(node)
    }

    pub fn return_stmt(&mut self, function: NodeId, value: Option<NodeId>) -> NodeId {
        let mut node = Node::new(NodeKind::Stmt(StmtKind::Return));
        node.declaration = Some(function);
        node.children = [value, None, None];
        self.push(node)
    }

    pub fn call_stmt(&mut self, callee: impl Into<String>, args: Option<NodeId>) -> NodeId {
        let mut node = Node::new(NodeKind::Stmt(StmtKind::Call));
        node.name = Some(intern(callee));
        node.children = [args, None, None];
        self.push(node)
    }
}

/// An iterator over a sibling chain.
pub struct Siblings<'a> {
    tree: &'a Tree,
    cur: Option<NodeId>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.cur?;
        self.cur = self.tree.node(cur).sibling;
        Some(cur)
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl std::ops::IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_mut(id)
    }
}
