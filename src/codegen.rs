//! Code emission: walks the decorated tree and drives [`crate::emit::Emitter`]
//! to produce a [`crate::emit::Program`] (spec §4.4–§4.6, §6).
//!
//! Must run after [`crate::layout::analyze_sizes`] and
//! [`crate::layout::analyze_offsets`] have populated every declaration's
//! `local_size`/`offset` — this module only reads those fields, it never
//! computes them.

use crate::ast::{BinOp, DecKind, ExpKind, NodeId, NodeKind, StmtKind, Tree};
use crate::config::CodeGenConfig;
use crate::emit::{Emitter, Program, Reg::*};
use crate::error::CodeGenError;
use crate::layout::var_size;
use crate::symtab::SymbolLookup;

/// Activation-record offset of the saved old frame pointer, relative to the
/// callee's `mp` (spec §6).
const OFP_FO: i32 = 0;
/// Activation-record offset of the return address.
const RET_FO: i32 = -1;
/// Activation-record offset of the callee's starting `tmpOffset`.
const INIT_FO: i32 = -2;

/// Generate D-Code for a whole translation unit. `program` is the
/// sibling-chain head of the top-level declarations (spec §4.6).
pub fn generate(
    tree: &Tree,
    program: Option<NodeId>,
    symbols: &impl SymbolLookup,
    config: &CodeGenConfig,
) -> Result<Program, CodeGenError> {
    let mut ctx = CodeGenCtx {
        tree,
        emitter: Emitter::new(),
        tmp_offset: 0,
        next_label: 0,
        symbols,
        config,
        current_function: None,
    };
    ctx.gen_program(program)?;
    ctx.emitter.finish()
}

struct CodeGenCtx<'a, S: SymbolLookup> {
    tree: &'a Tree,
    emitter: Emitter,
    /// Compile-time cursor into the current frame's temporary-stack area.
    /// Moves down (more negative) on every push, back up on every pop;
    /// must return to its entry value at the end of every expression or
    /// call (spec §8's Property 3).
    tmp_offset: i32,
    next_label: u32,
    symbols: &'a S,
    config: &'a CodeGenConfig,
    current_function: Option<NodeId>,
}

impl<'a, S: SymbolLookup> CodeGenCtx<'a, S> {
    fn new_label(&mut self) -> String {
        let label = format!("label{}", self.next_label);
        self.next_label += 1;
        label
    }

    fn push_ac(&mut self) {
        self.emitter.emit_rm("ST", Ac, self.tmp_offset, Mp, "push");
        self.tmp_offset -= 1;
    }

    fn pop_ac1(&mut self) {
        self.tmp_offset += 1;
        self.emitter.emit_rm("LD", Ac1, self.tmp_offset, Mp, "pop");
    }

    fn invalid(msg: impl Into<String>) -> CodeGenError {
        CodeGenError::InvalidNode(msg.into())
    }

    // ---- program shell ---------------------------------------------------

    fn gen_program(&mut self, program: Option<NodeId>) -> Result<(), CodeGenError> {
        self.emitter.emit_comment("standard prelude");
        self.emitter.emit_rm("LD", Mp, 0, Zero, "load maxaddress from location 0");
        self.emitter.emit_rm("ST", Zero, 0, Zero, "clear location 0");
        self.emitter.emit_goto("LDA", Pc, "main", Gp, "jump to main");
        self.gen_builtin_input();
        self.gen_builtin_output();
        self.gen_top_level(program)?;
        self.emitter.emit_ro("HALT", Zero, Zero, Zero, "halt");
        Ok(())
    }

    fn gen_builtin_input(&mut self) {
        self.emitter.emit_label("input", "read and return an integer");
        self.emitter.emit_rm("ST", Ac, RET_FO, Mp, "store return address");
        self.emitter.emit_ro("IN", Ac, Zero, Zero, "read integer value");
        self.emitter.emit_rm("LD", Pc, RET_FO, Mp, "return to caller");
    }

    fn gen_builtin_output(&mut self) {
        self.emitter.emit_label("output", "write an integer");
        self.emitter.emit_rm("ST", Ac, RET_FO, Mp, "store return address");
        self.emitter.emit_rm("LD", Ac, -3, Mp, "load output argument");
        self.emitter.emit_ro("OUT", Ac, Zero, Zero, "write ac");
        self.emitter.emit_rm("LD", Pc, RET_FO, Mp, "return to caller");
    }

    fn gen_top_level(&mut self, start: Option<NodeId>) -> Result<(), CodeGenError> {
        for id in self.tree.siblings(start) {
            let node = self.tree.node(id);
            match node.kind {
                NodeKind::Dec(DecKind::FuncDec) => self.gen_function(id)?,
                NodeKind::Dec(DecKind::ScalarDec) | NodeKind::Dec(DecKind::ArrayDec) => {
                    if self.config.trace_code {
                        if let Some(name) = node.name {
                            self.emitter.emit_comment(format!("processing global variable: {name}"));
                        }
                    }
                }
                _ => return Err(Self::invalid("expected a top-level declaration")),
            }
        }
        Ok(())
    }

    // ---- functions ---------------------------------------------------------

    fn emit_local_comments(&mut self, start: Option<NodeId>) {
        for id in self.tree.siblings(start) {
            let node = self.tree.node(id);
            if let Some(name) = node.name {
                let size = var_size(self.tree, id, self.config.word_size);
                self.emitter.emit_comment(format!("LOCAL {name} {} {size}", node.offset));
            }
        }
    }

    fn gen_function(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let name = node.name.ok_or_else(|| Self::invalid("function declaration without a name"))?;
        let local_size = node.local_size;
        let params = node.children[0];
        let compound = node.children[1].ok_or_else(|| Self::invalid("function declaration without a body"))?;

        if self.config.trace_code {
            self.emitter.emit_comment(format!("processing function: {name}"));
        }
        self.emitter.emit_label(name.to_string(), "function entry");
        self.emit_local_comments(params);
        self.emit_local_comments(self.tree.node(compound).children[0]);

        self.tmp_offset = -local_size;
        self.emitter.emit_rm("ST", Ac, RET_FO, Mp, "store return address");
        self.emitter.emit_rm("LDC", Ac, self.tmp_offset, Ac, "compute frame's starting offset");
        self.emitter.emit_rm("ST", Ac, INIT_FO, Mp, "store frame's starting offset");

        let prev_function = self.current_function.replace(id);
        let body = self.tree.node(compound).children[1];
        self.gen_statement_chain(body)?;
        self.current_function = prev_function;

        if name.as_str() == "main" {
            self.emitter.emit_ro("HALT", Zero, Zero, Zero, "halt");
        } else {
            self.emitter.emit_rm("LD", Pc, RET_FO, Mp, "return");
        }
        if self.config.trace_code {
            self.emitter.emit_comment(format!("end processing function: {name}"));
        }
        Ok(())
    }

    // ---- statements ---------------------------------------------------------

    fn gen_statement_chain(&mut self, start: Option<NodeId>) -> Result<(), CodeGenError> {
        for id in self.tree.siblings(start) {
            self.gen_statement(id)?;
        }
        Ok(())
    }

    fn gen_statement(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        match self.tree.node(id).kind {
            NodeKind::Exp(ExpKind::Assign) => self.gen_assign_stmt(id),
            NodeKind::Exp(_) => self.gen_expression(id, false),
            NodeKind::Stmt(StmtKind::If) => self.gen_if_stmt(id),
            NodeKind::Stmt(StmtKind::While) => self.gen_while_stmt(id),
            NodeKind::Stmt(StmtKind::Return) => self.gen_return_stmt(id),
            NodeKind::Stmt(StmtKind::Call) => self.gen_call(id),
            NodeKind::Stmt(StmtKind::Compound) => {
                let body = self.tree.node(id).children[1];
                self.gen_statement_chain(body)
            }
            NodeKind::Dec(_) => Ok(()),
        }
    }

    fn gen_assign_stmt(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let target = node.children[0].ok_or_else(|| Self::invalid("assignment without a target"))?;
        let value = node.children[1].ok_or_else(|| Self::invalid("assignment without a value"))?;

        self.gen_expression(value, false)?;
        self.push_ac();
        self.gen_expression(target, true)?;
        self.pop_ac1();
        self.emitter.emit_rm("ST", Ac1, 0, Ac, "assign");
        Ok(())
    }

    fn gen_if_stmt(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let cond = node.children[0].ok_or_else(|| Self::invalid("if without a condition"))?;
        let then_branch = node.children[1];
        let else_branch = node.children[2];

        let else_label = self.new_label();
        let end_label = self.new_label();
        self.gen_expression(cond, false)?;
        self.emitter.emit_goto("JEQ", Ac, else_label.clone(), Gp, "if: jump to else if false");
        self.gen_statement_chain(then_branch)?;
        self.emitter.emit_goto("LDA", Pc, end_label.clone(), Gp, "if: jump past else");
        self.emitter.emit_label(else_label.clone(), "if: else branch");
        self.gen_statement_chain(else_branch)?;
        self.emitter.emit_label(end_label.clone(), "if: end");
        Ok(())
    }

    fn gen_while_stmt(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let cond = node.children[0].ok_or_else(|| Self::invalid("while without a condition"))?;
        let body = node.children[1];

        let start_label = self.new_label();
        let end_label = self.new_label();

        self.emitter.emit_label(start_label.clone(), "while: loop head");
        self.gen_expression(cond, false)?;
        self.emitter.emit_goto("JEQ", Ac, end_label.clone(), Gp, "while: exit if false");
        self.gen_statement_chain(body)?;
        self.emitter.emit_goto("LDA", Pc, start_label.clone(), Gp, "while: loop back");
        self.emitter.emit_label(end_label.clone(), "while: end");
        Ok(())
    }

    fn gen_return_stmt(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let value = self.tree.node(id).children[0];
        match value {
            Some(value) => self.gen_expression(value, false)?,
            None => {
                self.emitter.emit_rm("LDC", Ac, 0, Ac, "implicit void return value");
            }
        }
        self.emitter.emit_rm("LD", Pc, RET_FO, Mp, "return to caller");
        Ok(())
    }

    fn gen_call(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let callee = node.name.ok_or_else(|| Self::invalid("call without a callee name"))?;
        let args = node.children[0];
        let callee_size = self
            .symbols
            .local_size(callee)
            .ok_or_else(|| Self::invalid(format!("call to undeclared function {callee}")))?;

        let saved_offset = self.tmp_offset;
        self.emitter.emit_rm("ST", Mp, self.tmp_offset, Mp, "save caller's frame pointer");
        self.tmp_offset -= 1;
        self.tmp_offset -= 1; // reserve the return-address slot, filled by the callee's prologue

        self.emitter.emit_rm("LDC", Ac, -callee_size, Ac, "compute callee's starting frame offset");
        self.emitter.emit_rm("ST", Ac, self.tmp_offset, Mp, "store callee's starting frame offset");
        self.tmp_offset -= 1;

        for arg in self.tree.siblings(args) {
            self.gen_expression(arg, false)?;
            self.emitter.emit_rm("ST", Ac, self.tmp_offset, Mp, "push argument");
            self.tmp_offset -= 1;
        }

        self.emitter.emit_rm("LDA", Mp, saved_offset, Mp, "move mp to callee's frame");
        self.emitter.emit_rm("LDA", Ac, 1, Pc, "compute return address");
        self.emitter.emit_goto("LDA", Pc, callee.to_string(), Gp, format!("call {callee}"));
        self.emitter.emit_rm("LD", Mp, OFP_FO, Mp, "restore caller's frame pointer");

        self.tmp_offset = saved_offset;
        Ok(())
    }

    // ---- expressions ---------------------------------------------------------

    fn gen_expression(&mut self, id: NodeId, address_needed: bool) -> Result<(), CodeGenError> {
        match self.tree.node(id).kind {
            NodeKind::Exp(ExpKind::Const) => {
                let val = self.tree.node(id).val;
                self.emitter.emit_rm("LDC", Ac, val as i32, Ac, format!("load constant {val}"));
                Ok(())
            }
            NodeKind::Exp(ExpKind::Id) => self.gen_id_expression(id, address_needed),
            NodeKind::Exp(ExpKind::Op) => self.gen_op_expression(id),
            NodeKind::Exp(ExpKind::Assign) => self.gen_assign_stmt(id),
            NodeKind::Stmt(StmtKind::Call) => self.gen_call(id),
            _ => Err(Self::invalid(format!("{id:?} is not a valid expression node"))),
        }
    }

    fn gen_id_expression(&mut self, id: NodeId, address_needed: bool) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let index = node.children[0];
        let decl_id = node
            .declaration
            .ok_or_else(|| Self::invalid("Id expression without a resolved declaration"))?;
        let decl = self.tree.node(decl_id);
        let name = decl.name.unwrap_or_else(|| crate::common::intern("<unnamed>"));
        let offset = decl.offset;
        let is_global = decl.is_global;
        let is_parameter = decl.is_parameter;
        let is_array = matches!(decl.kind, NodeKind::Dec(DecKind::ArrayDec));
        let base = if is_global { Gp } else { Mp };

        match index {
            Some(index_id) => {
                self.gen_expression(index_id, false)?;
                if is_parameter {
                    // The parameter slot holds a pointer, fetched via a memory
                    // load rather than a plain register — that competes for
                    // `ac` with the index, so it needs the usual push/pop.
                    self.push_ac();
                    self.emitter.emit_rm("LD", Ac, offset, Mp, format!("load array base of {name}"));
                    self.pop_ac1();
                    self.emitter.emit_ro("ADD", Ac, Ac1, Ac, "add index to base");
                    if !address_needed {
                        self.emitter.emit_rm("LD", Ac, 0, Ac, format!("load {name}[i]"));
                    }
                } else {
                    // A global/local array's base is already sitting in a
                    // register (`gp`/`mp`), so it can be added directly.
                    self.emitter.emit_ro("ADD", Ac, Ac, base, "add base register to index");
                    if address_needed {
                        self.emitter.emit_rm("LDA", Ac, offset, Ac, format!("address of {name}[i]"));
                    } else {
                        self.emitter.emit_rm("LD", Ac, offset, Ac, format!("load {name}[i]"));
                    }
                }
            }
            None if is_array => {
                if is_parameter {
                    self.emitter.emit_rm("LD", Ac, offset, Mp, format!("load array base of {name}"));
                } else {
                    self.emitter.emit_rm("LDA", Ac, offset, base, format!("address of array {name}"));
                }
            }
            None => {
                if address_needed {
                    self.emitter.emit_rm("LDA", Ac, offset, base, format!("address of {name}"));
                } else {
                    self.emitter.emit_rm("LD", Ac, offset, base, format!("load {name}"));
                }
            }
        }
        Ok(())
    }

    fn gen_op_expression(&mut self, id: NodeId) -> Result<(), CodeGenError> {
        let node = self.tree.node(id);
        let op = node.op.ok_or_else(|| Self::invalid("Op expression without an operator"))?;
        let lhs = node.children[0].ok_or_else(|| Self::invalid("Op expression without a left operand"))?;
        let rhs = node.children[1].ok_or_else(|| Self::invalid("Op expression without a right operand"))?;

        self.gen_expression(lhs, false)?;
        self.push_ac();
        self.gen_expression(rhs, false)?;
        self.pop_ac1();

        if op.is_relational() {
            self.gen_relational(op);
        } else {
            let opname = match op {
                BinOp::Plus => "ADD",
                BinOp::Minus => "SUB",
                BinOp::Times => "MUL",
                BinOp::Divide => "DIV",
                _ => unreachable!("relational operators are handled by gen_relational"),
            };
            self.emitter.emit_ro(opname, Ac, Ac1, Ac, format!("op {op}"));
        }
        Ok(())
    }

    /// Materializes a relational comparison as a 0/1 integer in `ac` (spec
    /// §8's Property 5: exactly 5 instructions per comparison).
    fn gen_relational(&mut self, op: BinOp) {
        let jop = match op {
            BinOp::Lt => "JLT",
            BinOp::Gt => "JGT",
            BinOp::Le => "JLE",
            BinOp::Ge => "JGE",
            BinOp::Eq => "JEQ",
            BinOp::Ne => "JNE",
            _ => unreachable!("non-relational operator passed to gen_relational"),
        };
        let true_label = self.new_label();
        let end_label = self.new_label();

        self.emitter.emit_ro("SUB", Ac, Ac1, Ac, format!("op {op}"));
        self.emitter.emit_goto(jop, Ac, true_label.clone(), Gp, "br if true");
        self.emitter.emit_rm("LDC", Ac, 0, Ac, "false case");
        self.emitter.emit_goto("LDA", Pc, end_label.clone(), Gp, "unconditional jmp");
        self.emitter.emit_label(true_label.clone(), "");
        self.emitter.emit_rm("LDC", Ac, 1, Ac, "true case");
        self.emitter.emit_label(end_label.clone(), "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DataType::*;
    use crate::layout::{analyze_offsets, analyze_sizes};
    use crate::symtab::SymbolTable;

    fn codegen(tree: &Tree, program: Option<NodeId>, config: &CodeGenConfig) -> Program {
        let table = SymbolTable::from_program(tree, program);
        generate(tree, program, &table, config).expect("generation should succeed")
    }

    /// Concrete scenario 1 — an empty `main` still gets the standard prelude
    /// and a trailing halt rather than a bare return.
    #[test]
    fn empty_main_has_prelude_and_halts() {
        let mut tree = Tree::new();
        let main = tree.func_dec("main", Void, None, None, None);
        analyze_sizes(&mut tree, Some(main), 1).unwrap();
        analyze_offsets(&mut tree, Some(main), 1).unwrap();

        let program = codegen(&tree, Some(main), &CodeGenConfig::default());
        let text = program.to_text();
        assert!(text.contains("LD mp, 0(0)"));
        assert!(text.contains("main:"));
        assert!(text.contains("HALT 0, 0, 0"));
        assert!(!text.contains("LD pc, -1(mp)\t; return"));
    }

    /// spec §4.6: a final `HALT` sentinel is appended after every top-level
    /// declaration has been generated, regardless of whether `main` is the
    /// textually last function — so a non-`main` function's own return
    /// sequence is never the last thing emitted.
    #[test]
    fn final_halt_is_appended_even_when_main_is_not_last() {
        let mut tree = Tree::new();
        let main = tree.func_dec("main", Void, None, None, None);
        let helper = tree.func_dec("helper", Void, None, None, None);
        let program_head = tree.chain_all([main, helper]).unwrap();
        analyze_sizes(&mut tree, Some(program_head), 1).unwrap();
        analyze_offsets(&mut tree, Some(program_head), 1).unwrap();

        let program = codegen(&tree, Some(program_head), &CodeGenConfig::default());
        let text = program.to_text();
        let last_line = text.lines().filter(|l| !l.is_empty()).last().unwrap();
        assert!(last_line.contains("HALT 0, 0, 0"), "expected final line to be HALT, got {last_line:?}");
    }

    /// Concrete scenario 2, as corrected by the "use gp uniformly for
    /// globals" design decision: a scalar global assignment addresses its
    /// target through `gp`, not `mp`.
    #[test]
    fn scalar_global_assignment_addresses_through_gp() {
        let mut tree = Tree::new();
        let x = tree.scalar_dec("x", Int);
        tree.node_mut(x).is_global = true;
        let val = tree.const_exp(7);
        let target = tree.id_exp(x, None);
        let assign = tree.assign_exp(target, val);
        let main = tree.func_dec("main", Void, None, None, Some(assign));
        let program_head = tree.chain_all([x, main]).unwrap();

        analyze_sizes(&mut tree, Some(program_head), 1).unwrap();
        analyze_offsets(&mut tree, Some(program_head), 1).unwrap();

        let program = codegen(&tree, Some(program_head), &CodeGenConfig::default());
        let text = program.to_text();
        assert!(text.contains("LDA ac, 0(gp)\t; address of x"));
        assert!(!text.contains("(mp)\t; address of x"));
    }

    /// Concrete scenario 3: indexing an array parameter loads the base
    /// pointer out of the parameter's own slot rather than taking its
    /// address.
    #[test]
    fn array_parameter_indexing_loads_base_pointer() {
        let mut tree = Tree::new();
        let param = tree.param_dec("a", Int, Some(0));
        let idx = tree.const_exp(2);
        let access = tree.id_exp(param, Some(idx));
        let ret = tree.return_stmt(param, Some(access));
        let func = tree.func_dec("get", Int, Some(param), None, Some(ret));
        analyze_sizes(&mut tree, Some(func), 1).unwrap();
        analyze_offsets(&mut tree, Some(func), 1).unwrap();

        let program = codegen(&tree, Some(func), &CodeGenConfig::default());
        let text = program.to_text();
        assert!(text.contains("LD ac, -3(mp)\t; load array base of a"));
        assert!(text.contains("ADD ac, ac1, ac\t; add index to base"));
    }

    /// Property 5 / concrete scenario 4: an if/else compiles to exactly two
    /// fresh labels, with the else label gating the false branch.
    #[test]
    fn if_else_uses_two_labels() {
        let mut tree = Tree::new();
        let cond = tree.const_exp(1);
        let then_branch = tree.const_exp(2);
        let else_branch = tree.const_exp(3);
        let if_node = tree.if_stmt(cond, Some(then_branch), Some(else_branch));
        let main = tree.func_dec("main", Void, None, None, Some(if_node));
        analyze_sizes(&mut tree, Some(main), 1).unwrap();
        analyze_offsets(&mut tree, Some(main), 1).unwrap();

        let program = codegen(&tree, Some(main), &CodeGenConfig::default());
        let text = program.to_text();
        assert!(text.contains("label0:"));
        assert!(text.contains("label1:"));
    }

    /// spec §4.5: `If` unconditionally allocates two fresh labels and
    /// unconditionally emits the "jump past else" instruction, even when
    /// there is no else branch — this is not an opportunity for a
    /// peephole-style collapse (spec §1's Non-goals exclude peephole
    /// optimization).
    #[test]
    fn if_without_else_still_allocates_two_labels_and_jumps_past_it() {
        let mut tree = Tree::new();
        let cond = tree.const_exp(1);
        let then_branch = tree.const_exp(2);
        let if_node = tree.if_stmt(cond, Some(then_branch), None);
        let main = tree.func_dec("main", Void, None, None, Some(if_node));
        analyze_sizes(&mut tree, Some(main), 1).unwrap();
        analyze_offsets(&mut tree, Some(main), 1).unwrap();

        let program = codegen(&tree, Some(main), &CodeGenConfig::default());
        let text = program.to_text();
        assert!(text.contains("label0:"));
        assert!(text.contains("label1:"));
        assert!(text.contains("; if: jump past else"));
    }

    /// Concrete scenario 5: a while loop jumps backward to its own head.
    #[test]
    fn while_loop_branches_back_to_its_head() {
        let mut tree = Tree::new();
        let cond = tree.const_exp(1);
        let body = tree.const_exp(2);
        let while_node = tree.while_stmt(cond, Some(body));
        let main = tree.func_dec("main", Void, None, None, Some(while_node));
        analyze_sizes(&mut tree, Some(main), 1).unwrap();
        analyze_offsets(&mut tree, Some(main), 1).unwrap();

        let program = codegen(&tree, Some(main), &CodeGenConfig::default());
        let text = program.to_text();
        assert!(text.contains("while: loop back"));
    }

    /// Property 3: tmp_offset returns to its entry value after a full
    /// statement, here a two-argument call.
    #[test]
    fn call_restores_tmp_offset_after_pushing_arguments() {
        let mut tree = Tree::new();
        let p1 = tree.param_dec("a", Int, None);
        let p2 = tree.param_dec("b", Int, None);
        let params = tree.chain(p1, p2);
        let callee = tree.func_dec("add", Int, Some(params), None, None);

        let arg1 = tree.const_exp(1);
        let arg2 = tree.const_exp(2);
        let args = tree.chain_all([arg1, arg2]).unwrap();
        let call = tree.call_stmt("add", Some(args));
        let main = tree.func_dec("main", Void, None, None, Some(call));

        let program_head = tree.chain_all([callee, main]).unwrap();
        analyze_sizes(&mut tree, Some(program_head), 1).unwrap();
        analyze_offsets(&mut tree, Some(program_head), 1).unwrap();

        let table = SymbolTable::from_program(&tree, Some(program_head));
        let config = CodeGenConfig::default();
        let mut ctx = CodeGenCtx {
            tree: &tree,
            emitter: Emitter::new(),
            tmp_offset: -3,
            next_label: 0,
            symbols: &table,
            config: &config,
            current_function: None,
        };
        let before = ctx.tmp_offset;
        ctx.gen_call(call).unwrap();
        assert_eq!(ctx.tmp_offset, before);
    }
}
