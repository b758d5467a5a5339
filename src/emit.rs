//! The instruction-emission facade (spec §4.1): the only place that writes
//! D-Code lines, tracks the instruction address counter, and resolves
//! symbolic jump targets.
//!
//! Per spec §9's design note, a deferred jump is modeled as a structured
//! `Slot::Pending(label)` rather than patched by textual substitution; a
//! terminal `finish()` pass walks every pending slot and replaces it with
//! the resolved address, or reports `CodeGenError::UnresolvedLabel`. This
//! also means the facade never needs to know whether it's writing to a
//! file or an in-memory buffer — `Program` renders to a `String`/`Write`r
//! only after every label is resolved.

use std::fmt;
use std::io::{self, Write};

use derive_more::Display;

use crate::common::Map;
use crate::error::CodeGenError;

/// The registers named in spec §6.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Reg {
    #[display("ac")]
    Ac,
    #[display("ac1")]
    Ac1,
    #[display("gp")]
    Gp,
    #[display("mp")]
    Mp,
    #[display("pc")]
    Pc,
    /// Literal register 0, used only by the two prologue instructions that
    /// bootstrap `mp` from memory address 0 before any register is
    /// meaningfully initialized (spec §4.6, concrete scenario 1).
    #[display("0")]
    Zero,
}

/// Either a resolved integer (an offset, a literal, or an already-resolved
/// address) or a label awaiting resolution.
#[derive(Clone, Debug)]
enum Slot {
    Value(i32),
    Pending(String),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(v) => write!(f, "{v}"),
            Slot::Pending(label) => write!(f, "{label}"),
        }
    }
}

#[derive(Clone, Debug)]
enum Line {
    /// Register-only form: `r <- r op r_s r_t`.
    Ro {
        addr: i32,
        op: &'static str,
        r: Reg,
        s: Reg,
        t: Reg,
        comment: String,
    },
    /// Register-memory form (also covers constant loads, and — once
    /// resolved — `emitGoto`'s deferred branches): `r <-> mem[base + slot]`.
    Rm {
        addr: i32,
        op: &'static str,
        r: Reg,
        slot: Slot,
        base: Reg,
        comment: String,
    },
    /// A label definition. Addressless in the output — it annotates the
    /// address of whatever is emitted next.
    Label { name: String, comment: String },
    /// A free-standing comment line.
    Comment(String),
}

/// The emission facade: owns the emit-location counter, the label table,
/// and the list of not-yet-resolved deferred jumps.
pub struct Emitter {
    lines: Vec<Line>,
    loc: i32,
    labels: Map<String, i32>,
    pending: Vec<usize>,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            lines: Vec::new(),
            loc: 0,
            labels: Map::new(),
            pending: Vec::new(),
        }
    }

    /// The address that will be assigned to the next emitted instruction.
    pub fn here(&self) -> i32 {
        self.loc
    }

    /// `emitRO(op, r, s, t, comment)` — register-only form. Returns the
    /// address assigned to the emitted line.
    pub fn emit_ro(&mut self, op: &'static str, r: Reg, s: Reg, t: Reg, comment: impl Into<String>) -> i32 {
        let addr = self.loc;
        self.lines.push(Line::Ro { addr, op, r, s, t, comment: comment.into() });
        self.loc += 1;
        addr
    }

    /// `emitRM(op, r, offset, base, comment)` — register-memory form (also
    /// used for constant loads, where `offset` carries the literal value).
    pub fn emit_rm(&mut self, op: &'static str, r: Reg, offset: i32, base: Reg, comment: impl Into<String>) -> i32 {
        let addr = self.loc;
        self.lines.push(Line::Rm {
            addr,
            op,
            r,
            slot: Slot::Value(offset),
            base,
            comment: comment.into(),
        });
        self.loc += 1;
        addr
    }

    /// `emitGoto(op, r, label, base, comment)` — register-memory form whose
    /// target is a symbolic label, resolved once the whole program has been
    /// walked. Both forward and backward references are legal.
    pub fn emit_goto(&mut self, op: &'static str, r: Reg, label: impl Into<String>, base: Reg, comment: impl Into<String>) -> i32 {
        let addr = self.loc;
        let idx = self.lines.len();
        self.lines.push(Line::Rm {
            addr,
            op,
            r,
            slot: Slot::Pending(label.into()),
            base,
            comment: comment.into(),
        });
        self.pending.push(idx);
        self.loc += 1;
        addr
    }

    /// `emitLabel(name, comment)` — records `name -> here()` in the label
    /// table. Does not consume an instruction address.
    pub fn emit_label(&mut self, name: impl Into<String>, comment: impl Into<String>) {
        let name = name.into();
        self.labels.insert(name.clone(), self.loc);
        self.lines.push(Line::Label { name, comment: comment.into() });
    }

    /// `emitComment(text)` — a free comment line.
    pub fn emit_comment(&mut self, text: impl Into<String>) {
        self.lines.push(Line::Comment(text.into()));
    }

    /// Back-fill every deferred jump target and produce the final program.
    /// Fails with `UnresolvedLabel` if any label used by `emit_goto` was
    /// never defined by `emit_label`.
    pub fn finish(mut self) -> Result<Program, CodeGenError> {
        for idx in std::mem::take(&mut self.pending) {
            let name = match &self.lines[idx] {
                Line::Rm { slot: Slot::Pending(name), .. } => name.clone(),
                _ => unreachable!("pending index did not point at a pending slot"),
            };
            let resolved = self
                .labels
                .get(&name)
                .copied()
                .ok_or_else(|| CodeGenError::UnresolvedLabel(name.clone()))?;
            if let Line::Rm { slot, .. } = &mut self.lines[idx] {
                *slot = Slot::Value(resolved);
            }
        }
        Ok(Program { lines: self.lines })
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully emitted, fully resolved D-Code program (spec §6's output
/// format).
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    /// Render every line in the format spec §6 specifies.
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        for line in &self.lines {
            match line {
                Line::Ro { addr, op, r, s, t, comment } => {
                    writeln!(out, "{addr}: {op} {r}, {s}, {t}\t; {comment}")?
                }
                Line::Rm { addr, op, r, slot, base, comment } => {
                    writeln!(out, "{addr}: {op} {r}, {slot}({base})\t; {comment}")?
                }
                Line::Label { name, comment } => writeln!(out, "{name}:\t; {comment}")?,
                Line::Comment(text) => writeln!(out, "* {text}")?,
            }
        }
        Ok(())
    }

    /// Render the program to a `String`, for tests and callers that want
    /// the whole text in memory rather than streamed to a writer.
    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        self.write_to(&mut buf).expect("writing to a Vec<u8> cannot fail");
        String::from_utf8(buf).expect("D-Code output is ASCII")
    }

    /// The number of real (addressed) instructions emitted, i.e. the final
    /// value of the emit-location counter. Labels and comments don't count.
    pub fn instruction_count(&self) -> i32 {
        self.lines
            .iter()
            .filter(|l| matches!(l, Line::Ro { .. } | Line::Rm { .. }))
            .count() as i32
    }
}
