//! A code generator for the C-minus language, targeting the D-Code
//! three-address stack machine (spec §1, §6).
//!
//! The front end (lexing, parsing, scope resolution, type checking) is an
//! external collaborator: callers hand this crate an already-decorated
//! [`ast::Tree`] whose `Id` expressions already carry a resolved
//! `declaration` and whose declarations already carry a correct
//! `variable_data_type`/`function_return_type`. From there this crate runs
//! the two layout analyses, builds a symbol table, and emits D-Code.

pub mod ast;
pub mod codegen;
pub mod common;
pub mod config;
pub mod emit;
pub mod error;
pub mod layout;
pub mod symtab;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ast::{NodeId, Tree};
use config::CodeGenConfig;
use emit::Program;
use error::CodeGenError;
use symtab::SymbolTable;

/// Run the whole back end over `tree` and return the finished program.
///
/// `program` is the sibling-chain head of the translation unit's top-level
/// declarations. Equivalent to the original's `codeGen(syntaxTree, codefile,
/// codefile)` (spec §6), minus the file handling: callers that want the
/// D-Code written straight to a path should use [`code_gen_to_writer`].
pub fn code_gen(tree: &mut Tree, program: Option<NodeId>, config: &CodeGenConfig) -> Result<Program, CodeGenError> {
    layout::analyze_sizes(tree, program, config.word_size)?;
    layout::analyze_offsets(tree, program, config.word_size)?;
    let symbols = SymbolTable::from_program(tree, program);
    codegen::generate(tree, program, &symbols, config)
}

/// Run the back end and stream the result straight to `out`, matching the
/// original's "comment identifying the source file" header (spec §6).
pub fn code_gen_to_writer(
    tree: &mut Tree,
    program: Option<NodeId>,
    module_name: &str,
    config: &CodeGenConfig,
    mut out: impl Write,
) -> Result<(), CodeGenError> {
    let code = code_gen(tree, program, config)?;
    writeln!(out, "* D-Code compiled from {module_name}").map_err(CodeGenError::OutputOpen)?;
    code.write_to(&mut out).map_err(CodeGenError::OutputOpen)?;
    Ok(())
}

/// The original's `codeGen(ast, outputPath, moduleName)` entry point (spec
/// §6): opens `output_path` for writing, runs the whole back end, and
/// closes the file. Matches the original's "on inability to open the path,
/// sets a global error flag and reports to the listing stream; does not
/// throw" behavior with `Result` in place of the out-of-band flag — the
/// caller decides how to surface the error instead of it being swallowed
/// into a listing stream this crate has no access to (spec §1's listing
/// formatting is an external collaborator).
pub fn code_gen_to_path(
    tree: &mut Tree,
    program: Option<NodeId>,
    output_path: impl AsRef<Path>,
    module_name: &str,
    config: &CodeGenConfig,
) -> Result<(), CodeGenError> {
    let file = File::create(output_path).map_err(CodeGenError::OutputOpen)?;
    code_gen_to_writer(tree, program, module_name, config, file)
}
