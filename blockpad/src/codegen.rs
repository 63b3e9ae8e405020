//! Lowering of the program forest to target source text.
//!
//! `generate` is deterministic and total: imports are collected into a
//! sorted set and every variant has a textual form, filled or not, so the
//! same forest always yields byte-identical output.

use std::collections::BTreeSet;

use crate::Program;
use crate::block::{Block, BlockKind, Slot};
use crate::vars::Variables;

/// What an assignment's right-hand side reads before the user supplies a
/// literal or drops an expression.
const UNSET_RHS: &str = "undefined";

/// Produce the full source text for the program.
///
/// Import lines come from the `module` values of the top-level blocks
/// only (a call nested inside a body contributes none), sorted
/// lexicographically and followed by one blank line when any exist. Then
/// each top-level block's code, in forest order, one per line group.
pub fn generate(program: &Program, vars: &Variables) -> String {
    let mut out = String::new();

    let modules: BTreeSet<&str> = program
        .blocks
        .iter()
        .filter_map(|block| block.module.as_deref())
        .collect();
    for module in &modules {
        out.push_str("import ");
        out.push_str(module);
        out.push('\n');
    }
    if !modules.is_empty() {
        out.push('\n');
    }

    for block in &program.blocks {
        out.push_str(&write_block(block, vars));
        out.push('\n');
    }

    out
}

/// Code for one block. Pure over the block's own fields, its owned slots
/// and children, and the variable registry it resolves names through.
pub fn write_block(block: &Block, vars: &Variables) -> String {
    match &block.kind {
        BlockKind::Call { name } => {
            let prefix = match &block.module {
                Some(module) => format!("{}.", module),
                None => String::new(),
            };
            let args: Vec<String> = block
                .slots
                .iter()
                .map(|slot| write_slot(slot, vars))
                .collect();
            format!("{}{}({})", prefix, name, args.join(", "))
        }
        BlockKind::Literal { text } => text.clone(),
        BlockKind::VarRef { var } => vars.name(*var).to_string(),
        BlockKind::Assign {
            variable,
            literal,
            expression,
        } => {
            let rhs = match (expression, literal) {
                (Some(expr), _) => write_block(expr, vars),
                (None, Some(text)) => text.clone(),
                (None, None) => UNSET_RHS.to_string(),
            };
            format!("{} = {}", vars.name(*variable), rhs)
        }
        BlockKind::ForRange { variable } => format!(
            "for {} in range({}, {}):\n  {}",
            vars.name(*variable),
            write_slot(&block.slots[0], vars),
            write_slot(&block.slots[1], vars),
            write_body(&block.children, vars),
        ),
        BlockKind::While => format!(
            "while {}:\n  {}",
            write_slot(&block.slots[0], vars),
            write_body(&block.children, vars),
        ),
        BlockKind::If => format!(
            "if {}:\n  {}",
            write_slot(&block.slots[0], vars),
            write_body(&block.children, vars),
        ),
        BlockKind::BinaryOp { operator } => format!(
            "{} {} {}",
            write_slot(&block.slots[0], vars),
            operator,
            write_slot(&block.slots[1], vars),
        ),
    }
}

/// A filled slot is transparent; an empty one emits its placeholder name,
/// leaving a syntactically present token in the output.
pub fn write_slot(slot: &Slot, vars: &Variables) -> String {
    match &slot.value {
        Some(block) => write_block(block, vars),
        None => slot.name.clone(),
    }
}

// Bodies indent exactly one level regardless of nesting depth.
fn write_body(children: &[Block], vars: &Variables) -> String {
    let lines: Vec<String> = children
        .iter()
        .map(|child| write_block(child, vars))
        .collect();
    lines.join("\n  ")
}
