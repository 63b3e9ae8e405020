//! Construction of live blocks from descriptors.
//!
//! Dispatch is keyed on the descriptor's variant tag. Fresh ids are always
//! minted (descriptor ids are never trusted into the forest), and a
//! template assignment or range-for loop registers a brand-new variable.
//! Serialized trees revive recursively: slot values, a bound assignment
//! expression, and body children all come back, and variable names resolve
//! against the registry (registering on first sight) so shared identity
//! survives the round trip.

use blockpad::descriptor::{BlockDescriptor, SlotDescriptor, tag};
use blockpad::{Block, IdGen, Slot, VarKey, Variables};

use crate::error::EditError;

/// Instantiate a block (and its owned subtree) from a descriptor.
///
/// An unrecognized tag is a fatal construction error; the caller must
/// abort the mutation that requested it. A failed construction never
/// touches a forest, though variables registered before the failure stay
/// registered; the registry never reclaims entries.
pub fn create_block(
    desc: &BlockDescriptor,
    ids: &mut IdGen,
    vars: &mut Variables,
) -> Result<Block, EditError> {
    match desc.kind.as_str() {
        tag::FUNCTION => {
            let name = desc.name.clone().unwrap_or_default();
            let mut block = Block::call(ids, desc.module.clone(), name, &[]);
            block.slots = revive_slots(&desc.slots, ids, vars)?;
            Ok(block)
        }
        tag::LITERAL => Ok(Block::literal(ids, desc.value.clone().unwrap_or_default())),
        tag::VARIABLE => {
            let name = desc.name.clone().unwrap_or_default();
            let key = resolve_variable(&name, vars);
            Ok(Block::var_ref(ids, key))
        }
        tag::ASSIGN => {
            let key = match &desc.variable {
                Some(name) => resolve_variable(name, vars),
                None => vars.register_fresh(),
            };
            let mut block = Block::assign(ids, key);
            if let Some(text) = &desc.literal {
                block.set_literal(text.clone());
            }
            if let Some(expr) = &desc.expression {
                let expr = create_block(expr, ids, vars)?;
                block.set_expression(expr);
            }
            Ok(block)
        }
        tag::FOR_RANGE => {
            let key = match &desc.variable {
                Some(name) => resolve_variable(name, vars),
                None => vars.register_fresh(),
            };
            let mut block = Block::for_range(ids, key);
            fill_slots(&mut block.slots, &desc.slots, ids, vars)?;
            block.children = revive_children(&desc.children, ids, vars)?;
            Ok(block)
        }
        tag::WHILE => {
            let mut block = Block::while_loop(ids);
            fill_slots(&mut block.slots, &desc.slots, ids, vars)?;
            block.children = revive_children(&desc.children, ids, vars)?;
            Ok(block)
        }
        tag::IF => {
            let mut block = Block::conditional(ids);
            fill_slots(&mut block.slots, &desc.slots, ids, vars)?;
            block.children = revive_children(&desc.children, ids, vars)?;
            Ok(block)
        }
        tag::BINARY_OP => {
            let operator = desc.operator.clone().unwrap_or_default();
            let mut block = Block::binary_op(ids, desc.module.clone(), operator);
            fill_slots(&mut block.slots, &desc.slots, ids, vars)?;
            Ok(block)
        }
        other => Err(EditError::UnknownKind(other.to_string())),
    }
}

/// True for tags that build statements; everything else produces an
/// expression and may be bound into a slot.
pub fn is_statement_kind(kind: &str) -> bool {
    matches!(kind, tag::ASSIGN | tag::FOR_RANGE | tag::WHILE | tag::IF)
}

fn resolve_variable(name: &str, vars: &mut Variables) -> VarKey {
    match vars.lookup(name) {
        Some(key) => key,
        None => vars.register(name),
    }
}

/// Bind revived values into a fixed-arity block's canonical slots,
/// positionally. Surplus descriptor slots are ignored; the slot count and
/// placeholder names always stay the constructor's.
fn fill_slots(
    slots: &mut [Slot],
    descs: &[SlotDescriptor],
    ids: &mut IdGen,
    vars: &mut Variables,
) -> Result<(), EditError> {
    for (slot, desc) in slots.iter_mut().zip(descs) {
        if let Some(value) = &desc.value {
            slot.value = Some(create_block(value, ids, vars)?);
        }
    }
    Ok(())
}

fn revive_slots(
    descs: &[SlotDescriptor],
    ids: &mut IdGen,
    vars: &mut Variables,
) -> Result<Vec<Slot>, EditError> {
    let mut slots = Vec::with_capacity(descs.len());
    for desc in descs {
        let mut slot = Slot::new(ids, desc.name.clone());
        if let Some(value) = &desc.value {
            slot.value = Some(create_block(value, ids, vars)?);
        }
        slots.push(slot);
    }
    Ok(slots)
}

fn revive_children(
    descs: &[BlockDescriptor],
    ids: &mut IdGen,
    vars: &mut Variables,
) -> Result<Vec<Block>, EditError> {
    descs
        .iter()
        .map(|desc| create_block(desc, ids, vars))
        .collect()
}
