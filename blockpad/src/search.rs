//! Identifier-based search over a program forest.
//!
//! Every search is a preorder walk with one edge enumeration, shared by
//! block lookup and slot lookup: a block's filled slot values in slot
//! order, then an assignment's bound expression, then the body children.
//! The first match wins. Correctness rests on the forest-wide uniqueness
//! of identifiers; with duplicated ids the result is unspecified.

use crate::block::{Block, Slot};
use crate::id::NodeId;

/// Find the block carrying `id` anywhere in the forest.
pub fn find_block(id: NodeId, blocks: &[Block]) -> Option<&Block> {
    blocks.iter().find_map(|block| block_in(id, block))
}

pub fn find_block_mut(id: NodeId, blocks: &mut [Block]) -> Option<&mut Block> {
    blocks.iter_mut().find_map(|block| block_in_mut(id, block))
}

/// Find the slot carrying `id` anywhere in the forest. A block's own
/// slots are checked before its subtrees are searched.
pub fn find_slot(id: NodeId, blocks: &[Block]) -> Option<&Slot> {
    blocks.iter().find_map(|block| slot_in(id, block))
}

pub fn find_slot_mut(id: NodeId, blocks: &mut [Block]) -> Option<&mut Slot> {
    blocks.iter_mut().find_map(|block| slot_in_mut(id, block))
}

fn block_in(id: NodeId, block: &Block) -> Option<&Block> {
    if block.id == id {
        return Some(block);
    }
    block.child_blocks().find_map(|child| block_in(id, child))
}

fn block_in_mut(id: NodeId, block: &mut Block) -> Option<&mut Block> {
    if block.id == id {
        return Some(block);
    }
    block
        .child_blocks_mut()
        .find_map(|child| block_in_mut(id, child))
}

fn slot_in(id: NodeId, block: &Block) -> Option<&Slot> {
    block
        .slots
        .iter()
        .find(|slot| slot.id == id)
        .or_else(|| block.child_blocks().find_map(|child| slot_in(id, child)))
}

fn slot_in_mut(id: NodeId, block: &mut Block) -> Option<&mut Slot> {
    // membership first: a conditionally returned borrow would pin `block`
    // for the rest of the call
    if block.slots.iter().any(|slot| slot.id == id) {
        return block.slots.iter_mut().find(|slot| slot.id == id);
    }
    block
        .child_blocks_mut()
        .find_map(|child| slot_in_mut(id, child))
}
