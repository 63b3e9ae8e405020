use crate::block::Block;
use crate::id::{IdGen, NodeId};

/// A named, optionally filled hole inside a block.
///
/// While empty, the slot presents (and generates) its placeholder name;
/// once filled it is a transparent wrapper around the bound expression.
/// A bound value is exclusively owned by its slot; expression subtrees
/// are never shared. Variable usages stay shared anyway, because a bound
/// `VarRef` block carries a registry key, not a copy of the variable.
#[derive(Debug, Clone)]
pub struct Slot {
    pub id: NodeId,
    /// Placeholder label shown and emitted while the slot is empty.
    pub name: String,
    pub value: Option<Block>,
}

impl Slot {
    pub fn new(ids: &mut IdGen, name: impl Into<String>) -> Slot {
        Slot {
            id: ids.mint(),
            name: name.into(),
            value: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}
