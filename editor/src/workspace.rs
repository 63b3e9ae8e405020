//! The gesture state machine: Idle → Picked → (Dropped | Aborted) → Idle.
//!
//! A pick captures what the user intends to place (a descriptor for a
//! brand-new block, or a reference to an existing shared variable), and a
//! drop turns that intent into a tree edit, or rejects it. At most one
//! payload is pending at a time; picking again overwrites it. All mutation
//! of the program, the variable registry, and the id supply happens here,
//! inside one event handler at a time.

use blockpad::descriptor::{self, BlockDescriptor};
use blockpad::search::{find_block_mut, find_slot_mut};
use blockpad::{Block, BlockKind, IdGen, NodeId, Program, VarKey, Variables, codegen};

use crate::error::EditError;
use crate::factory::{create_block, is_statement_kind};

/// What a gesture is carrying between pick and drop.
#[derive(Debug, Clone)]
pub enum DragPayload {
    /// Request to instantiate a new block from this template.
    NewBlock(BlockDescriptor),
    /// Reference to an existing registry entity.
    UseVariable(VarKey),
}

impl DragPayload {
    fn label(&self) -> &'static str {
        match self {
            DragPayload::NewBlock(_) => "a new block",
            DragPayload::UseVariable(_) => "a variable reference",
        }
    }
}

/// Where a payload was dropped.
#[derive(Debug, Clone, Copy)]
pub enum DropTarget {
    /// The program root: append to the top-level sequence.
    Root,
    /// The body of the identified block-bearing block.
    Body(NodeId),
    /// The identified slot.
    Slot(NodeId),
    /// The left-hand (variable) side of the identified assignment.
    AssignmentLhs(NodeId),
    /// The right-hand (value) side of the identified assignment.
    AssignmentRhs(NodeId),
}

impl DropTarget {
    fn label(&self) -> &'static str {
        match self {
            DropTarget::Root => "the program root",
            DropTarget::Body(_) => "a block body",
            DropTarget::Slot(_) => "a slot",
            DropTarget::AssignmentLhs(_) => "an assignment variable",
            DropTarget::AssignmentRhs(_) => "an assignment value",
        }
    }
}

/// One editing session: the program forest, the variable registry, the id
/// supply, and the pending gesture payload, mutated together and only
/// through the methods below.
#[derive(Debug, Default)]
pub struct Workspace {
    program: Program,
    vars: Variables,
    ids: IdGen,
    pending: Option<DragPayload>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// True while a payload is pending between pick and drop.
    pub fn is_picking(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin a gesture. A pick while another payload is pending replaces
    /// it; nothing queues.
    pub fn pick(&mut self, payload: DragPayload) {
        self.pending = Some(payload);
    }

    /// Abort the gesture (dropped outside any valid target). No edit.
    pub fn abort(&mut self) {
        self.pending = None;
    }

    /// End the gesture on `target`. On success the corresponding edit has
    /// been applied; on any error the forest is exactly as it was. Either
    /// way the machine returns to Idle.
    pub fn drop_on(&mut self, target: DropTarget) -> Result<(), EditError> {
        let payload = self.pending.take().ok_or(EditError::NothingPicked)?;
        match (target, payload) {
            (DropTarget::Root, DragPayload::NewBlock(desc)) => {
                let block = create_block(&desc, &mut self.ids, &mut self.vars)?;
                self.program.blocks.push(block);
                Ok(())
            }
            (DropTarget::Body(id), DragPayload::NewBlock(desc)) => {
                let parent = find_block_mut(id, &mut self.program.blocks)
                    .ok_or(EditError::BlockNotFound(id))?;
                if !parent.has_body() {
                    return Err(EditError::InvalidDrop {
                        payload: "a new block",
                        target: "a block without a body",
                    });
                }
                let block = create_block(&desc, &mut self.ids, &mut self.vars)?;
                parent.children.push(block);
                Ok(())
            }
            (DropTarget::Slot(id), DragPayload::UseVariable(key)) => {
                let slot = find_slot_mut(id, &mut self.program.blocks)
                    .ok_or(EditError::SlotNotFound(id))?;
                slot.value = Some(Block::var_ref(&mut self.ids, key));
                Ok(())
            }
            (DropTarget::Slot(id), DragPayload::NewBlock(desc)) => {
                if is_statement_kind(&desc.kind) {
                    return Err(EditError::InvalidDrop {
                        payload: "a statement block",
                        target: "a slot",
                    });
                }
                let slot = find_slot_mut(id, &mut self.program.blocks)
                    .ok_or(EditError::SlotNotFound(id))?;
                let block = create_block(&desc, &mut self.ids, &mut self.vars)?;
                slot.value = Some(block);
                Ok(())
            }
            (DropTarget::AssignmentLhs(id), DragPayload::UseVariable(key)) => {
                let block = find_block_mut(id, &mut self.program.blocks)
                    .ok_or(EditError::BlockNotFound(id))?;
                match &mut block.kind {
                    // Re-points the assignment at the entity; no rename.
                    BlockKind::Assign { variable, .. } => {
                        *variable = key;
                        Ok(())
                    }
                    _ => Err(EditError::InvalidDrop {
                        payload: "a variable reference",
                        target: "a block that is not an assignment",
                    }),
                }
            }
            (DropTarget::AssignmentRhs(id), payload) => {
                let block = find_block_mut(id, &mut self.program.blocks)
                    .ok_or(EditError::BlockNotFound(id))?;
                if !matches!(block.kind, BlockKind::Assign { .. }) {
                    return Err(EditError::InvalidDrop {
                        payload: payload.label(),
                        target: "a block that is not an assignment",
                    });
                }
                let expr = match payload {
                    DragPayload::UseVariable(key) => Block::var_ref(&mut self.ids, key),
                    DragPayload::NewBlock(desc) => {
                        create_block(&desc, &mut self.ids, &mut self.vars)?
                    }
                };
                block.set_expression(expr);
                Ok(())
            }
            (target, payload) => Err(EditError::InvalidDrop {
                payload: payload.label(),
                target: target.label(),
            }),
        }
    }

    /// Rename a shared variable. Every usage site and all later generated
    /// output observe the new name.
    pub fn rename_variable(&mut self, key: VarKey, name: impl Into<String>) {
        self.vars.rename(key, name);
    }

    /// Raw field edit of an assignment's literal text. Does not clear a
    /// bound expression (only the expression-setting path is exclusive),
    /// so a bound expression still wins in the output.
    pub fn set_assignment_literal(
        &mut self,
        id: NodeId,
        text: impl Into<String>,
    ) -> Result<(), EditError> {
        let block =
            find_block_mut(id, &mut self.program.blocks).ok_or(EditError::BlockNotFound(id))?;
        if !matches!(block.kind, BlockKind::Assign { .. }) {
            return Err(EditError::InvalidDrop {
                payload: "literal text",
                target: "a block that is not an assignment",
            });
        }
        block.set_literal(text);
        Ok(())
    }

    /// Source text for the current forest.
    pub fn generate(&self) -> String {
        codegen::generate(&self.program, &self.vars)
    }

    /// Serialize the top-level blocks, e.g. to carry the program out of
    /// the session.
    pub fn describe(&self) -> Vec<BlockDescriptor> {
        self.program
            .blocks
            .iter()
            .map(|block| descriptor::describe(block, &self.vars))
            .collect()
    }
}
