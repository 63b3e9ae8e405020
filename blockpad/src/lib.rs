pub mod block;
pub mod codegen;
pub mod descriptor;
pub mod id;
pub mod search;
pub mod vars;

pub use block::{Block, BlockKind, Slot};
pub use id::{IdGen, NodeId};
pub use vars::{VarKey, Variables};

/// An editable block program: the ordered sequence of top-level
/// statement blocks (the forest roots).
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub blocks: Vec<Block>,
}
