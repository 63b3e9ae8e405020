use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier shared by blocks and slots.
/// Ids are assigned at creation, immutable, and never reused within a
/// program forest; tree lookup relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints NodeIds for one editing session. Monotonic, so every id handed
/// out is distinct.
#[derive(Debug, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn new() -> Self {
        IdGen::default()
    }

    pub fn mint(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}
