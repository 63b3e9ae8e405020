use std::fmt;

use blockpad::NodeId;

/// Failure of one attempted edit. Apart from `UnknownKind`, every case is
/// a rejection: the gesture is dropped, the forest is untouched, and the
/// caller may surface the condition however it likes.
#[derive(Debug)]
pub enum EditError {
    /// A descriptor carried a variant tag the factory does not know -
    /// a corrupted or incompatible descriptor. The one fatal case.
    UnknownKind(String),
    /// No block with this id exists in the forest.
    BlockNotFound(NodeId),
    /// No slot with this id exists in the forest.
    SlotNotFound(NodeId),
    /// The payload/target combination is not a legal edit.
    InvalidDrop {
        payload: &'static str,
        target: &'static str,
    },
    /// A drop arrived with no picked payload pending.
    NothingPicked,
}

impl EditError {
    /// True for errors that signal corruption rather than a rejected
    /// gesture.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EditError::UnknownKind(_))
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::UnknownKind(kind) => write!(f, "unknown block kind: {}", kind),
            EditError::BlockNotFound(id) => write!(f, "no block {}", id),
            EditError::SlotNotFound(id) => write!(f, "no slot {}", id),
            EditError::InvalidDrop { payload, target } => {
                write!(f, "cannot drop {} on {}", payload, target)
            }
            EditError::NothingPicked => write!(f, "drop without a picked payload"),
        }
    }
}

impl std::error::Error for EditError {}
