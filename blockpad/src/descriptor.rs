//! The descriptor transfer format: a plain, nested description of a block,
//! detached from any live registry or id generator.
//!
//! Descriptors serve two purposes: palette entries are descriptors (the
//! templates a user picks up to request a new block), and serialized
//! program trees are descriptors, carried as JSON. The format round-trips
//! every structural field needed to rebuild an equivalent block through the
//! editor's factory; ids are informational and re-minted on construction.

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockKind, Slot};
use crate::id::NodeId;
use crate::vars::Variables;

/// Descriptor variant tags, as they appear on the wire.
pub mod tag {
    pub const FUNCTION: &str = "function";
    pub const LITERAL: &str = "literal";
    pub const VARIABLE: &str = "variable";
    pub const ASSIGN: &str = "assign-variable";
    pub const FOR_RANGE: &str = "range-for-loop";
    pub const WHILE: &str = "while-loop";
    pub const IF: &str = "if";
    pub const BINARY_OP: &str = "binary-operator";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Variant tag; the factory dispatches on it.
    #[serde(rename = "type")]
    pub kind: String,

    /// Id of the serialized source block. Absent on palette templates;
    /// ignored by the factory either way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,

    #[serde(
        default,
        rename = "moduleName",
        skip_serializing_if = "Option::is_none"
    )]
    pub module: Option<String>,

    /// Function or variable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Binary operator symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Literal expression text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Assignment: name of the left-hand variable. Absent on the palette
    /// template, which mints a fresh variable instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,

    /// Assignment: raw right-hand literal text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,

    /// Assignment: bound right-hand expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<Box<BlockDescriptor>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotDescriptor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<BlockDescriptor>>,
}

impl BlockDescriptor {
    fn bare(kind: &str) -> BlockDescriptor {
        BlockDescriptor {
            kind: kind.to_string(),
            id: None,
            module: None,
            name: None,
            operator: None,
            value: None,
            variable: None,
            literal: None,
            expression: None,
            slots: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Template for a call to `module.name(...)` with one slot per
    /// parameter.
    pub fn function(
        module: Option<&str>,
        name: &str,
        parameters: &[&str],
    ) -> BlockDescriptor {
        let mut desc = BlockDescriptor::bare(tag::FUNCTION);
        desc.module = module.map(str::to_string);
        desc.name = Some(name.to_string());
        desc.slots = parameters
            .iter()
            .map(|p| SlotDescriptor {
                id: None,
                name: p.to_string(),
                value: None,
            })
            .collect();
        desc
    }

    pub fn literal(text: &str) -> BlockDescriptor {
        let mut desc = BlockDescriptor::bare(tag::LITERAL);
        desc.value = Some(text.to_string());
        desc
    }

    /// Template for a usage of the named variable.
    pub fn variable(module: Option<&str>, name: &str) -> BlockDescriptor {
        let mut desc = BlockDescriptor::bare(tag::VARIABLE);
        desc.module = module.map(str::to_string);
        desc.name = Some(name.to_string());
        desc
    }

    pub fn assignment() -> BlockDescriptor {
        BlockDescriptor::bare(tag::ASSIGN)
    }

    pub fn for_range() -> BlockDescriptor {
        BlockDescriptor::bare(tag::FOR_RANGE)
    }

    pub fn while_loop() -> BlockDescriptor {
        BlockDescriptor::bare(tag::WHILE)
    }

    pub fn conditional() -> BlockDescriptor {
        BlockDescriptor::bare(tag::IF)
    }

    pub fn binary_operator(operator: &str) -> BlockDescriptor {
        let mut desc = BlockDescriptor::bare(tag::BINARY_OP);
        desc.operator = Some(operator.to_string());
        desc
    }
}

/// Lower a block (and its owned subtree) to its descriptor. Variable keys
/// are resolved to names through the registry so the result is plain data.
pub fn describe(block: &Block, vars: &Variables) -> BlockDescriptor {
    let mut desc = match &block.kind {
        BlockKind::Call { name } => {
            let mut d = BlockDescriptor::bare(tag::FUNCTION);
            d.name = Some(name.clone());
            d
        }
        BlockKind::Literal { text } => {
            let mut d = BlockDescriptor::bare(tag::LITERAL);
            d.value = Some(text.clone());
            d
        }
        BlockKind::VarRef { var } => {
            let mut d = BlockDescriptor::bare(tag::VARIABLE);
            d.name = Some(vars.name(*var).to_string());
            d
        }
        BlockKind::Assign {
            variable,
            literal,
            expression,
        } => {
            let mut d = BlockDescriptor::bare(tag::ASSIGN);
            d.variable = Some(vars.name(*variable).to_string());
            d.literal = literal.clone();
            d.expression = expression
                .as_deref()
                .map(|expr| Box::new(describe(expr, vars)));
            d
        }
        BlockKind::ForRange { variable } => {
            let mut d = BlockDescriptor::bare(tag::FOR_RANGE);
            d.variable = Some(vars.name(*variable).to_string());
            d
        }
        BlockKind::While => BlockDescriptor::bare(tag::WHILE),
        BlockKind::If => BlockDescriptor::bare(tag::IF),
        BlockKind::BinaryOp { operator } => {
            let mut d = BlockDescriptor::bare(tag::BINARY_OP);
            d.operator = Some(operator.clone());
            d
        }
    };
    desc.id = Some(block.id);
    desc.module = block.module.clone();
    desc.slots = block.slots.iter().map(|s| describe_slot(s, vars)).collect();
    desc.children = block.children.iter().map(|c| describe(c, vars)).collect();
    desc
}

/// An unfilled slot serializes as a named placeholder; a filled one wraps
/// its bound value.
pub fn describe_slot(slot: &Slot, vars: &Variables) -> SlotDescriptor {
    SlotDescriptor {
        id: Some(slot.id),
        name: slot.name.clone(),
        value: slot
            .value
            .as_ref()
            .map(|block| Box::new(describe(block, vars))),
    }
}
