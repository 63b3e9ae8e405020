pub mod slot;

pub use slot::Slot;

use crate::id::{IdGen, NodeId};
use crate::vars::VarKey;

/// One node in the program tree: a statement or an expression.
///
/// `slots` are the named holes an expression can be bound into; `children`
/// is the statement body and stays empty for everything except the
/// body-bearing variants (loops and the conditional).
#[derive(Debug, Clone)]
pub struct Block {
    pub id: NodeId,
    /// External module a call belongs to (`math` in `math.sqrt`).
    /// None for locally defined constructs.
    pub module: Option<String>,
    pub kind: BlockKind,
    pub slots: Vec<Slot>,
    pub children: Vec<Block>,
}

/// The closed set of block variants. Code generation and serialization
/// dispatch by exhaustive match, so a new variant is a compile-checked,
/// single-site addition.
#[derive(Debug, Clone)]
pub enum BlockKind {
    /// Function call with one slot per declared parameter.
    Call { name: String },
    /// Raw expression text, emitted verbatim.
    Literal { text: String },
    /// Usage of a shared variable. The key resolves through the registry,
    /// so renaming is visible at every usage site at once.
    VarRef { var: VarKey },
    /// `variable = literal-or-expression`. The two right-hand forms are
    /// mutually exclusive when bound through `set_expression`.
    Assign {
        variable: VarKey,
        literal: Option<String>,
        expression: Option<Box<Block>>,
    },
    /// `for variable in range(start, end):` with slots `start` and `end`.
    ForRange { variable: VarKey },
    /// `while condition:` with a single `condition` slot.
    While,
    /// `if condition:` with a single `condition` slot.
    If,
    /// Infix operator with `left` and `right` slots.
    BinaryOp { operator: String },
}

impl Block {
    fn new(ids: &mut IdGen, module: Option<String>, kind: BlockKind, slots: Vec<Slot>) -> Block {
        Block {
            id: ids.mint(),
            module,
            kind,
            slots,
            children: Vec::new(),
        }
    }

    pub fn call(
        ids: &mut IdGen,
        module: Option<String>,
        name: impl Into<String>,
        parameters: &[String],
    ) -> Block {
        let slots = parameters.iter().map(|p| Slot::new(ids, p.clone())).collect();
        Block::new(ids, module, BlockKind::Call { name: name.into() }, slots)
    }

    pub fn literal(ids: &mut IdGen, text: impl Into<String>) -> Block {
        Block::new(ids, None, BlockKind::Literal { text: text.into() }, Vec::new())
    }

    pub fn var_ref(ids: &mut IdGen, var: VarKey) -> Block {
        Block::new(ids, None, BlockKind::VarRef { var }, Vec::new())
    }

    pub fn assign(ids: &mut IdGen, variable: VarKey) -> Block {
        let kind = BlockKind::Assign {
            variable,
            literal: None,
            expression: None,
        };
        Block::new(ids, None, kind, Vec::new())
    }

    pub fn for_range(ids: &mut IdGen, variable: VarKey) -> Block {
        let slots = vec![Slot::new(ids, "start"), Slot::new(ids, "end")];
        Block::new(ids, None, BlockKind::ForRange { variable }, slots)
    }

    pub fn while_loop(ids: &mut IdGen) -> Block {
        let slots = vec![Slot::new(ids, "condition")];
        Block::new(ids, None, BlockKind::While, slots)
    }

    pub fn conditional(ids: &mut IdGen) -> Block {
        let slots = vec![Slot::new(ids, "condition")];
        Block::new(ids, None, BlockKind::If, slots)
    }

    pub fn binary_op(ids: &mut IdGen, module: Option<String>, operator: impl Into<String>) -> Block {
        let slots = vec![Slot::new(ids, "left"), Slot::new(ids, "right")];
        let kind = BlockKind::BinaryOp {
            operator: operator.into(),
        };
        Block::new(ids, module, kind, slots)
    }

    /// True for the variants whose `children` form a statement body.
    pub fn has_body(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::ForRange { .. } | BlockKind::While | BlockKind::If
        )
    }

    /// Replace an assignment's right-hand side with an expression block.
    /// Clears any raw literal text; the two forms are mutually exclusive
    /// on this path. No effect on other variants.
    pub fn set_expression(&mut self, expr: Block) {
        if let BlockKind::Assign {
            literal,
            expression,
            ..
        } = &mut self.kind
        {
            *literal = None;
            *expression = Some(Box::new(expr));
        }
    }

    /// Overwrite an assignment's raw literal text. This is the field-edit
    /// path: a bound expression is left in place (and still wins at code
    /// generation time). No effect on other variants.
    pub fn set_literal(&mut self, text: impl Into<String>) {
        if let BlockKind::Assign { literal, .. } = &mut self.kind {
            *literal = Some(text.into());
        }
    }

    /// Expression sub-blocks and body statements owned by this block, in
    /// search order: filled slot values in slot order, then an
    /// assignment's bound expression, then the body children. Both tree
    /// searches walk edges in exactly this order.
    pub fn child_blocks(&self) -> impl Iterator<Item = &Block> {
        let expr = match &self.kind {
            BlockKind::Assign { expression, .. } => expression.as_deref(),
            _ => None,
        };
        self.slots
            .iter()
            .filter_map(|slot| slot.value.as_ref())
            .chain(expr)
            .chain(self.children.iter())
    }

    pub fn child_blocks_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        let expr = match &mut self.kind {
            BlockKind::Assign { expression, .. } => expression.as_deref_mut(),
            _ => None,
        };
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.value.as_mut())
            .chain(expr)
            .chain(self.children.iter_mut())
    }
}
