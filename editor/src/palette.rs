//! The palette: the grouped set of descriptors a user can pick up.
//!
//! The built-in "global" group carries the language constructs; every
//! catalog module contributes one further group. Palette entries are plain
//! descriptors; picking one starts a `NewBlock` gesture.

use blockpad::descriptor::{BlockDescriptor, tag};

use crate::catalog::{Catalog, ModuleDecl};

const OPERATORS: &[&str] = &["+", "-", "*", "/", "==", "!=", ">", "<"];

#[derive(Debug, Clone)]
pub struct PaletteGroup {
    pub name: String,
    pub blocks: Vec<BlockDescriptor>,
}

/// The global group: assignment, loops, the conditional, `print`, a
/// literal template, and the operator set.
pub fn global_group() -> PaletteGroup {
    let mut blocks = vec![
        BlockDescriptor::assignment(),
        BlockDescriptor::for_range(),
        BlockDescriptor::while_loop(),
        BlockDescriptor::conditional(),
        BlockDescriptor::function(None, "print", &["value"]),
        BlockDescriptor::literal("0"),
    ];
    for op in OPERATORS {
        blocks.push(BlockDescriptor::binary_operator(op));
    }
    PaletteGroup {
        name: "global".to_string(),
        blocks,
    }
}

/// One catalog module's group: its functions, then its variables, in
/// catalog order.
pub fn module_group(module: &ModuleDecl) -> PaletteGroup {
    let mut blocks = Vec::new();
    for function in &module.functions {
        let parameters: Vec<&str> = function.parameters.iter().map(String::as_str).collect();
        blocks.push(BlockDescriptor::function(
            Some(&module.name),
            &function.name,
            &parameters,
        ));
    }
    for variable in &module.variables {
        blocks.push(BlockDescriptor::variable(Some(&module.name), &variable.name));
    }
    PaletteGroup {
        name: module.name.clone(),
        blocks,
    }
}

/// Full palette: the global group first, then one group per catalog
/// module in catalog order.
pub fn build(catalog: &Catalog) -> Vec<PaletteGroup> {
    let mut groups = vec![global_group()];
    groups.extend(catalog.modules.iter().map(module_group));
    groups
}

/// Short display label for a palette entry.
pub fn label(desc: &BlockDescriptor) -> String {
    match desc.kind.as_str() {
        tag::FUNCTION => {
            let name = desc.name.as_deref().unwrap_or("?");
            let prefix = match &desc.module {
                Some(module) => format!("{}.", module),
                None => String::new(),
            };
            let params: Vec<&str> = desc.slots.iter().map(|s| s.name.as_str()).collect();
            format!("{}{}({})", prefix, name, params.join(", "))
        }
        tag::LITERAL => desc.value.clone().unwrap_or_default(),
        tag::VARIABLE => desc.name.clone().unwrap_or_default(),
        tag::ASSIGN => "variable = value".to_string(),
        tag::FOR_RANGE => "for var in range(start, end):".to_string(),
        tag::WHILE => "while condition:".to_string(),
        tag::IF => "if condition:".to_string(),
        tag::BINARY_OP => {
            let op = desc.operator.as_deref().unwrap_or("?");
            format!("left {} right", op)
        }
        other => format!("<{}>", other),
    }
}
