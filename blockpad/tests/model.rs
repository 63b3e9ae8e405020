use blockpad::search::{find_block, find_slot};
use blockpad::{Block, BlockKind, IdGen, Program, Variables, codegen, descriptor};

/// `math.sqrt(4)` as a single top-level statement.
fn sqrt_program(ids: &mut IdGen) -> Program {
    let mut call = Block::call(
        ids,
        Some("math".to_string()),
        "sqrt",
        &["value".to_string()],
    );
    call.slots[0].value = Some(Block::literal(ids, "4"));
    Program { blocks: vec![call] }
}

#[test]
fn generate_call_with_import() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let program = sqrt_program(&mut ids);
    assert_eq!(
        codegen::generate(&program, &vars),
        "import math\n\nmath.sqrt(4)\n"
    );
}

#[test]
fn generate_assignment_with_literal() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();
    let mut assign = Block::assign(&mut ids, key);
    assign.set_literal("5");
    let program = Program {
        blocks: vec![assign],
    };
    assert_eq!(codegen::generate(&program, &vars), "var0 = 5\n");
}

#[test]
fn generate_range_for_loop() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();

    let mut print = Block::call(&mut ids, None, "print", &["value".to_string()]);
    print.slots[0].value = Some(Block::var_ref(&mut ids, key));

    let mut for_loop = Block::for_range(&mut ids, key);
    for_loop.slots[0].value = Some(Block::literal(&mut ids, "0"));
    for_loop.slots[1].value = Some(Block::literal(&mut ids, "10"));
    for_loop.children.push(print);

    let program = Program {
        blocks: vec![for_loop],
    };
    assert_eq!(
        codegen::generate(&program, &vars),
        "for var0 in range(0, 10):\n  print(var0)\n"
    );
}

#[test]
fn generate_is_idempotent() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let program = sqrt_program(&mut ids);
    assert_eq!(
        codegen::generate(&program, &vars),
        codegen::generate(&program, &vars)
    );
}

#[test]
fn imports_are_sorted_and_deduplicated() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let program = Program {
        blocks: vec![
            Block::call(&mut ids, Some("os".to_string()), "getcwd", &[]),
            Block::call(&mut ids, Some("math".to_string()), "floor", &[]),
            Block::call(&mut ids, Some("math".to_string()), "ceil", &[]),
        ],
    };
    let code = codegen::generate(&program, &vars);
    assert!(code.starts_with("import math\nimport os\n\n"));
}

#[test]
fn nested_call_contributes_no_import() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let mut while_loop = Block::while_loop(&mut ids);
    while_loop
        .children
        .push(Block::call(&mut ids, Some("math".to_string()), "floor", &[]));
    let program = Program {
        blocks: vec![while_loop],
    };
    let code = codegen::generate(&program, &vars);
    assert!(!code.contains("import"));
}

#[test]
fn empty_slot_emits_placeholder_name() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let call = Block::call(&mut ids, None, "print", &["value".to_string()]);
    assert_eq!(codegen::write_block(&call, &vars), "print(value)");
}

#[test]
fn unset_assignment_rhs_reads_undefined() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();
    let assign = Block::assign(&mut ids, key);
    assert_eq!(codegen::write_block(&assign, &vars), "var0 = undefined");
}

#[test]
fn fresh_name_fills_gaps() {
    let mut vars = Variables::new();
    vars.register("var0");
    vars.register("var2");
    assert_eq!(vars.fresh_name(), "var1");

    let mut vars = Variables::new();
    vars.register("var0");
    vars.register("var1");
    assert_eq!(vars.fresh_name(), "var2");
}

#[test]
fn rename_is_visible_at_every_usage() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();

    let mut left = Block::call(&mut ids, None, "print", &["value".to_string()]);
    left.slots[0].value = Some(Block::var_ref(&mut ids, key));
    let mut right = Block::call(&mut ids, None, "print", &["value".to_string()]);
    right.slots[0].value = Some(Block::var_ref(&mut ids, key));
    let program = Program {
        blocks: vec![left, right],
    };

    vars.rename(key, "count");
    assert_eq!(
        codegen::generate(&program, &vars),
        "print(count)\nprint(count)\n"
    );
}

#[test]
fn find_block_reaches_slot_values_and_children() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();

    let condition = Block::literal(&mut ids, "True");
    let condition_id = condition.id;
    let body_call = Block::call(&mut ids, None, "print", &["value".to_string()]);
    let body_id = body_call.id;

    let mut while_loop = Block::while_loop(&mut ids);
    while_loop.slots[0].value = Some(condition);
    while_loop.children.push(body_call);

    let mut assign = Block::assign(&mut ids, key);
    let expr = Block::literal(&mut ids, "1");
    let expr_id = expr.id;
    assign.set_expression(expr);

    let blocks = vec![while_loop, assign];
    assert_eq!(find_block(condition_id, &blocks).map(|b| b.id), Some(condition_id));
    assert_eq!(find_block(body_id, &blocks).map(|b| b.id), Some(body_id));
    assert_eq!(find_block(expr_id, &blocks).map(|b| b.id), Some(expr_id));
}

#[test]
fn find_block_misses_unknown_id() {
    let mut ids = IdGen::new();
    let program = sqrt_program(&mut ids);
    let unknown = ids.mint();
    assert!(find_block(unknown, &program.blocks).is_none());
}

#[test]
fn find_slot_reaches_nested_slots() {
    let mut ids = IdGen::new();
    let mut op = Block::binary_op(&mut ids, None, "+");
    let inner = Block::binary_op(&mut ids, None, "*");
    let inner_left_id = inner.slots[0].id;
    op.slots[0].value = Some(inner);

    let blocks = vec![op];
    let found = find_slot(inner_left_id, &blocks).expect("nested slot not found");
    assert_eq!(found.name, "left");
}

#[test]
fn forest_ids_are_pairwise_distinct() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();

    let mut for_loop = Block::for_range(&mut ids, key);
    for_loop.slots[0].value = Some(Block::literal(&mut ids, "0"));
    for_loop.slots[1].value = Some(Block::literal(&mut ids, "10"));
    let mut print = Block::call(&mut ids, None, "print", &["value".to_string()]);
    print.slots[0].value = Some(Block::var_ref(&mut ids, key));
    for_loop.children.push(print);

    let mut seen = std::collections::HashSet::new();
    fn collect(block: &Block, seen: &mut std::collections::HashSet<blockpad::NodeId>) {
        assert!(seen.insert(block.id), "duplicate block id {}", block.id);
        for slot in &block.slots {
            assert!(seen.insert(slot.id), "duplicate slot id {}", slot.id);
        }
        for child in block.child_blocks() {
            collect(child, seen);
        }
    }
    collect(&for_loop, &mut seen);
}

#[test]
fn set_expression_clears_literal_but_not_vice_versa() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();

    let mut assign = Block::assign(&mut ids, key);
    assign.set_literal("5");
    assign.set_expression(Block::literal(&mut ids, "6"));
    match &assign.kind {
        BlockKind::Assign {
            literal,
            expression,
            ..
        } => {
            assert!(literal.is_none());
            assert!(expression.is_some());
        }
        other => panic!("unexpected kind: {:?}", other),
    }

    // The raw field edit leaves the bound expression in place, and the
    // expression still wins in the output.
    assign.set_literal("7");
    match &assign.kind {
        BlockKind::Assign {
            literal,
            expression,
            ..
        } => {
            assert_eq!(literal.as_deref(), Some("7"));
            assert!(expression.is_some());
        }
        other => panic!("unexpected kind: {:?}", other),
    }
    assert_eq!(codegen::write_block(&assign, &vars), "var0 = 6");
}

#[test]
fn descriptor_carries_structure_as_json() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let program = sqrt_program(&mut ids);
    let desc = descriptor::describe(&program.blocks[0], &vars);

    let json = serde_json::to_value(&desc).expect("serialize failed");
    assert_eq!(json["type"], "function");
    assert_eq!(json["moduleName"], "math");
    assert_eq!(json["name"], "sqrt");
    assert_eq!(json["slots"][0]["name"], "value");
    assert_eq!(json["slots"][0]["value"]["type"], "literal");
    assert_eq!(json["slots"][0]["value"]["value"], "4");
}

#[test]
fn descriptor_for_empty_slot_is_a_named_placeholder() {
    let mut ids = IdGen::new();
    let vars = Variables::new();
    let call = Block::call(&mut ids, None, "print", &["value".to_string()]);
    let desc = descriptor::describe(&call, &vars);

    let json = serde_json::to_value(&desc).expect("serialize failed");
    assert_eq!(json["slots"][0]["name"], "value");
    assert!(json["slots"][0].get("value").is_none());
    assert!(json.get("moduleName").is_none());
}

#[test]
fn descriptor_resolves_variable_names_through_registry() {
    let mut ids = IdGen::new();
    let mut vars = Variables::new();
    let key = vars.register_fresh();
    vars.rename(key, "total");

    let mut assign = Block::assign(&mut ids, key);
    assign.set_expression(Block::var_ref(&mut ids, key));
    let desc = descriptor::describe(&assign, &vars);

    let json = serde_json::to_value(&desc).expect("serialize failed");
    assert_eq!(json["type"], "assign-variable");
    assert_eq!(json["variable"], "total");
    assert_eq!(json["expression"]["type"], "variable");
    assert_eq!(json["expression"]["name"], "total");
}
