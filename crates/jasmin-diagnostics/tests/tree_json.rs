// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Trees written to JSON and read back through the `serde` feature.

use jasmin_ast::{
    ArithmeticOperation, AstConfig, AstErrorKind, Instruction, Label, Node, NumKind, Number,
    Program, Value,
};
use serde_json::json;

fn mixed_sum() -> Value {
    // (1 + 2.5) + 1
    let inner = Value::binary(ArithmeticOperation::Add, Value::immediate(1), Value::immediate(2.5))
        .unwrap();
    Value::binary(ArithmeticOperation::Add, inner, Value::immediate(1)).unwrap()
}

#[test]
fn expression_round_trips() {
    let expr = mixed_sum();
    let text = serde_json::to_string(&expr).unwrap();
    let back: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(back, expr);
    assert_eq!(back.kind(), NumKind::Float);
    assert_eq!(back.depth(), 3);
    assert_eq!(back.get_value().unwrap(), Number::Float(4.5));
}

#[test]
fn cached_fields_are_not_written() {
    let json = serde_json::to_value(mixed_sum()).unwrap();
    let bin = &json["Binary"];
    assert_eq!(bin["op"], "Add");
    assert!(bin.get("kind").is_none());
    assert!(bin.get("depth").is_none());
}

#[test]
fn edited_kind_and_depth_are_recomputed() {
    let mut json = serde_json::to_value(mixed_sum()).unwrap();
    json["Binary"]["depth"] = json!(1);
    json["Binary"]["kind"] = json!("Int");

    let back: Value = serde_json::from_value(json).unwrap();
    assert_eq!(back.kind(), NumKind::Float);
    assert_eq!(back.depth(), 3);

    let shallow = AstConfig { max_depth: 1, ..AstConfig::default() };
    assert_eq!(
        back.evaluate(&shallow).unwrap_err().kind,
        AstErrorKind::MaxNestingExceeded { limit: 1 }
    );
}

#[test]
fn labels_round_trip_with_recomputed_depth() {
    let mut inner = Label::new("loop");
    inner.push(Instruction::new("goto")).unwrap();
    let mut outer = Label::new("main");
    outer.push(inner).unwrap();
    outer.push(mixed_sum()).unwrap();
    let mut program = Program::new();
    program.push(outer);

    let mut json = serde_json::to_value(&program).unwrap();
    assert!(json["nodes"][0]["Label"].get("depth").is_none());
    json["nodes"][0]["Label"]["depth"] = json!(1_000_000);

    let back: Program = serde_json::from_value(json).unwrap();
    assert_eq!(back, program);
    match &back.nodes[0] {
        Node::Label(label) => {
            assert_eq!(label.depth(), 2);
            assert_eq!(label.body().len(), 2);
        }
        other => panic!("expected a label, got {:?}", other),
    }
    assert_eq!(back.to_text().unwrap(), program.to_text().unwrap());
}
