// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Program structure nodes: directives, instructions and labels.
//!
//! Directive parameters are rendered verbatim, joined with `", "`. A
//! parameter that itself contains `", "` or `]` renders ambiguously; the
//! text form is for display and does not parse back.

use std::fmt;

use crate::config::{AstConfig, MAX_TREE_DEPTH};
use crate::error::{AstError, AstErrorKind, AstResult, NodeKind};
use crate::value::{StrValue, Value};
use crate::Span;

/// A directive to the emitter, e.g. `.class public Foo`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directive {
    pub name: String,
    pub params: Vec<String>,
    pub span: Option<Span>,
}

impl Directive {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Directive{{ {} [{}] }}", self.name, self.params.join(", "))
    }
}

/// An instruction argument: either a string or a number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Argument {
    Str(StrValue),
    Number(Value),
}

/// A folded instruction argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Number(f64),
}

impl Argument {
    /// Numeric arguments are floating point, so integer results are widened.
    pub fn evaluate(&self, config: &AstConfig) -> AstResult<ArgValue> {
        match self {
            Argument::Str(s) => Ok(ArgValue::Str(s.value().to_string())),
            Argument::Number(v) => Ok(ArgValue::Number(v.evaluate(config)?.as_f64())),
        }
    }
}

impl From<StrValue> for Argument {
    fn from(s: StrValue) -> Self {
        Argument::Str(s)
    }
}

impl From<Value> for Argument {
    fn from(v: Value) -> Self {
        Argument::Number(v)
    }
}

/// An instruction with its arguments in source order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub name: String,
    pub args: Vec<Argument>,
    pub span: Option<Span>,
}

impl Instruction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn push_arg(&mut self, arg: impl Into<Argument>) {
        self.args.push(arg.into());
    }

    pub fn push_str(&mut self, value: impl Into<String>) {
        self.push_arg(StrValue::new(value));
    }

    pub fn push_number(&mut self, value: Value) {
        self.push_arg(value);
    }

    /// Fold every argument with the default limits.
    pub fn evaluate_args(&self) -> AstResult<Vec<ArgValue>> {
        self.evaluate_args_with(&AstConfig::default())
    }

    pub fn evaluate_args_with(&self, config: &AstConfig) -> AstResult<Vec<ArgValue>> {
        self.args
            .iter()
            .map(|arg| arg.evaluate(config))
            .collect::<AstResult<Vec<_>>>()
            .map_err(|e| e.in_node(NodeKind::Instruction, &self.name, self.span))
    }
}

/// A named block of nodes. Labels nest.
///
/// The body is only reachable through [`Label::push`], which keeps the
/// nesting depth within [`MAX_TREE_DEPTH`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLabel"))]
pub struct Label {
    pub name: String,
    body: Vec<Node>,
    pub span: Option<Span>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    depth: usize,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Vec::new(),
            span: None,
            depth: 1,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Append a node. A nested label that would take this label past
    /// [`MAX_TREE_DEPTH`] is rejected and dropped.
    pub fn push(&mut self, node: impl Into<Node>) -> AstResult<()> {
        let node = node.into();
        if let Node::Label(child) = &node {
            if child.depth >= MAX_TREE_DEPTH {
                return Err(AstError::from(AstErrorKind::MaxNestingExceeded {
                    limit: MAX_TREE_DEPTH,
                })
                .in_node(NodeKind::Label, &self.name, self.span));
            }
            self.depth = self.depth.max(child.depth + 1);
        }
        self.body.push(node);
        Ok(())
    }

    pub fn body(&self) -> &[Node] {
        &self.body
    }

    /// Label nesting depth; a label with no nested labels is depth 1.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLabel {
    name: String,
    body: Vec<Node>,
    span: Option<Span>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLabel> for Label {
    type Error = AstError;

    fn try_from(raw: RawLabel) -> AstResult<Self> {
        let mut label = Label::new(raw.name);
        label.span = raw.span;
        for node in raw.body {
            label.push(node)?;
        }
        Ok(label)
    }
}

/// Any node of the program tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Value(Value),
    Directive(Directive),
    Instruction(Instruction),
    Label(Label),
}

impl Node {
    /// Name of a directive, instruction or label.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Value(_) => None,
            Node::Directive(d) => Some(&d.name),
            Node::Instruction(i) => Some(&i.name),
            Node::Label(l) => Some(&l.name),
        }
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Value(v)
    }
}

impl From<Directive> for Node {
    fn from(d: Directive) -> Self {
        Node::Directive(d)
    }
}

impl From<Instruction> for Node {
    fn from(i: Instruction) -> Self {
        Node::Instruction(i)
    }
}

impl From<Label> for Node {
    fn from(l: Label) -> Self {
        Node::Label(l)
    }
}

/// Top-level nodes of one source file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Every instruction in the tree, depth-first in source order.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            stack: vec![self.nodes.iter()],
        }
    }
}

/// Iterator returned by [`Program::instructions`].
pub struct Instructions<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = &'a Instruction;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.stack.last_mut()?.next();
            match next {
                None => {
                    self.stack.pop();
                }
                Some(Node::Instruction(inst)) => return Some(inst),
                Some(Node::Label(label)) => self.stack.push(label.body.iter()),
                Some(Node::Value(_)) | Some(Node::Directive(_)) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::ArithmeticOperation;

    #[test]
    fn directive_display() {
        let d = Directive::new("class", vec!["public".into(), "Foo".into()]);
        assert_eq!(d.to_string(), "Directive{ class [public, Foo] }");
        assert_eq!(Directive::new("end", vec![]).to_string(), "Directive{ end [] }");
    }

    #[test]
    fn directive_params_are_not_escaped() {
        let joined = Directive::new("line", vec!["a, b".into()]);
        let split = Directive::new("line", vec!["a".into(), "b".into()]);
        assert_eq!(joined.to_string(), split.to_string());
        assert_ne!(joined, split);
    }

    #[test]
    fn evaluate_args_widens_numbers() {
        let mut inst = Instruction::new("ldc");
        inst.push_str("hello");
        inst.push_number(
            Value::binary(ArithmeticOperation::Mul, Value::immediate(3), Value::immediate(4))
                .unwrap(),
        );
        assert_eq!(
            inst.evaluate_args().unwrap(),
            vec![ArgValue::Str("hello".into()), ArgValue::Number(12.0)]
        );
    }

    #[test]
    fn evaluate_args_reports_instruction() {
        let mut inst = Instruction::new("bipush").with_span(Span::new(3, 14));
        inst.push_number(
            Value::binary(ArithmeticOperation::Div, Value::immediate(1), Value::immediate(0))
                .unwrap(),
        );
        let err = inst.evaluate_args().unwrap_err();
        assert_eq!(err.kind, AstErrorKind::DivisionByZero);
        let ctx = err.context.unwrap();
        assert_eq!(ctx.node, NodeKind::Instruction);
        assert_eq!(ctx.name, "bipush");
        assert_eq!(ctx.span, Some(Span::new(3, 14)));
    }

    #[test]
    fn instructions_walks_labels_in_order() -> AstResult<()> {
        let mut inner = Label::new("inner");
        inner.push(Instruction::new("b"))?;
        let mut outer = Label::new("outer");
        outer.push(Instruction::new("a"))?;
        outer.push(inner)?;
        outer.push(Directive::new("limit", vec!["stack".into(), "2".into()]))?;
        outer.push(Instruction::new("c"))?;

        let mut program = Program::new();
        program.push(Directive::new("method", vec!["main".into()]));
        program.push(outer);
        program.push(Instruction::new("d"));

        let names: Vec<_> = program.instructions().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        Ok(())
    }

    #[test]
    fn label_depth_tracks_deepest_child() -> AstResult<()> {
        let mut leaf = Label::new("leaf");
        leaf.push(Instruction::new("nop"))?;
        assert_eq!(leaf.depth(), 1);

        let mut mid = Label::new("mid");
        mid.push(leaf)?;
        let mut top = Label::new("top");
        top.push(Label::new("shallow"))?;
        top.push(mid)?;
        top.push(Label::new("shallow2"))?;
        assert_eq!(top.depth(), 3);
        assert_eq!(top.body().len(), 3);
        Ok(())
    }

    #[test]
    fn label_push_stops_at_tree_depth_ceiling() {
        let mut label = Label::new("l1");
        for i in 2..=MAX_TREE_DEPTH {
            let mut outer = Label::new(format!("l{}", i));
            outer.push(label).unwrap();
            label = outer;
        }
        assert_eq!(label.depth(), MAX_TREE_DEPTH);

        let mut top = Label::new("top").with_span(Span::new(0, 3));
        top.push(Instruction::new("nop")).unwrap();
        let err = top.push(label).unwrap_err();
        assert_eq!(
            err.kind,
            AstErrorKind::MaxNestingExceeded {
                limit: MAX_TREE_DEPTH
            }
        );
        let ctx = err.context.unwrap();
        assert_eq!(ctx.name, "top");
        assert_eq!(ctx.span, Some(Span::new(0, 3)));
        // the rejected label is not kept
        assert_eq!(top.body().len(), 1);
        assert_eq!(top.depth(), 1);
    }

    #[test]
    fn node_names() {
        assert_eq!(Node::from(Label::new("L")).name(), Some("L"));
        assert_eq!(Node::from(Value::immediate(1)).name(), None);
    }
}
