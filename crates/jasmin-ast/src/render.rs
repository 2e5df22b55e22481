// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Text rendering of the tree.
//!
//! Output format:
//!
//! ```text
//! Directive{ class [public, Foo] }
//! Label{ main
//!   Instruction{ ldc [ImmediateValue{hi}, BinaryExpression{ ImmediateValue{2} + ImmediateValue{1.5} }] }
//!   Label{ loop
//!     Instruction{ goto [ImmediateValue{loop}] }
//!   }
//! }
//! ```
//!
//! Label nesting and expression depth are both checked against
//! `AstConfig::max_depth`. Strings and directive parameters are written
//! verbatim, so the text is not meant to be parsed back.

use crate::config::AstConfig;
use crate::error::{AstError, AstErrorKind, AstResult, NodeKind};
use crate::node::{Argument, Instruction, Label, Node, Program};
use crate::value::{check_depth, BinaryExpression, Value};

struct Renderer<'a> {
    config: &'a AstConfig,
    out: String,
}

impl<'a> Renderer<'a> {
    fn new(config: &'a AstConfig) -> Self {
        Self {
            config,
            out: String::new(),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self, level: usize) {
        let width = level * self.config.indent_width;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn node(&mut self, node: &Node, level: usize) -> AstResult<()> {
        match node {
            Node::Value(v) => {
                self.indent(level);
                self.value(v)
            }
            Node::Directive(d) => {
                self.indent(level);
                self.out.push_str(&d.to_string());
                Ok(())
            }
            Node::Instruction(i) => {
                self.indent(level);
                self.instruction(i)
            }
            Node::Label(l) => self.label(l, level),
        }
    }

    fn label(&mut self, label: &Label, level: usize) -> AstResult<()> {
        if level >= self.config.max_depth {
            return Err(AstError::from(AstErrorKind::MaxNestingExceeded {
                limit: self.config.max_depth,
            })
            .in_node(NodeKind::Label, &label.name, label.span));
        }
        self.indent(level);
        self.out.push_str("Label{ ");
        self.out.push_str(&label.name);
        self.out.push('\n');
        for child in label.body() {
            self.node(child, level + 1)
                .map_err(|e| e.in_node(NodeKind::Label, &label.name, label.span))?;
            self.out.push('\n');
        }
        self.indent(level);
        self.out.push('}');
        Ok(())
    }

    fn instruction(&mut self, inst: &Instruction) -> AstResult<()> {
        self.out.push_str("Instruction{ ");
        self.out.push_str(&inst.name);
        self.out.push_str(" [");
        for (i, arg) in inst.args.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            match arg {
                Argument::Str(s) => self.out.push_str(&s.to_string()),
                Argument::Number(v) => self
                    .value(v)
                    .map_err(|e| e.in_node(NodeKind::Instruction, &inst.name, inst.span))?,
            }
        }
        self.out.push_str("] }");
        Ok(())
    }

    fn value(&mut self, value: &Value) -> AstResult<()> {
        check_depth(value.depth(), self.config)?;
        self.write_value(value);
        Ok(())
    }

    // Depth already checked by the caller.
    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Immediate(imm) => self.out.push_str(&imm.to_string()),
            Value::Binary(bin) => self.write_binary(bin),
        }
    }

    fn write_binary(&mut self, bin: &BinaryExpression) {
        self.out.push_str("BinaryExpression{ ");
        self.write_value(bin.lhs());
        self.out.push(' ');
        self.out.push_str(bin.op().symbol());
        self.out.push(' ');
        self.write_value(bin.rhs());
        self.out.push_str(" }");
    }
}

macro_rules! impl_render {
    ($ty:ty, |$r:ident, $this:ident| $body:expr) => {
        impl $ty {
            /// Render with the default layout and limits.
            pub fn to_text(&self) -> AstResult<String> {
                self.render(&AstConfig::default())
            }

            pub fn render(&self, config: &AstConfig) -> AstResult<String> {
                let mut $r = Renderer::new(config);
                let $this = self;
                $body?;
                Ok($r.finish())
            }
        }
    };
}

impl_render!(Value, |r, this| r.value(this));
impl_render!(Instruction, |r, this| r.instruction(this));
impl_render!(Label, |r, this| r.label(this, 0));
impl_render!(Node, |r, this| r.node(this, 0));

impl BinaryExpression {
    pub fn to_text(&self) -> AstResult<String> {
        self.render(&AstConfig::default())
    }

    pub fn render(&self, config: &AstConfig) -> AstResult<String> {
        check_depth(self.depth(), config)?;
        let mut r = Renderer::new(config);
        r.write_binary(self);
        Ok(r.finish())
    }
}

impl Program {
    /// Top-level nodes, one per line.
    pub fn to_text(&self) -> AstResult<String> {
        self.render(&AstConfig::default())
    }

    pub fn render(&self, config: &AstConfig) -> AstResult<String> {
        let mut r = Renderer::new(config);
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                r.out.push('\n');
            }
            r.node(node, 0)?;
        }
        Ok(r.finish())
    }
}
