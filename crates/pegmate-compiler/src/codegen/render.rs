//! Rust source emission for a compiled [`Program`].
//!
//! The output is a self-contained module written against the `pegmate-vm`
//! combinator API: one function per rule, a `parse` entry point, and an
//! optional visitor trait over the resulting parse tree.

use std::collections::HashSet;
use std::fmt::Write;

use pegmate_core::utils::{to_pascal_case, to_rust_ident, to_snake_case};
use pegmate_program::{Combinator, Program};

use crate::Config;

pub fn render(program: &Program, config: &Config) -> String {
    Emitter::new(program, config).emit()
}

struct Emitter<'a> {
    program: &'a Program,
    config: &'a Config,
    patterns: Vec<(&'a str, u32)>,
    /// Function suffix per rule, indexed by rule id.
    names: Vec<String>,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(program: &'a Program, config: &'a Config) -> Self {
        let mut seen = HashSet::new();
        let names = program
            .iter()
            .map(|(id, rule)| {
                let base = to_snake_case(&rule.name);
                let mut name = base.clone();
                let mut suffix = id.index();
                while seen.contains(&name) {
                    name = format!("{base}_{suffix}");
                    suffix += 1;
                }
                seen.insert(name.clone());
                name
            })
            .collect();

        Self {
            program,
            config,
            patterns: program.patterns(),
            names,
            output: String::new(),
        }
    }

    fn emit(mut self) -> String {
        self.output.push_str("// Generated by pegmate. Do not edit.\n\n");
        self.output.push_str(
            "use pegmate_vm::{Parse, ParseNode, ParseResult, Parser, PatternTable, RuntimeError, Tracer};\n",
        );
        self.emit_patterns();
        self.emit_entry();
        for (id, rule) in self.program.iter() {
            let function = self.function(id.index());
            let body = self.expr(&rule.body);
            write!(
                self.output,
                "\npub fn {function}<T: Tracer>(p: &mut Parser<'_, T>, n: &mut ParseNode) -> ParseResult {{\n    p.call(n, {:?}, {}, |p, n| {body})\n}}\n",
                rule.name,
                rule.capture,
            )
            .expect("String write never fails");
        }
        if self.config.get_generate_visitor() {
            self.emit_visitor();
        }

        let config = self.config;
        match config.get_namespace() {
            Some(namespace) => wrap_module(namespace, &self.output),
            None => self.output,
        }
    }

    fn emit_patterns(&mut self) {
        if self.patterns.is_empty() {
            self.output
                .push_str("\npub const PATTERNS: &[(&str, u32)] = &[];\n");
            return;
        }
        self.output
            .push_str("\npub const PATTERNS: &[(&str, u32)] = &[\n");
        for (pattern, repeat) in &self.patterns {
            writeln!(self.output, "    ({pattern:?}, {repeat}),")
                .expect("String write never fails");
        }
        self.output.push_str("];\n");
    }

    fn emit_entry(&mut self) {
        let entry = self.program.entry();
        let name = &self.program.rule(entry).name;
        let function = self.function(entry.index());
        write!(
            self.output,
            "\n/// Parse `input` from `{name}`, requiring the whole input to match.\n\
             pub fn parse(input: &str) -> Result<Parse, RuntimeError> {{\n    \
             let patterns = PatternTable::new(PATTERNS.iter().copied())?;\n    \
             let mut parser = Parser::new(input, &patterns);\n    \
             parser.run(|p, n| {function}(p, n))\n\
             }}\n"
        )
        .expect("String write never fails");
    }

    fn emit_visitor(&mut self) {
        let prefix = self
            .config
            .get_class_name()
            .map(to_pascal_case)
            .unwrap_or_else(|| to_pascal_case(&self.program.rule(self.program.entry()).name));
        let trait_name = format!("{prefix}Visitor");
        let captured: Vec<(String, String)> = self
            .program
            .iter()
            .filter(|(_, rule)| rule.capture)
            .map(|(id, rule)| (rule.name.clone(), self.method(id.index())))
            .collect();

        writeln!(self.output, "\npub trait {trait_name} {{")
            .expect("String write never fails");
        for (_, method) in &captured {
            writeln!(
                self.output,
                "    fn {method}(&mut self, node: &ParseNode) {{\n        self.visit_children(node);\n    }}\n"
            )
            .expect("String write never fails");
        }
        self.output.push_str(
            "    fn visit_children(&mut self, node: &ParseNode) {\n        for child in &node.children {\n            walk(self, child);\n        }\n    }\n}\n",
        );

        writeln!(
            self.output,
            "\npub fn walk<V: {trait_name} + ?Sized>(visitor: &mut V, node: &ParseNode) {{\n    match node.rule.as_deref() {{"
        )
        .expect("String write never fails");
        for (name, method) in &captured {
            writeln!(self.output, "        Some({name:?}) => visitor.{method}(node),")
                .expect("String write never fails");
        }
        self.output
            .push_str("        _ => visitor.visit_children(node),\n    }\n}\n");
    }

    fn function(&self, index: usize) -> String {
        to_rust_ident(&format!("parse_{}", self.names[index]))
    }

    fn method(&self, index: usize) -> String {
        to_rust_ident(&format!("visit_{}", self.names[index]))
    }

    fn pattern_index(&self, pattern: &str, repeat: u32) -> usize {
        self.patterns
            .iter()
            .position(|&(p, r)| p == pattern && r == repeat)
            .unwrap_or_default()
    }

    fn expr(&self, c: &Combinator) -> String {
        match c {
            Combinator::Literal(text) => format!("p.literal(n, {text:?})"),
            Combinator::Pattern { pattern, repeat } => {
                format!("p.pattern(n, {})", self.pattern_index(pattern, *repeat))
            }
            Combinator::Sequence(l, r) => format!(
                "p.sequence(n, |p, n| {}, |p, n| {})",
                self.expr(l),
                self.expr(r)
            ),
            Combinator::Choice(l, r) => format!(
                "p.choice(n, |p, n| {}, |p, n| {})",
                self.expr(l),
                self.expr(r)
            ),
            Combinator::Repeat { min, max, body } => {
                let max = match max {
                    Some(max) => format!("Some({max})"),
                    None => "None".to_string(),
                };
                format!("p.repeat(n, {min}, {max}, |p, n| {})", self.expr(body))
            }
            Combinator::Not(body) => format!("p.not(n, |p, n| {})", self.expr(body)),
            Combinator::Drop(body) => format!("p.drop(n, |p, n| {})", self.expr(body)),
            Combinator::Terminal { unescape, body } => {
                format!("p.terminal(n, {unescape}, |p, n| {})", self.expr(body))
            }
            Combinator::ErrorName {
                label,
                promote,
                body,
            } => format!(
                "p.error_name(n, {label:?}, {promote}, |p, n| {})",
                self.expr(body)
            ),
            Combinator::Call(id) => format!("{}(p, n)", self.function(id.index())),
        }
    }
}

fn wrap_module(namespace: &str, code: &str) -> String {
    let mut out = format!("pub mod {} {{\n", to_rust_ident(&to_snake_case(namespace)));
    for line in code.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("}\n");
    out
}
