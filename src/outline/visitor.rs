//! Structure visitor: dispatches over declaration statements and builds
//! the nested [`Structure`].

use tracing::trace;

use super::ast::{Expr, Parameters, Stmt, Target};
use super::literal::{evaluate, evaluate_list, Value};
use super::signature;
use super::structure::{Content, Entry, SymbolKind, Structure};

/// Walks statement lists once, in order.
///
/// Functions are classified as [`SymbolKind::Function`] wherever they
/// appear, including class bodies.
#[derive(Debug, Default)]
pub struct StructureVisitor {
    structure: Structure,
}

impl StructureVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit a statement list, appending its declarations to the structure
    /// accumulated so far.
    pub fn visit(&mut self, stmts: &[Stmt]) -> &Structure {
        for stmt in stmts {
            if let Some(entry) = visit_stmt(stmt) {
                self.structure.push(entry);
            }
        }
        &self.structure
    }

    pub fn into_structure(self) -> Structure {
        self.structure
    }
}

/// Build a structure from a statement list
pub fn build_structure(stmts: &[Stmt]) -> Structure {
    let mut visitor = StructureVisitor::new();
    visitor.visit(stmts);
    visitor.into_structure()
}

fn visit_stmt(stmt: &Stmt) -> Option<Entry> {
    match stmt {
        Stmt::Assign { line, targets } => Some(visit_assign(*line, targets)),
        Stmt::ClassDef {
            line,
            name,
            bases,
            body,
        } => Some(visit_class_def(*line, name, bases, body)),
        Stmt::FunctionDef { line, name, params } => Some(visit_function_def(*line, name, params)),
        Stmt::Other { line, kind } => {
            trace!(line, kind = kind.as_str(), "skipping statement");
            None
        }
    }
}

fn visit_assign(line: usize, targets: &[Target]) -> Entry {
    let mut content = Vec::new();

    for target in targets {
        match target {
            Target::Tuple(elts) => content.extend(evaluate_list(elts)),
            Target::Single(expr) => content.push(target_name(expr)),
        }
    }

    Entry {
        line,
        kind: SymbolKind::GlobalVar,
        content: Content::Items(content),
    }
}

/// Identifier of a single assignment target
fn target_name(expr: &Expr) -> Value {
    match expr {
        Expr::Name(name) => Value::Str(name.clone()),
        other => evaluate(other),
    }
}

fn visit_class_def(line: usize, name: &str, bases: &[Expr], body: &[Stmt]) -> Entry {
    let bases: Vec<String> = evaluate_list(bases).iter().map(Value::to_string).collect();
    let signature = format!("{}({})", name, bases.join(", "));

    Entry {
        line,
        kind: SymbolKind::Class,
        content: Content::Class {
            name: signature,
            body: build_structure(body),
        },
    }
}

fn visit_function_def(line: usize, name: &str, params: &Parameters) -> Entry {
    Entry {
        line,
        kind: SymbolKind::Function,
        content: Content::Signature(signature::build_parameters(name, params)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::ast::Number;

    fn name(s: &str) -> Expr {
        Expr::Name(s.to_string())
    }

    #[test]
    fn test_assign_tuple_targets() {
        let stmts = vec![Stmt::Assign {
            line: 1,
            targets: vec![Target::Tuple(vec![name("a"), name("b"), name("c")])],
        }];
        let structure = build_structure(&stmts);
        assert_eq!(
            structure.entries()[0].content,
            Content::Items(vec![
                Value::Str("a".into()),
                Value::Str("b".into()),
                Value::Str("c".into()),
            ])
        );
    }

    #[test]
    fn test_assign_chained_targets() {
        let stmts = vec![Stmt::Assign {
            line: 4,
            targets: vec![Target::Single(name("a")), Target::Single(name("b"))],
        }];
        let structure = build_structure(&stmts);
        assert_eq!(structure.entries()[0].line, 4);
        assert_eq!(structure.entries()[0].kind, SymbolKind::GlobalVar);
        assert_eq!(
            structure.entries()[0].content,
            Content::Items(vec![Value::Str("a".into()), Value::Str("b".into())])
        );
    }

    #[test]
    fn test_class_without_bases_and_nested_body() {
        let stmts = vec![Stmt::ClassDef {
            line: 1,
            name: "Empty".into(),
            bases: vec![],
            body: vec![
                Stmt::Other { line: 2, kind: "expression_statement".into() },
                Stmt::FunctionDef {
                    line: 3,
                    name: "run".into(),
                    params: Parameters {
                        positional: vec!["self".into()],
                        ..Parameters::default()
                    },
                },
            ],
        }];
        let structure = build_structure(&stmts);
        let entry = &structure.entries()[0];
        match &entry.content {
            Content::Class { name, body } => {
                assert_eq!(name, "Empty()");
                assert_eq!(body.len(), 1);
                assert_eq!(body.entries()[0].kind, SymbolKind::Function);
                assert_eq!(body.entries()[0].content, Content::Signature("run(self)".into()));
            }
            other => panic!("expected class content, got {:?}", other),
        }
    }

    #[test]
    fn test_class_bases_are_stringified() {
        let stmts = vec![Stmt::ClassDef {
            line: 1,
            name: "Dog".into(),
            bases: vec![name("Animal"), Expr::Unsupported { kind: "call".into() }],
            body: vec![],
        }];
        let structure = build_structure(&stmts);
        match &structure.entries()[0].content {
            Content::Class { name, .. } => assert_eq!(name, "Dog(Animal, None)"),
            other => panic!("expected class content, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_statements_are_skipped() {
        let stmts = vec![
            Stmt::Other { line: 1, kind: "import_statement".into() },
            Stmt::FunctionDef {
                line: 2,
                name: "f".into(),
                params: Parameters {
                    positional: vec!["x".into()],
                    defaults: vec![Expr::Num(Number::Int(1))],
                    ..Parameters::default()
                },
            },
        ];
        let structure = build_structure(&stmts);
        assert_eq!(structure.len(), 1);
        assert_eq!(structure.entries()[0].content, Content::Signature("f(x=1)".into()));
    }

    #[test]
    fn test_visit_accumulates() {
        let mut visitor = StructureVisitor::new();
        visitor.visit(&[Stmt::Assign { line: 1, targets: vec![Target::Single(name("a"))] }]);
        let structure = visitor.visit(&[Stmt::Assign { line: 1, targets: vec![Target::Single(name("b"))] }]);
        assert_eq!(structure.len(), 2);
    }
}
