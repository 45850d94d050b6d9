//! Python lowering: tree-sitter-python CST → declaration tree.
//!
//! Only declarations and the literal expressions they mention are lowered
//! in detail. Every other statement becomes [`Stmt::Other`] and every other
//! expression [`Expr::Unsupported`], so the visitor sees a closed set of
//! node kinds.

use tree_sitter::Node;
use tracing::trace;

use super::ast::{Expr, KeywordOnly, Number, Parameters, Stmt, Target};
use super::common::{decode_string_literal, get_node_text, node_line, parse_number_literal};

// ============ Main Entry Point ============

/// Lower the root `module` node into its statement list
pub fn lower_module(root: Node, source: &[u8]) -> Vec<Stmt> {
    lower_block(root, source)
}

/// Lower every statement of a `module` or `block` node
fn lower_block(node: Node, source: &[u8]) -> Vec<Stmt> {
    let mut cursor = node.walk();
    let stmts = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| lower_statement(child, source))
        .collect();
    stmts
}

fn lower_statement(node: Node, source: &[u8]) -> Stmt {
    let line = node_line(node);

    match node.kind() {
        "expression_statement" => match first_named_child(node) {
            Some(inner) if inner.kind() == "assignment" => lower_assignment(inner, source, line),
            _ => Stmt::Other {
                line,
                kind: node.kind().to_string(),
            },
        },

        "function_definition" => lower_function(node, source),

        "class_definition" => lower_class(node, source),

        // Decorators are dropped; the definition keeps its own line
        "decorated_definition" => match node.child_by_field_name("definition") {
            Some(definition) => lower_statement(definition, source),
            None => Stmt::Other {
                line,
                kind: node.kind().to_string(),
            },
        },

        kind => Stmt::Other {
            line,
            kind: kind.to_string(),
        },
    }
}

// ============ Assignments ============

/// `a = 1`, `a = b = 1`, `a, b = 1, 2`, `x: int = 1`
fn lower_assignment(node: Node, source: &[u8], line: usize) -> Stmt {
    let mut targets = Vec::new();
    let mut current = node;

    loop {
        let Some(right) = current.child_by_field_name("right") else {
            // bare annotation: `x: int`
            return Stmt::Other {
                line,
                kind: "annotation".to_string(),
            };
        };
        if let Some(left) = current.child_by_field_name("left") {
            targets.push(lower_target(left, source));
        }
        if right.kind() != "assignment" {
            break;
        }
        current = right;
    }

    Stmt::Assign { line, targets }
}

fn lower_target(node: Node, source: &[u8]) -> Target {
    match node.kind() {
        "pattern_list" | "tuple_pattern" | "list_pattern" | "tuple" | "list" => {
            Target::Tuple(lower_elements(node, source))
        }
        _ => match lower_expr(node, source) {
            // `items[0] = ...` keeps its source text
            Expr::Unsupported { .. } => {
                Target::Single(Expr::Name(get_node_text(node, source).to_string()))
            }
            expr => Target::Single(expr),
        },
    }
}

// ============ Definitions ============

fn lower_function(node: Node, source: &[u8]) -> Stmt {
    let name = node
        .child_by_field_name("name")
        .map(|n| get_node_text(n, source).to_string())
        .unwrap_or_default();
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lower_parameters(p, source))
        .unwrap_or_default();

    Stmt::FunctionDef {
        line: node_line(node),
        name,
        params,
    }
}

fn lower_parameters(node: Node, source: &[u8]) -> Parameters {
    let mut params = Parameters::default();
    let mut keyword_only = false;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" | "tuple_pattern" => {
                push_param(&mut params, keyword_only, get_node_text(child, source), None);
            }
            "typed_parameter" => {
                let Some(inner) = first_named_child(child) else {
                    continue;
                };
                match inner.kind() {
                    "list_splat_pattern" => {
                        params.vararg = splat_name(inner, source);
                        keyword_only = true;
                    }
                    "dictionary_splat_pattern" => params.kwarg = splat_name(inner, source),
                    _ => push_param(&mut params, keyword_only, get_node_text(inner, source), None),
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| get_node_text(n, source))
                    .unwrap_or_default();
                let default = child
                    .child_by_field_name("value")
                    .map(|v| lower_expr(v, source))
                    .unwrap_or(Expr::Unsupported {
                        kind: "missing".to_string(),
                    });
                push_param(&mut params, keyword_only, name, Some(default));
            }
            "list_splat_pattern" => {
                params.vararg = splat_name(child, source);
                keyword_only = true;
            }
            "dictionary_splat_pattern" => params.kwarg = splat_name(child, source),
            "keyword_separator" => keyword_only = true,
            "positional_separator" | "comment" => {}
            kind => trace!(kind, "ignoring parameter node"),
        }
    }

    params
}

fn push_param(params: &mut Parameters, keyword_only: bool, name: &str, default: Option<Expr>) {
    if keyword_only {
        params.keyword_only.push(KeywordOnly {
            name: name.to_string(),
            default,
        });
        return;
    }
    params.positional.push(name.to_string());
    if let Some(default) = default {
        params.defaults.push(default);
    }
}

/// Name behind `*args` / `**kwargs`
fn splat_name(node: Node, source: &[u8]) -> Option<String> {
    first_named_child(node).map(|n| get_node_text(n, source).to_string())
}

fn lower_class(node: Node, source: &[u8]) -> Stmt {
    let name = node
        .child_by_field_name("name")
        .map(|n| get_node_text(n, source).to_string())
        .unwrap_or_default();

    let mut bases = Vec::new();
    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        let mut cursor = superclasses.walk();
        for arg in superclasses.named_children(&mut cursor) {
            match arg.kind() {
                // metaclass=..., **options
                "keyword_argument" | "dictionary_splat" | "comment" => {}
                _ => bases.push(lower_expr(arg, source)),
            }
        }
    }

    let body = node
        .child_by_field_name("body")
        .map(|b| lower_block(b, source))
        .unwrap_or_default();

    Stmt::ClassDef {
        line: node_line(node),
        name,
        bases,
        body,
    }
}

// ============ Expressions ============

fn lower_expr(node: Node, source: &[u8]) -> Expr {
    let text = get_node_text(node, source);

    match node.kind() {
        "integer" | "float" => match parse_number_literal(text) {
            Some(number) => Expr::Num(number),
            None => unsupported(node),
        },

        "string" => match decode_string_literal(text) {
            Some(value) => Expr::Str(value),
            None => unsupported(node),
        },

        "concatenated_string" => {
            let mut cursor = node.walk();
            let parts: Option<Vec<String>> = node
                .named_children(&mut cursor)
                .filter(|part| part.kind() == "string")
                .map(|part| decode_string_literal(get_node_text(part, source)))
                .collect();
            match parts {
                Some(parts) => Expr::Str(parts.concat()),
                None => unsupported(node),
            }
        }

        "identifier" => Expr::Name(text.to_string()),
        "true" => Expr::Name("True".to_string()),
        "false" => Expr::Name("False".to_string()),
        "none" => Expr::Name("None".to_string()),

        "attribute" => match dotted_name(node, source) {
            Some(name) => Expr::Name(name),
            None => unsupported(node),
        },

        "list" | "list_pattern" => Expr::List(lower_elements(node, source)),
        "tuple" | "tuple_pattern" | "pattern_list" | "expression_list" => {
            Expr::Tuple(lower_elements(node, source))
        }

        "dictionary" => lower_dictionary(node, source),

        "parenthesized_expression" => match first_named_child(node) {
            Some(inner) => lower_expr(inner, source),
            None => unsupported(node),
        },

        "unary_operator" => lower_unary(node, source),

        _ => unsupported(node),
    }
}

fn lower_elements(node: Node, source: &[u8]) -> Vec<Expr> {
    let mut cursor = node.walk();
    let elements = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| lower_expr(child, source))
        .collect();
    elements
}

fn lower_dictionary(node: Node, source: &[u8]) -> Expr {
    let mut keys = Vec::new();
    let mut values = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "pair" => {
                let (Some(key), Some(value)) = (
                    child.child_by_field_name("key"),
                    child.child_by_field_name("value"),
                ) else {
                    continue;
                };
                keys.push(lower_expr(key, source));
                values.push(lower_expr(value, source));
            }
            // {**other}
            "dictionary_splat" => {
                keys.push(unsupported(child));
                values.push(match first_named_child(child) {
                    Some(inner) => lower_expr(inner, source),
                    None => unsupported(child),
                });
            }
            _ => {}
        }
    }

    Expr::Dict { keys, values }
}

/// `-1` and `+2.5` fold into number literals
fn lower_unary(node: Node, source: &[u8]) -> Expr {
    let operator = node
        .child_by_field_name("operator")
        .map(|op| get_node_text(op, source))
        .unwrap_or_default();
    let argument = node
        .child_by_field_name("argument")
        .map(|arg| lower_expr(arg, source));

    match (operator, argument) {
        ("+", Some(Expr::Num(number))) => Expr::Num(number),
        ("-", Some(Expr::Num(number))) => Expr::Num(negate(number)),
        _ => unsupported(node),
    }
}

fn negate(number: Number) -> Number {
    match number {
        Number::Int(n) => match n.checked_neg() {
            Some(negated) => Number::Int(negated),
            None => Number::Text(format!("-{}", n)),
        },
        Number::Float(f) => Number::Float(-f),
        Number::Text(text) => Number::Text(format!("-{}", text)),
    }
}

/// `os.path.sep` → "os.path.sep"; `None` when any part is not a plain name
fn dotted_name(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "identifier" => Some(get_node_text(node, source).to_string()),
        "attribute" => {
            let object = dotted_name(node.child_by_field_name("object")?, source)?;
            let attribute = node.child_by_field_name("attribute")?;
            Some(format!("{}.{}", object, get_node_text(attribute, source)))
        }
        _ => None,
    }
}

// ============ Helper Functions ============

fn first_named_child(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let first = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

fn unsupported(node: Node) -> Expr {
    trace!(kind = node.kind(), line = node_line(node), "unsupported literal");
    Expr::Unsupported {
        kind: node.kind().to_string(),
    }
}
