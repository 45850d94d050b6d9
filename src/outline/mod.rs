//! Python structure outline: AST-based declaration summary
//!
//! Source text is parsed with tree-sitter, lowered into a small closed
//! declaration tree, walked by the structure visitor and rendered as an
//! indented outline.
//!
//! ## Architecture
//!
//! ```text
//! outline/
//! ├── mod.rs         - Entry point, parser setup
//! ├── common.rs      - Shared constants and text utilities
//! ├── ast.rs         - Declaration tree (Stmt / Expr)
//! ├── python.rs      - tree-sitter CST lowering
//! ├── literal.rs     - Literal evaluation
//! ├── signature.rs   - Function signature normalization
//! ├── structure.rs   - Outline entries
//! ├── visitor.rs     - Structure building
//! └── render.rs      - Text rendering
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use outline::{outline, RenderOptions};
//!
//! let text = outline("x = 1\ndef greet(name): pass\n", RenderOptions::default())?;
//! assert_eq!(text, "v x\nf greet(name)");
//! ```

pub mod ast;
pub mod common;
pub mod literal;
pub mod python;
pub mod render;
pub mod signature;
pub mod structure;
pub mod visitor;

use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::error::OutlineError;

pub use literal::Value;
pub use render::{render, render_with, RenderOptions};
pub use structure::{Content, Entry, Structure, SymbolKind};
pub use visitor::{build_structure, StructureVisitor};

// ============ Supported Files ============

const PYTHON_EXTENSIONS: &[&str] = &["py", "pyw", "pyi"];

/// Detect Python sources from a file extension
pub fn is_python_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    PYTHON_EXTENSIONS.contains(&ext.as_str())
}

// ============ Main Entry Point ============

/// Parse Python source into the declaration tree
pub fn parse_module(content: &str) -> Result<Vec<ast::Stmt>, OutlineError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| OutlineError::Language(e.to_string()))?;

    let tree = parser
        .parse(content, None)
        .ok_or(OutlineError::Parse { line: 1, column: 1 })?;

    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error_position(root).unwrap_or((1, 1));
        debug!(line, column, "source does not parse");
        return Err(OutlineError::Parse { line, column });
    }

    let stmts = python::lower_module(root, content.as_bytes());
    debug!(statements = stmts.len(), "lowered module");
    Ok(stmts)
}

/// Parse and visit source, producing its structure
pub fn outline_structure(content: &str) -> Result<Structure, OutlineError> {
    let stmts = parse_module(content)?;
    Ok(build_structure(&stmts))
}

/// Parse, visit and render source in one step
pub fn outline(content: &str, options: RenderOptions) -> Result<String, OutlineError> {
    let structure = outline_structure(content)?;
    Ok(render_with(&structure, options))
}

/// Position (1-based) of the first error or missing node
fn first_error_position(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let position = node.start_position();
        return Some((position.row + 1, position.column + 1));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(position) = first_error_position(child) {
                return Some(position);
            }
        }
    }
    None
}
