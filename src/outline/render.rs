//! Text rendering of a [`Structure`]: one line per entry, depth first,
//! parents before children.

use super::common::{truncate_line, DEFAULT_INDENT_WIDTH, MAX_LINE_LEN, MAX_OUTLINE_LINES};
use super::structure::{Content, Structure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Apply the line count and line length caps (off unless asked for)
    pub cap_output: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            cap_output: false,
        }
    }
}

/// Render with the default two-space indentation and no capping
pub fn render(structure: &Structure) -> String {
    let mut lines = Vec::new();
    format_structure(structure, 0, DEFAULT_INDENT_WIDTH, &mut lines);
    lines.join("\n")
}

pub fn render_with(structure: &Structure, options: RenderOptions) -> String {
    let mut lines = Vec::new();
    format_structure(structure, 0, options.indent_width, &mut lines);

    if options.cap_output {
        cap_lines(lines)
    } else {
        lines.join("\n")
    }
}

fn format_structure(root: &Structure, level: usize, indent_width: usize, output: &mut Vec<String>) {
    let space = " ".repeat(level * indent_width);

    for entry in root {
        let kind = entry.kind.symbol();
        match &entry.content {
            Content::Class { name, body } => {
                output.push(format!("{}{} {}", space, kind, name));
                format_structure(body, level + 1, indent_width, output);
            }
            Content::Signature(signature) => {
                output.push(format!("{}{} {}", space, kind, signature));
            }
            Content::Items(items) => {
                // global variable, like a, b = 1, 2
                let names: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                output.push(format!("{}{} {}", space, kind, names.join(", ")));
            }
        }
    }
}

fn cap_lines(mut lines: Vec<String>) -> String {
    let truncated = lines.len() > MAX_OUTLINE_LINES;
    lines.truncate(MAX_OUTLINE_LINES);

    let mut capped: Vec<String> = lines
        .iter()
        .map(|line| truncate_line(line, MAX_LINE_LEN))
        .collect();
    if truncated {
        capped.push("...".to_string());
    }
    capped.join("\n")
}
