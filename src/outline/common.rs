//! Common helpers shared by the lowering and evaluation passes.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use super::ast::Number;

// ============ Threshold Constants ============

pub const MAX_OUTLINE_LINES: usize = 2000;
pub const MAX_LINE_LEN: usize = 400;
pub const DEFAULT_INDENT_WIDTH: usize = 2;

static DECIMAL_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer pattern"));
static DECIMAL_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.[0-9]*|\.[0-9]+|[0-9]+)([eE][+-]?[0-9]+)?$")
        .expect("valid float pattern")
});

// ============ Text Utilities ============

/// Get text content of a tree-sitter node
pub fn get_node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    let slice = source.get(node.start_byte()..node.end_byte()).unwrap_or(&[]);
    std::str::from_utf8(slice).unwrap_or("")
}

/// 1-based line of a node
pub fn node_line(node: Node) -> usize {
    node.start_position().row + 1
}

/// Truncate a line to a maximum length, adding "..." if truncated
pub fn truncate_line(line: &str, max_len: usize) -> String {
    let mut out = String::new();
    for (count, ch) in line.chars().enumerate() {
        if count >= max_len {
            out.push_str("...");
            return out;
        }
        out.push(ch);
    }
    out
}

// ============ Number Literals ============

/// Parse the text of a numeric literal. Returns `None` when the text is
/// not numeric at all.
pub fn parse_number_literal(text: &str) -> Option<Number> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(rest) = cleaned.strip_suffix(['j', 'J']) {
        return DECIMAL_FLOAT
            .is_match(rest)
            .then(|| Number::Text(text.trim().to_string()));
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };
    let lower = unsigned.to_ascii_lowercase();
    let radix = if lower.starts_with("0x") {
        Some(16)
    } else if lower.starts_with("0o") {
        Some(8)
    } else if lower.starts_with("0b") {
        Some(2)
    } else {
        None
    };

    if let Some(radix) = radix {
        let digits = &lower[2..];
        return match i64::from_str_radix(digits, radix) {
            Ok(n) => Some(Number::Int(if negative { -n } else { n })),
            Err(_) if digits.chars().all(|c| c.is_digit(radix)) && !digits.is_empty() => {
                Some(Number::Text(text.trim().to_string()))
            }
            Err(_) => None,
        };
    }

    if DECIMAL_INT.is_match(&cleaned) {
        return Some(match cleaned.parse::<i64>() {
            Ok(n) => Number::Int(n),
            Err(_) => Number::Text(text.trim().to_string()),
        });
    }

    if DECIMAL_FLOAT.is_match(&cleaned) {
        return cleaned.parse::<f64>().ok().map(Number::Float);
    }

    None
}

// ============ String Literals ============

/// Decode a single Python string literal (`'a'`, `r"\d"`, `b'x'`, `"""doc"""`)
/// into its value. Returns `None` for f-strings and text that is not a
/// string literal.
pub fn decode_string_literal(text: &str) -> Option<String> {
    let text = text.trim();
    let quote_start = text.find(['\'', '"'])?;
    let prefix = text[..quote_start].to_ascii_lowercase();
    if !prefix.chars().all(|c| matches!(c, 'r' | 'b' | 'u' | 'f')) || prefix.contains('f') {
        return None;
    }
    let raw = prefix.contains('r');

    let body = &text[quote_start..];
    let inner = ["\"\"\"", "'''", "\"", "'"].iter().find_map(|q| {
        if body.len() >= 2 * q.len() && body.starts_with(q) && body.ends_with(q) {
            Some(&body[q.len()..body.len() - q.len()])
        } else {
            None
        }
    })?;

    if raw {
        return Some(inner.to_string());
    }
    Some(unescape(inner, prefix.contains('b')))
}

/// Decode backslash escapes. `\u`, `\U` and `\N{...}` are only escapes
/// outside bytes literals; `\N{...}` is kept as written.
fn unescape(inner: &str, bytes: bool) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            // line continuation
            Some('\n') => {}
            Some(first @ '0'..='7') => {
                let mut digits = String::from(first);
                while digits.len() < 3 {
                    match chars.next_if(|c| ('0'..='7').contains(c)) {
                        Some(digit) => digits.push(digit),
                        None => break,
                    }
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    }
                }
            }
            Some(kind @ 'x') => push_hex_escape(&mut out, &mut chars, kind, 2),
            Some(kind @ 'u') if !bytes => push_hex_escape(&mut out, &mut chars, kind, 4),
            Some(kind @ 'U') if !bytes => push_hex_escape(&mut out, &mut chars, kind, 8),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// `\xhh`, `\uxxxx`, `\Uxxxxxxxx`; malformed escapes stay as written
fn push_hex_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    kind: char,
    width: usize,
) {
    let mut hex = String::with_capacity(width);
    while hex.len() < width {
        match chars.next_if(|c| c.is_ascii_hexdigit()) {
            Some(digit) => hex.push(digit),
            None => break,
        }
    }
    let decoded = if hex.len() == width {
        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
    } else {
        None
    };
    match decoded {
        Some(decoded) => out.push(decoded),
        None => {
            out.push('\\');
            out.push(kind);
            out.push_str(&hex);
        }
    }
}
