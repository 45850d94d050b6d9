//! Nested outline structure produced by the visitor.

use serde::Serialize;

use super::literal::Value;

/// Symbol vocabulary shown at the start of every outline line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    #[serde(rename = "v")]
    GlobalVar,
    #[serde(rename = "f")]
    Function,
    #[serde(rename = "c")]
    Class,
    #[serde(rename = "m")]
    Method,
    #[serde(rename = "a")]
    Attribute,
    #[serde(rename = "_m")]
    PrivateMethod,
}

impl SymbolKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::GlobalVar => "v",
            Self::Function => "f",
            Self::Class => "c",
            Self::Method => "m",
            Self::Attribute => "a",
            Self::PrivateMethod => "_m",
        }
    }

    /// Kinds whose content is a `{name, body}` composite
    pub fn is_class_like(&self) -> bool {
        matches!(self, Self::Class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    /// Variable names, in target order
    Items(Vec<Value>),
    /// Normalized function signature
    Signature(String),
    Class { name: String, body: Structure },
}

/// One declaration. `line` is the source line it starts on; it is carried
/// for display and does not identify the entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub line: usize,
    pub kind: SymbolKind,
    pub content: Content,
}

impl Entry {
    pub fn body(&self) -> Option<&Structure> {
        match &self.content {
            Content::Class { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Declarations in source encounter order. Sibling entries never replace
/// each other, even when they share a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Structure {
    entries: Vec<Entry>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        debug_assert_eq!(
            entry.kind.is_class_like(),
            matches!(entry.content, Content::Class { .. })
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries including every nested class body
    pub fn total_entries(&self) -> usize {
        self.entries
            .iter()
            .map(|e| 1 + e.body().map_or(0, Structure::total_entries))
            .sum()
    }
}

impl<'a> IntoIterator for &'a Structure {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
