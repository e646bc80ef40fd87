//! Nested help text
//!
//! A [`HelpEntry`] is a sequence of lines and nested entries. Rendering
//! flattens it, prefixing every line with an indent that doubles for each
//! level of nesting.

use crate::config::{Example, Text};

/// Indent unit doubled once per nesting depth
pub const BASE_INDENT: &str = " ";

/// An ordered sequence of lines and nested entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpEntry {
    items: Vec<HelpItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpItem {
    Line(String),
    Nested(HelpEntry),
}

impl HelpEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[HelpItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.items.push(HelpItem::Line(line.into()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line(String::new())
    }

    /// Append `entry` one level deeper than this entry's lines
    pub fn nest(&mut self, entry: HelpEntry) -> &mut Self {
        self.items.push(HelpItem::Nested(entry));
        self
    }

    /// Append a description: one line, or a nested block for several lines
    pub fn text(&mut self, text: &Text) -> &mut Self {
        match text {
            Text::Line(line) => self.line(line.clone()),
            Text::Lines(lines) => self.nest(lines.iter().cloned().collect()),
        }
    }

    /// Flatten into indented lines, the outermost lines at depth 1
    pub fn flatten(&self, base: &str) -> Vec<String> {
        let mut output = Vec::new();
        self.flatten_into(1, base, &mut output);
        output
    }

    fn flatten_into(&self, depth: u32, base: &str, output: &mut Vec<String>) {
        let indent = indentation(base, depth);

        for item in &self.items {
            match item {
                HelpItem::Nested(entry) => entry.flatten_into(depth + 1, base, output),
                HelpItem::Line(line) => output.push(format!("{}{}", indent, line)),
            }
        }
    }

    pub fn render(&self) -> String {
        self.flatten(BASE_INDENT).join("\n")
    }
}

/// `base` doubled `depth` times
pub fn indentation(base: &str, depth: u32) -> String {
    let mut indent = base.to_string();
    for _ in 0..depth {
        indent = indent.repeat(2);
    }
    indent
}

impl<S: Into<String>> FromIterator<S> for HelpEntry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        HelpEntry {
            items: iter.into_iter().map(|line| HelpItem::Line(line.into())).collect(),
        }
    }
}

impl From<&[Example]> for HelpEntry {
    fn from(examples: &[Example]) -> Self {
        let items = examples
            .iter()
            .map(|example| match example {
                Example::Line(line) => HelpItem::Line(line.clone()),
                Example::Nested(nested) => HelpItem::Nested(HelpEntry::from(nested.as_slice())),
            })
            .collect();

        HelpEntry { items }
    }
}
