//! Render configuration types

use crate::names::NameSet;

/// Connector glyphs used to draw the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// `├── `, `└── ` and `│   `
    #[default]
    Unicode,
    /// `|-- `, `` `-- `` and `|   `
    Ascii,
}

impl IndentStyle {
    /// Connector placed in front of an entry name.
    pub fn connector(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (IndentStyle::Unicode, false) => "├── ",
            (IndentStyle::Unicode, true) => "└── ",
            (IndentStyle::Ascii, false) => "|-- ",
            (IndentStyle::Ascii, true) => "`-- ",
        }
    }

    /// Indentation added below an entry for its children.
    pub fn continuation(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (_, true) => "    ",
            (IndentStyle::Unicode, false) => "│   ",
            (IndentStyle::Ascii, false) => "|   ",
        }
    }
}

/// Configuration for tree rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Directories shown as a single line with their item count.
    pub compress: NameSet,
    /// Entries left out of the rendering entirely.
    pub exclude: NameSet,
    pub indent: IndentStyle,
}

impl RenderConfig {
    pub fn compressing<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            compress: NameSet::new(names),
            ..Default::default()
        }
    }
}
