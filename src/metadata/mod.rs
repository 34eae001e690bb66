//! Path descriptions
//!
//! The description document mirrors the directory layout: a file maps to its
//! description string, a directory maps to an object of its children. A
//! directory may describe itself under the reserved `"."` key.
//!
//! ```json
//! {
//!   "src": {
//!     ".": "Application sources",
//!     "main.rs": "CLI entry point"
//!   },
//!   "README.md": "Project overview"
//! }
//! ```
//!
//! Lookups ignore case; stored keys keep the casing they were written with.

mod backfill;
mod store;

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::names::NameMap;

pub use backfill::{BackfillReport, backfill};
pub use store::MetadataStore;

/// Key under which a directory keeps its own description.
pub const SELF_KEY: &str = ".";

/// Description inserted for paths that have none yet.
pub const DEFAULT_PLACEHOLDER: &str = "No description available";

/// Conventional name of the description document.
pub const DEFAULT_METADATA_FILE: &str = "description.json";

/// A node of the description document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataEntry {
    Description(String),
    Group(NameMap<MetadataEntry>),
}

impl MetadataEntry {
    pub fn description(text: impl Into<String>) -> Self {
        MetadataEntry::Description(text.into())
    }

    /// The non-empty description attached to this entry: the string itself,
    /// or a group's `"."` description.
    pub fn text(&self) -> Option<&str> {
        let text: &str = match self {
            MetadataEntry::Description(text) => text,
            MetadataEntry::Group(children) => match children.get(SELF_KEY) {
                Some(MetadataEntry::Description(text)) => text,
                _ => return None,
            },
        };
        if text.is_empty() { None } else { Some(text) }
    }
}

/// The root of the description document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: NameMap<MetadataEntry>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &NameMap<MetadataEntry> {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut NameMap<MetadataEntry> {
        &mut self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a top-level entry under its exact name.
    pub fn insert(&mut self, name: impl Into<String>, entry: MetadataEntry) -> Option<MetadataEntry> {
        self.entries.insert(name, entry)
    }

    /// Resolve a path segment by segment, ignoring case.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&MetadataEntry> {
        let (last, parents) = segments.split_last()?;
        let mut current = &self.entries;
        for segment in parents {
            match current.find(segment.as_ref())?.1 {
                MetadataEntry::Group(children) => current = children,
                MetadataEntry::Description(_) => return None,
            }
        }
        current.find(last.as_ref()).map(|(_, entry)| entry)
    }

    /// The non-empty description for a path, if any.
    pub fn describe<S: AsRef<str>>(&self, segments: &[S]) -> Option<&str> {
        self.lookup(segments).and_then(MetadataEntry::text)
    }
}

impl Serialize for MetadataEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetadataEntry::Description(text) => serializer.serialize_str(text),
            MetadataEntry::Group(children) => children.serialize(serializer),
        }
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

// `null` values are dropped while reading so that backfill treats them as
// absent and fills them in.
fn read_group<'de, A: MapAccess<'de>>(mut map: A) -> Result<NameMap<MetadataEntry>, A::Error> {
    let mut children = NameMap::new();
    while let Some((name, entry)) = map.next_entry::<String, Option<MetadataEntry>>()? {
        if let Some(entry) = entry {
            children.insert(name, entry);
        }
    }
    Ok(children)
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = MetadataEntry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a description string or an object of descriptions")
    }

    fn visit_str<E: serde::de::Error>(self, text: &str) -> Result<Self::Value, E> {
        Ok(MetadataEntry::Description(text.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, text: String) -> Result<Self::Value, E> {
        Ok(MetadataEntry::Description(text))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        read_group(map).map(MetadataEntry::Group)
    }
}

impl<'de> Deserialize<'de> for MetadataEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

struct RootVisitor;

impl<'de> Visitor<'de> for RootVisitor {
    type Value = Metadata;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of descriptions")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        read_group(map).map(|entries| Metadata { entries })
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RootVisitor)
    }
}
