//! Structure tree types

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::names::NameMap;

/// A directory layout: directories map child names to nodes, files are bare
/// markers.
///
/// In JSON a file is `null` and a directory is an object. An array of names
/// is accepted as shorthand for a directory containing only those files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureNode {
    File,
    Dir(NameMap<StructureNode>),
}

impl StructureNode {
    pub fn empty_dir() -> Self {
        StructureNode::Dir(NameMap::new())
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, StructureNode::Dir(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, StructureNode::File)
    }

    pub fn children(&self) -> Option<&NameMap<StructureNode>> {
        match self {
            StructureNode::Dir(children) => Some(children),
            StructureNode::File => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&StructureNode> {
        self.children().and_then(|c| c.get(name))
    }

    /// True for a directory without children. Files are never empty.
    pub fn is_empty(&self) -> bool {
        self.children().is_some_and(NameMap::is_empty)
    }

    /// Use this node as a directory; a bare file marker becomes an empty directory.
    pub fn into_dir(self) -> Self {
        match self {
            StructureNode::File => StructureNode::empty_dir(),
            dir => dir,
        }
    }

    /// Count (directories, files) below this node, not counting the node itself.
    pub fn count(&self) -> (usize, usize) {
        let mut dirs = 0;
        let mut files = 0;
        if let StructureNode::Dir(children) = self {
            for (_, child) in children.iter() {
                match child {
                    StructureNode::File => files += 1,
                    StructureNode::Dir(_) => {
                        dirs += 1;
                        let (d, f) = child.count();
                        dirs += d;
                        files += f;
                    }
                }
            }
        }
        (dirs, files)
    }

    /// Relative paths of every file below this node, depth-first.
    pub fn file_paths(&self) -> Vec<RelativePath> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        collect_file_paths(self, &mut current, &mut paths);
        paths
    }
}

fn collect_file_paths(node: &StructureNode, current: &mut Vec<String>, out: &mut Vec<RelativePath>) {
    if let StructureNode::Dir(children) = node {
        for (name, child) in children.iter() {
            current.push(name.to_string());
            match child {
                StructureNode::File => out.push(RelativePath(current.clone())),
                StructureNode::Dir(_) => collect_file_paths(child, current, out),
            }
            current.pop();
        }
    }
}

impl Serialize for StructureNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StructureNode::File => serializer.serialize_unit(),
            StructureNode::Dir(children) => children.serialize(serializer),
        }
    }
}

struct StructureVisitor;

impl<'de> Visitor<'de> for StructureVisitor {
    type Value = StructureNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null, an array of file names, or an object")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(StructureNode::File)
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(StructureNode::File)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut children = NameMap::new();
        while let Some(name) = seq.next_element::<String>()? {
            children.insert(name, StructureNode::File);
        }
        Ok(StructureNode::Dir(children))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut children = NameMap::new();
        while let Some((name, child)) = map.next_entry::<String, StructureNode>()? {
            children.insert(name, child);
        }
        Ok(StructureNode::Dir(children))
    }
}

impl<'de> Deserialize<'de> for StructureNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StructureVisitor)
    }
}

/// A path relative to a scan root, as a list of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Split a `/` or `\` separated path. Empty and `.` segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self(
            path.split(['/', '\\'])
                .filter(|s| !s.is_empty() && *s != ".")
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}
