//! Structural diff between a desired and a current tree

use serde::Serialize;

use crate::names::NameMap;

use super::node::StructureNode;

/// Entries missing from the current tree and entries the desired tree does
/// not declare. Both sides are directory-shaped and only hold divergent
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub missing: StructureNode,
    pub extra: StructureNode,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare two trees.
///
/// Names are matched exactly. When one side holds a file and the other a
/// directory under the same name, the desired node is reported as missing
/// and the current node as extra, each unchanged.
pub fn compare(desired: &StructureNode, current: &StructureNode) -> DiffResult {
    let empty = NameMap::new();
    let (missing, extra) = compare_dirs(
        desired.children().unwrap_or(&empty),
        current.children().unwrap_or(&empty),
    );
    DiffResult {
        missing: StructureNode::Dir(missing),
        extra: StructureNode::Dir(extra),
    }
}

type Diff = (NameMap<StructureNode>, NameMap<StructureNode>);

fn compare_dirs(desired: &NameMap<StructureNode>, current: &NameMap<StructureNode>) -> Diff {
    let mut missing = NameMap::new();
    let mut extra = NameMap::new();

    for (name, wanted) in desired.iter() {
        match (wanted, current.get(name)) {
            (_, None) => {
                missing.insert(name, wanted.clone());
            }
            (StructureNode::File, Some(StructureNode::File)) => {}
            (StructureNode::Dir(wanted_children), Some(StructureNode::Dir(found_children))) => {
                let (child_missing, child_extra) = compare_dirs(wanted_children, found_children);
                if !child_missing.is_empty() {
                    missing.insert(name, StructureNode::Dir(child_missing));
                }
                if !child_extra.is_empty() {
                    extra.insert(name, StructureNode::Dir(child_extra));
                }
            }
            (_, Some(found)) => {
                missing.insert(name, wanted.clone());
                extra.insert(name, found.clone());
            }
        }
    }

    for (name, found) in current.iter() {
        if !desired.contains_key(name) {
            extra.insert(name, found.clone());
        }
    }

    (missing, extra)
}
