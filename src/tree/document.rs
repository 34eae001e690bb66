//! Structure documents on disk: loading the desired layout, saving a scanned
//! layout, and creating a desired layout

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fs::FileSystem;

use super::node::StructureNode;

/// Conventional name of the desired-structure document.
pub const STRUCTURE_CONFIG_FILE: &str = "structure.config.json";

/// Load the desired structure.
///
/// A missing document is fatal. A document that does not parse is logged and
/// replaced by an empty structure, so comparisons against it report every
/// current entry as extra.
pub fn load_desired_structure<F: FileSystem>(fs: &F, path: &Path) -> Result<StructureNode> {
    if !fs.exists(path) {
        return Err(Error::ConfigMissing {
            path: path.to_path_buf(),
        });
    }
    let raw = fs.read_to_string(path).map_err(|e| Error::io(path, e))?;
    match serde_json::from_str::<StructureNode>(&raw) {
        Ok(structure) => Ok(structure.into_dir()),
        Err(source) => {
            let err = Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            };
            warn!("{err}; using an empty structure");
            Ok(StructureNode::empty_dir())
        }
    }
}

/// Render a structure as pretty JSON with a trailing newline.
pub fn structure_to_json(structure: &StructureNode) -> Result<String> {
    let mut json = serde_json::to_string_pretty(structure)?;
    json.push('\n');
    Ok(json)
}

/// Save a structure as a JSON document, replacing any existing file.
pub fn save_structure<F: FileSystem>(fs: &F, path: &Path, structure: &StructureNode) -> Result<()> {
    let json = structure_to_json(structure)?;
    fs.write(path, &json).map_err(|e| Error::io(path, e))?;
    info!("structure saved to {}", path.display());
    Ok(())
}

/// What [`build_structure`] created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub created_dirs: usize,
    pub created_files: usize,
}

/// Content written into files created by [`build_structure`].
pub fn placeholder_file_contents(name: &str) -> String {
    format!("// Placeholder for {name}\n")
}

/// Create the directories and files of `desired` below `base`.
///
/// Existing entries are left alone; only absent directories are created and
/// absent files are written with placeholder content.
pub fn build_structure<F: FileSystem>(fs: &F, base: &Path, desired: &StructureNode) -> Result<BuildReport> {
    let mut report = BuildReport::default();
    if let StructureNode::Dir(children) = desired {
        if !fs.exists(base) {
            fs.create_dir_all(base).map_err(|e| Error::io(base, e))?;
            report.created_dirs += 1;
        }
        for (name, child) in children.iter() {
            build_entry(fs, &base.join(name), name, child, &mut report)?;
        }
    }
    Ok(report)
}

fn build_entry<F: FileSystem>(
    fs: &F,
    path: &Path,
    name: &str,
    node: &StructureNode,
    report: &mut BuildReport,
) -> Result<()> {
    match node {
        StructureNode::File => {
            if fs.exists(path) {
                debug!("file exists: {}", path.display());
            } else {
                fs.write(path, &placeholder_file_contents(name))
                    .map_err(|e| Error::io(path, e))?;
                info!("file created: {}", path.display());
                report.created_files += 1;
            }
        }
        StructureNode::Dir(children) => {
            if fs.exists(path) {
                debug!("directory exists: {}", path.display());
            } else {
                fs.create_dir_all(path).map_err(|e| Error::io(path, e))?;
                info!("directory created: {}", path.display());
                report.created_dirs += 1;
            }
            for (child_name, child) in children.iter() {
                build_entry(fs, &path.join(child_name), child_name, child, report)?;
            }
        }
    }
    Ok(())
}
