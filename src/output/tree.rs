//! TreeRenderer - annotated text tree of a directory

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fs::{EntryKind, FileSystem};
use crate::metadata::Metadata;
use crate::names::sort_names;

use super::config::RenderConfig;

/// Marker printed where a directory listing could not be read.
pub const READ_ERROR_MARKER: &str = "[Error reading directory]";

/// Number of immediate children reported for a compressed directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCount {
    Known(usize),
    Unknown,
}

impl fmt::Display for ItemCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCount::Known(n) => write!(f, "{n}"),
            ItemCount::Unknown => f.write_str("unknown"),
        }
    }
}

/// One rendered line, before it is turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeLine {
    Entry {
        prefix: String,
        connector: &'static str,
        name: String,
        is_dir: bool,
        /// Set for compressed directories.
        items: Option<ItemCount>,
        description: Option<String>,
    },
    ReadError {
        prefix: String,
    },
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeLine::Entry {
                prefix,
                connector,
                name,
                items,
                description,
                ..
            } => {
                write!(f, "{prefix}{connector}{name}")?;
                if let Some(items) = items {
                    write!(f, " [{items} items]")?;
                }
                if let Some(description) = description {
                    write!(f, " - {description}")?;
                }
                Ok(())
            }
            TreeLine::ReadError { prefix } => write!(f, "{prefix}{READ_ERROR_MARKER}"),
        }
    }
}

/// Renders a directory as an indented tree annotated with descriptions.
///
/// The root itself gets no line. At each level directories come before
/// files, each group sorted alphabetically ignoring case.
pub struct TreeRenderer<F> {
    fs: F,
    config: RenderConfig,
}

impl<F: FileSystem> TreeRenderer<F> {
    pub fn new(fs: F, config: RenderConfig) -> Self {
        Self { fs, config }
    }

    pub fn lines(&self, root: &Path, metadata: &Metadata) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        let mut key = Vec::new();
        self.render_dir(root, "", &mut key, metadata, &mut lines);
        debug!(root = %root.display(), lines = lines.len(), "render finished");
        lines
    }

    pub fn render(&self, root: &Path, metadata: &Metadata) -> String {
        let mut output = String::new();
        for line in self.lines(root, metadata) {
            output.push_str(&line.to_string());
            output.push('\n');
        }
        output
    }

    /// Render the tree and write it to `output`, replacing the file.
    pub fn write_to(&self, root: &Path, metadata: &Metadata, output: &Path) -> Result<()> {
        let text = self.render(root, metadata);
        self.fs
            .write(output, &text)
            .map_err(|e| Error::io(output, e))
    }

    fn render_dir(
        &self,
        dir: &Path,
        prefix: &str,
        key: &mut Vec<String>,
        metadata: &Metadata,
        out: &mut Vec<TreeLine>,
    ) {
        let names = match self.fs.read_dir(dir) {
            Ok(names) => names,
            Err(source) => {
                warn!("{}", Error::scan_io(dir, source));
                out.push(TreeLine::ReadError {
                    prefix: prefix.to_string(),
                });
                return;
            }
        };

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for name in names {
            if self.config.exclude.contains(&name) {
                continue;
            }
            let path = dir.join(&name);
            match self.fs.stat(&path) {
                Ok(EntryKind::Dir) => dirs.push(name),
                Ok(EntryKind::File) => files.push(name),
                Err(source) => warn!("{}", Error::scan_io(&path, source)),
            }
        }
        sort_names(&mut dirs);
        sort_names(&mut files);

        let total = dirs.len() + files.len();
        let entries = dirs
            .into_iter()
            .map(|name| (name, true))
            .chain(files.into_iter().map(|name| (name, false)));

        let style = self.config.indent;
        for (index, (name, is_dir)) in entries.enumerate() {
            let is_last = index + 1 == total;
            let path = dir.join(&name);
            key.push(name.clone());
            let description = metadata.describe(key.as_slice()).map(str::to_string);

            let compressed = is_dir && self.config.compress.contains(&name);
            let items = compressed.then(|| self.count_items(&path));
            out.push(TreeLine::Entry {
                prefix: prefix.to_string(),
                connector: style.connector(is_last),
                name,
                is_dir,
                items,
                description,
            });

            if is_dir && !compressed {
                let child_prefix = format!("{prefix}{}", style.continuation(is_last));
                self.render_dir(&path, &child_prefix, key, metadata, out);
            }
            key.pop();
        }
    }

    fn count_items(&self, dir: &Path) -> ItemCount {
        match self.fs.read_dir(dir) {
            Ok(names) => ItemCount::Known(names.len()),
            Err(source) => {
                warn!("{}", Error::scan_io(dir, source));
                ItemCount::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::output::config::IndentStyle;

    fn metadata(json: &str) -> Metadata {
        serde_json::from_str(json).unwrap()
    }

    fn project() -> MemoryFs {
        let fs = MemoryFs::new();
        fs.add_file("/p/src/main.rs", "")
            .add_file("/p/src/lib.rs", "")
            .add_file("/p/README.md", "")
            .add_file("/p/build.rs", "")
            .add_file("/p/node_modules/a/index.js", "")
            .add_file("/p/node_modules/b.js", "")
            .add_file("/p/node_modules/c.js", "");
        fs
    }

    #[test]
    fn test_renders_directories_first_with_connectors() {
        let fs = project();
        let output = TreeRenderer::new(&fs, RenderConfig::default()).render(Path::new("/p"), &Metadata::new());

        let expected = "\
├── node_modules
│   ├── a
│   │   └── index.js
│   ├── b.js
│   └── c.js
├── src
│   ├── lib.rs
│   └── main.rs
├── build.rs
└── README.md
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_compressed_directory_shows_item_count() {
        let fs = project();
        let renderer = TreeRenderer::new(&fs, RenderConfig::compressing(["NODE_MODULES"]));
        let output = renderer.render(Path::new("/p"), &Metadata::new());

        assert!(output.lines().any(|l| l == "├── node_modules [3 items]"));
        assert!(!output.contains("index.js"));
        assert!(!output.contains("b.js"));
    }

    #[test]
    fn test_descriptions_are_appended() {
        let fs = project();
        let m = metadata(
            r#"{"SRC": {".": "Sources", "Main.rs": "Entry point", "lib.rs": ""}, "readme.md": "Overview", "node_modules": "Dependencies"}"#,
        );
        let renderer = TreeRenderer::new(&fs, RenderConfig::compressing(["node_modules"]));
        let output = renderer.render(Path::new("/p"), &m);

        assert!(output.contains("├── node_modules [3 items] - Dependencies\n"));
        assert!(output.contains("├── src - Sources\n"));
        assert!(output.contains("│   └── main.rs - Entry point\n"));
        assert!(output.contains("│   ├── lib.rs\n"));
        assert!(output.contains("└── README.md - Overview\n"));
        assert!(output.contains("├── build.rs\n"));
    }

    #[test]
    fn test_unreadable_directory_gets_inline_marker() {
        let fs = project();
        fs.fail_read_dir("/p/src");
        let output = TreeRenderer::new(&fs, RenderConfig::default()).render(Path::new("/p"), &Metadata::new());

        assert!(output.contains("├── src\n│   [Error reading directory]\n"));
        assert!(output.contains("└── README.md\n"));
    }

    #[test]
    fn test_unreadable_root_renders_only_marker() {
        let fs = project();
        fs.fail_read_dir("/p");
        let output = TreeRenderer::new(&fs, RenderConfig::default()).render(Path::new("/p"), &Metadata::new());
        assert_eq!(output, "[Error reading directory]\n");
    }

    #[test]
    fn test_unreadable_compressed_directory_count_is_unknown() {
        let fs = project();
        fs.fail_read_dir("/p/node_modules");
        let output = TreeRenderer::new(&fs, RenderConfig::compressing(["node_modules"]))
            .render(Path::new("/p"), &Metadata::new());
        assert!(output.contains("├── node_modules [unknown items]\n"));
    }

    #[test]
    fn test_unstatable_entry_is_skipped_and_last_connector_moves() {
        let fs = project();
        fs.fail_stat("/p/README.md");
        let output = TreeRenderer::new(&fs, RenderConfig::default()).render(Path::new("/p"), &Metadata::new());

        assert!(!output.contains("README.md"));
        assert!(output.ends_with("└── build.rs\n"));
    }

    #[test]
    fn test_ascii_style_and_exclusions() {
        let fs = project();
        let config = RenderConfig {
            exclude: crate::names::NameSet::new(["node_modules"]),
            indent: IndentStyle::Ascii,
            ..Default::default()
        };
        let output = TreeRenderer::new(&fs, config).render(Path::new("/p"), &Metadata::new());

        let expected = "\
|-- src
|   |-- lib.rs
|   `-- main.rs
|-- build.rs
`-- README.md
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_write_to_file() {
        let fs = project();
        let renderer = TreeRenderer::new(&fs, RenderConfig::compressing(["node_modules", "src"]));
        renderer
            .write_to(Path::new("/p"), &Metadata::new(), Path::new("/out.txt"))
            .unwrap();

        assert_eq!(
            fs.contents("/out.txt").unwrap(),
            "├── node_modules [3 items]\n├── src [2 items]\n├── build.rs\n└── README.md\n"
        );
    }
}
