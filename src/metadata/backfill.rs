//! Placeholder backfill for undescribed paths

use tracing::debug;

use crate::names::NameMap;
use crate::tree::RelativePath;

use super::{Metadata, MetadataEntry, SELF_KEY};

/// What a [`backfill`] pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Placeholders inserted for paths that had no entry.
    pub inserted: usize,
    /// File descriptions turned into directory groups because a path now
    /// runs through them.
    pub converted: usize,
}

impl BackfillReport {
    pub fn changed(&self) -> bool {
        self.inserted > 0 || self.converted > 0
    }
}

/// Make sure every path has an entry, inserting `placeholder` where none exists.
///
/// Existing values are never replaced. Segments are matched ignoring case and
/// new keys keep the casing given in `paths`. When a path needs to descend
/// through a segment that currently holds a description string, that string
/// moves to the `"."` key of a new group so it stays attached to the
/// directory.
pub fn backfill(metadata: &mut Metadata, paths: &[RelativePath], placeholder: &str) -> BackfillReport {
    let mut report = BackfillReport::default();
    for path in paths {
        fill(metadata.entries_mut(), path.segments(), placeholder, &mut report);
    }
    debug!(
        inserted = report.inserted,
        converted = report.converted,
        "backfill finished"
    );
    report
}

fn fill(
    entries: &mut NameMap<MetadataEntry>,
    segments: &[String],
    placeholder: &str,
    report: &mut BackfillReport,
) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        let (_, inserted) = entries.find_or_insert_with(head, || MetadataEntry::description(placeholder));
        if inserted {
            report.inserted += 1;
        }
        return;
    }

    let (entry, _) = entries.find_or_insert_with(head, || MetadataEntry::Group(NameMap::new()));
    if let MetadataEntry::Description(text) = &mut *entry {
        let former = std::mem::take(text);
        let mut group = NameMap::new();
        if former.is_empty() {
            debug!("dropped empty description of {head} while converting it into a directory group");
        } else {
            group.insert(SELF_KEY, MetadataEntry::Description(former));
        }
        *entry = MetadataEntry::Group(group);
        report.converted += 1;
        debug!("converted description of {head} into a directory group");
    }
    if let MetadataEntry::Group(children) = entry {
        fill(children, rest, placeholder, report);
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::metadata::DEFAULT_PLACEHOLDER;

    /// Log sink shared between a test subscriber and the assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn paths(list: &[&str]) -> Vec<RelativePath> {
        list.iter().map(|p| RelativePath::parse(p)).collect()
    }

    fn metadata(json: &str) -> Metadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_backfill_empty_metadata() {
        let mut m = Metadata::new();
        let report = backfill(&mut m, &paths(&["a/x.txt", "b.txt"]), DEFAULT_PLACEHOLDER);

        assert_eq!(
            m,
            metadata(r#"{"a": {"x.txt": "No description available"}, "b.txt": "No description available"}"#)
        );
        assert_eq!(report, BackfillReport { inserted: 2, converted: 0 });
    }

    #[test]
    fn test_existing_values_are_kept() {
        let mut m = metadata(r#"{"a": {"x.txt": "Hand written"}, "b.txt": {"odd": "group"}, "c.txt": ""}"#);
        let before = m.clone();
        let report = backfill(&mut m, &paths(&["a/x.txt", "b.txt", "c.txt"]), "P");

        assert_eq!(m, before);
        assert!(!report.changed());
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let mut m = metadata(r#"{"docs": {"guide.md": "Guide"}}"#);
        let list = paths(&["docs/guide.md", "docs/api.md", "src/lib.rs", "Cargo.toml"]);

        let first = backfill(&mut m, &list, "P");
        let snapshot = m.clone();
        let second = backfill(&mut m, &list, "P");

        assert_eq!(first.inserted, 3);
        assert!(!second.changed());
        assert_eq!(m, snapshot);
    }

    #[test]
    fn test_keys_match_ignoring_case() {
        let mut m = metadata(r#"{"Src": {"Main.RS": "Entry"}}"#);
        let report = backfill(&mut m, &paths(&["src/main.rs", "src/Util.rs"]), "P");

        assert_eq!(m, metadata(r#"{"Src": {"Main.RS": "Entry", "Util.rs": "P"}}"#));
        assert_eq!(report.inserted, 1);
    }

    #[test]
    fn test_description_becomes_group_when_path_descends() {
        let mut m = metadata(r#"{"tools": "Helper scripts"}"#);
        let report = backfill(&mut m, &paths(&["tools/run.sh"]), "P");

        assert_eq!(m, metadata(r#"{"tools": {".": "Helper scripts", "run.sh": "P"}}"#));
        assert_eq!(report, BackfillReport { inserted: 1, converted: 1 });
        assert_eq!(m.describe(&["tools"]), Some("Helper scripts"));
    }

    #[test]
    fn test_empty_description_converts_without_self_key() {
        let mut m = metadata(r#"{"tools": ""}"#);
        backfill(&mut m, &paths(&["tools/run.sh"]), "P");
        assert_eq!(m, metadata(r#"{"tools": {"run.sh": "P"}}"#));
    }

    #[test]
    fn test_dropping_empty_description_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut m = metadata(r#"{"tools": "", "docs": "Guides"}"#);
        let report = tracing::subscriber::with_default(subscriber, || {
            backfill(&mut m, &paths(&["tools/run.sh", "docs/intro.md"]), "P")
        });

        assert_eq!(report.converted, 2);
        let text = logs.text();
        assert!(text.contains("dropped empty description of tools"), "logs: {text}");
        assert!(!text.contains("dropped empty description of docs"), "logs: {text}");
        assert!(text.contains("converted description of docs"), "logs: {text}");
    }

    #[test]
    fn test_large_directory_backfill() {
        let list: Vec<RelativePath> = (0..40_000)
            .map(|i| RelativePath::new(["big".to_string(), format!("File{i}.txt")]))
            .collect();
        let mut m = Metadata::new();

        let first = backfill(&mut m, &list, "P");
        assert_eq!(first.inserted, 40_000);
        let second = backfill(&mut m, &list, "P");
        assert!(!second.changed());
        assert_eq!(m.describe(&["BIG", "file39999.TXT"]), Some("P"));
    }

    #[test]
    fn test_null_entries_are_filled() {
        let mut m = metadata(r#"{"a.txt": null}"#);
        let report = backfill(&mut m, &paths(&["a.txt"]), "P");
        assert_eq!(m.describe(&["a.txt"]), Some("P"));
        assert_eq!(report.inserted, 1);
    }

    #[test]
    fn test_empty_paths_are_ignored() {
        let mut m = Metadata::new();
        let report = backfill(&mut m, &[RelativePath::parse("")], "P");
        assert!(m.is_empty());
        assert!(!report.changed());
    }
}
