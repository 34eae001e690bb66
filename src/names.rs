//! Case-insensitive name handling
//!
//! Every place that matches a path segment against user-provided names goes
//! through this module: the scanner's exclusion list, the renderer's
//! compression list, and key lookup in the description metadata.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use glob::{MatchOptions, Pattern};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Fold a name into its case-insensitive form.
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Sort names alphabetically ignoring case.
///
/// Names that only differ by case fall back to byte order so sorting stays
/// deterministic. Each name is folded once.
pub fn sort_names(names: &mut [String]) {
    names.sort_by_cached_key(|name| (fold(name), name.clone()));
}

/// An insertion-ordered map from entry names to values.
///
/// Exact-name operations (`get`, `insert`, `contains_key`) behave like a
/// regular map. The `find*` family resolves a name case-insensitively,
/// preferring an exact match when one exists, and never changes the stored
/// casing of a key.
///
/// Entries are never removed, so both indexes hold stable positions into
/// `entries`. The folded index points at the first key inserted with that
/// folded form.
#[derive(Clone)]
pub struct NameMap<V> {
    entries: Vec<(String, V)>,
    exact: HashMap<String, usize>,
    folded: HashMap<String, usize>,
}

impl<V> NameMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            exact: HashMap::new(),
            folded: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.exact.get(name).copied()
    }

    fn position_ignore_case(&self, name: &str) -> Option<usize> {
        self.position(name)
            .or_else(|| self.folded.get(&fold(name)).copied())
    }

    fn push(&mut self, name: String, value: V) -> usize {
        let index = self.entries.len();
        self.folded.entry(fold(&name)).or_insert(index);
        self.exact.insert(name.clone(), index);
        self.entries.push((name, value));
        index
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Look up a name ignoring case, returning the stored key with its value.
    pub fn find(&self, name: &str) -> Option<(&str, &V)> {
        self.position_ignore_case(name)
            .map(|i| (self.entries[i].0.as_str(), &self.entries[i].1))
    }

    /// Resolve `name` ignoring case, inserting `make()` under `name` when no
    /// key matches. The flag is `true` when a new entry was created.
    pub fn find_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> V) -> (&mut V, bool) {
        let (index, inserted) = match self.position_ignore_case(name) {
            Some(index) => (index, false),
            None => (self.push(name.to_string(), make()), true),
        };
        (&mut self.entries[index].1, inserted)
    }

    /// Insert under the exact name, replacing and returning any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.push(name, value);
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for NameMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for NameMap<V> {}

impl<V: fmt::Debug> fmt::Debug for NameMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for NameMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V> IntoIterator for NameMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for NameMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct NameMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for NameMapVisitor<V> {
    type Value = NameMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object keyed by entry name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = NameMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for NameMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NameMapVisitor(PhantomData))
    }
}

/// A set of entry names matched case-insensitively.
///
/// Entries containing glob metacharacters (`*`, `?`, `[`) are treated as
/// patterns, everything else as a literal name.
#[derive(Debug, Clone, Default)]
pub struct NameSet {
    literals: Vec<String>,
    patterns: Vec<Pattern>,
}

impl NameSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.add(name.as_ref());
        }
        set
    }

    pub fn add(&mut self, name: &str) {
        if name.contains(['*', '?', '[']) {
            if let Ok(pattern) = Pattern::new(name) {
                self.patterns.push(pattern);
                return;
            }
        }
        self.literals.push(fold(name));
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.patterns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        if !self.literals.is_empty() {
            let folded = fold(name);
            if self.literals.iter().any(|literal| *literal == folded) {
                return true;
            }
        }
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(name, MATCH_OPTIONS))
    }
}
