use std::collections::BTreeMap;

use crate::model::{RemoteEntry, Snapshot};

/// Canonical virtual path to remote metadata for every materialized node.
/// Only ever grows during a session.
#[derive(Debug, Default)]
pub struct DirectoryIndex {
    entries: BTreeMap<String, RemoteEntry>,
}

impl DirectoryIndex {
    pub fn get(&self, path: &str) -> Option<&RemoteEntry> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemoteEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(super) fn insert(&mut self, path: String, entry: RemoteEntry) {
        let prev = self.entries.insert(path, entry);
        assert!(prev.is_none(), "directory index key registered twice");
    }

    /// Leaf entries strictly below `chosen`, keyed relative to it.
    pub fn snapshot_under(&self, chosen: &str) -> Snapshot {
        let prefix = format!("{}/", chosen);
        self.entries
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .filter(|(_, entry)| !entry.is_container())
            .map(|(path, entry)| (path[chosen.len()..].to_string(), entry.clone()))
            .collect()
    }
}
