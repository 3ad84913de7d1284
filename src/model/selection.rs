use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::RemoteEntry;

/// Relative path (always starting with `/`) to leaf metadata, for every leaf
/// under a chosen directory.
pub type Snapshot = BTreeMap<String, RemoteEntry>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Selection {
    pub chosen_path: String,
    pub selected_at: String,
    pub files: Snapshot,
}

impl Selection {
    pub fn new(chosen_path: String, files: Snapshot) -> Self {
        Self {
            chosen_path,
            selected_at: now_ts(),
            files,
        }
    }
}

fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
