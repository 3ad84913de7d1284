//! In-memory drive used by tests and by the development listing server.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

use super::{ListingClient, RemoteError};
use crate::model::RemoteEntry;

pub const ROOT_ID: &str = "root";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Unavailable,
    Forbidden,
}

impl FailureKind {
    fn to_error(self, container_id: &str) -> RemoteError {
        match self {
            FailureKind::Unavailable => {
                RemoteError::Transient(format!("listing {} unavailable", container_id))
            }
            FailureKind::Forbidden => {
                RemoteError::Auth(format!("listing {} forbidden", container_id))
            }
        }
    }
}

/// Nested description of a drive. A node with `children` (even empty) is a
/// folder; anything else is a file.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeFixture {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeFixture>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail: Option<FailureKind>,
}

impl TreeFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read fixture {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse fixture {}", path.display()))
    }
}

pub struct MemoryDrive {
    entries: HashMap<String, RemoteEntry>,
    children: HashMap<String, Vec<String>>,
    failures: HashMap<String, FailureKind>,
    calls: Mutex<HashMap<String, usize>>,
    next_id: usize,
}

impl Default for MemoryDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDrive {
    pub fn new() -> Self {
        let mut children = HashMap::new();
        children.insert(ROOT_ID.to_string(), Vec::new());
        Self {
            entries: HashMap::new(),
            children,
            failures: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
            next_id: 0,
        }
    }

    pub fn from_fixture(fixture: &TreeFixture) -> Self {
        let mut drive = Self::new();
        if let Some(kind) = fixture.fail {
            drive.fail_listing(ROOT_ID, kind);
        }
        let mut stack: Vec<(String, &TreeFixture)> = fixture
            .children
            .iter()
            .flatten()
            .rev()
            .map(|c| (ROOT_ID.to_string(), c))
            .collect();

        while let Some((parent, node)) = stack.pop() {
            let id = match (&node.children, &node.mime_type) {
                (Some(_), _) => drive.add_container(&parent, &node.name),
                (None, Some(mime)) => drive.add_leaf(&parent, &node.name, mime),
                (None, None) => drive.add_leaf(&parent, &node.name, "application/octet-stream"),
            };
            if let Some(kind) = node.fail {
                drive.fail_listing(&id, kind);
            }
            for child in node.children.iter().flatten().rev() {
                stack.push((id.clone(), child));
            }
        }
        drive
    }

    pub fn add_container(&mut self, parent_id: &str, name: &str) -> String {
        let id = self.mint_id();
        let id = self.insert(parent_id, RemoteEntry::container(id, name));
        self.children.insert(id.clone(), Vec::new());
        id
    }

    pub fn add_leaf(&mut self, parent_id: &str, name: &str, content_type: &str) -> String {
        let id = self.mint_id();
        self.insert(parent_id, RemoteEntry::new(id, name, content_type))
    }

    /// Makes every listing of `container_id` fail with `kind`.
    pub fn fail_listing(&mut self, container_id: &str, kind: FailureKind) {
        self.failures.insert(container_id.to_string(), kind);
    }

    /// Children of `container_id` without counting a call or applying
    /// injected failures.
    pub fn peek_children(&self, container_id: &str) -> Option<Vec<RemoteEntry>> {
        let ids = self.children.get(container_id)?;
        Some(
            ids.iter()
                .filter_map(|id| self.entries.get(id))
                .cloned()
                .collect(),
        )
    }

    pub fn calls_for(&self, container_id: &str) -> usize {
        self.calls
            .lock()
            .map(|c| c.get(container_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().map(|c| c.values().sum()).unwrap_or(0)
    }

    pub fn call_counts(&self) -> HashMap<String, usize> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn mint_id(&mut self) -> String {
        self.next_id += 1;
        format!("m{}", self.next_id)
    }

    fn insert(&mut self, parent_id: &str, entry: RemoteEntry) -> String {
        let id = entry.id.clone();
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(id.clone());
        self.entries.insert(id.clone(), entry);
        id
    }
}

impl ListingClient for MemoryDrive {
    fn list_children(&self, container_id: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(container_id.to_string()).or_default() += 1;
        }
        if let Some(kind) = self.failures.get(container_id) {
            return Err(kind.to_error(container_id));
        }
        self.peek_children(container_id).ok_or_else(|| {
            RemoteError::Transient(format!("no such container: {}", container_id))
        })
    }
}
