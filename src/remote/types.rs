//! Wire types for the Drive v3 `files.list` endpoint.

use crate::model::RemoteEntry;

pub const FILES_PATH: &str = "/drive/v3/files";
pub const LIST_FIELDS: &str = "nextPageToken,files(id,name,mimeType)";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

impl From<DriveFile> for RemoteEntry {
    fn from(f: DriveFile) -> Self {
        RemoteEntry::new(f.id, f.name, f.mime_type)
    }
}

impl From<&RemoteEntry> for DriveFile {
    fn from(e: &RemoteEntry) -> Self {
        DriveFile {
            id: e.id.clone(),
            name: e.name.clone(),
            mime_type: e.content_type.clone(),
        }
    }
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Query matching the non-trashed direct children of `container_id`.
pub fn children_query(container_id: &str) -> String {
    format!(
        "'{}' in parents and trashed = false",
        container_id.replace('\\', "\\\\").replace('\'', "\\'")
    )
}

/// Inverse of [`children_query`]; `None` when `q` is not a children query.
pub fn parent_from_query(q: &str) -> Option<String> {
    let rest = q.trim().strip_prefix('\'')?;
    let mut id = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => id.push(chars.next()?),
            '\'' => {
                let tail = chars.as_str().trim_start();
                return tail.starts_with("in parents").then_some(id);
            }
            c => id.push(c),
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
