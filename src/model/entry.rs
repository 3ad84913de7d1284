use serde::{Deserialize, Serialize};

/// Content type Drive assigns to folders.
pub const FOLDER_CONTENT_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Container,
    Leaf,
}

impl EntryKind {
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type == FOLDER_CONTENT_TYPE {
            EntryKind::Container
        } else {
            EntryKind::Leaf
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, EntryKind::Container)
    }
}

/// One object as reported by the remote listing API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    pub content_type: String,
}

impl RemoteEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::from_content_type(&content_type),
            content_type,
        }
    }

    pub fn container(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FOLDER_CONTENT_TYPE)
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}
