mod entry;
mod selection;

pub use self::entry::{EntryKind, FOLDER_CONTENT_TYPE, RemoteEntry};
pub use self::selection::{Selection, Snapshot};
