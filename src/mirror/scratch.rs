//! On-disk scratch copy of the mirror, removed when the session ends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::EntryKind;

pub struct ScratchMirror {
    dir: tempfile::TempDir,
}

impl ScratchMirror {
    pub fn create_in(parent: &Path) -> Result<Self> {
        fs::create_dir_all(parent)
            .with_context(|| format!("create scratch parent {}", parent.display()))?;
        let dir = tempfile::Builder::new()
            .prefix("drivepick-")
            .tempdir_in(parent)
            .with_context(|| format!("create scratch dir in {}", parent.display()))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Host path for a canonical virtual path (`~` maps to the scratch root).
    pub fn host_path(&self, virtual_path: &str) -> PathBuf {
        let mut out = self.dir.path().to_path_buf();
        for component in virtual_path.split('/').skip(1) {
            out.push(component);
        }
        out
    }

    pub fn materialize(&self, virtual_path: &str, kind: EntryKind) -> io::Result<()> {
        let target = self.host_path(virtual_path);
        match kind {
            EntryKind::Container => fs::create_dir_all(&target),
            EntryKind::Leaf => {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::File::create(&target).map(|_| ())
            }
        }
    }

    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}
