//! Git index (staging area)
//!
//! Reads `.git/index` from disk and hands the bytes to the index decoder. The file is read
//! in one go under a shared lock, so a concurrent `git add` cannot be observed half-written.

use crate::artifacts::index::{IndexDecodeOptions, IndexFile};
use anyhow::Context;
use std::io::Read;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    options: IndexDecodeOptions,
}

impl Index {
    pub fn new(path: Box<Path>, options: IndexDecodeOptions) -> Self {
        Index { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .context(format!("Unable to open index file {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut bytes = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut bytes)
            .context(format!("Unable to read index file {}", self.path.display()))?;

        Ok(bytes)
    }

    /// Read and decode the index file
    pub fn load(&self) -> anyhow::Result<IndexFile> {
        let bytes = self.read_bytes()?;

        IndexFile::decode(&bytes, &self.options)
            .context(format!("Unable to decode index file {}", self.path.display()))
    }
}
