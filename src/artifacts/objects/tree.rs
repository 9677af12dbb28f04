//! Git tree object
//!
//! Trees represent one directory snapshot. The content is a packed run of entries with
//! no separators between them:
//!
//! ```text
//! <mode-ascii> <name>\0<20-byte-raw-sha1>
//! ```
//!
//! Entries are returned in on-disk order. Only the tree itself is decoded; following entry
//! IDs into subtrees is left to the caller.

use crate::artifacts::errors::FormatError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectKind;
use bytes::Bytes;
use derive_new::new;

/// Mode of a subdirectory entry
pub const TREE_MODE: &str = "40000";

/// Mode of a submodule (gitlink) entry
pub const GITLINK_MODE: &str = "160000";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    /// ASCII octal digits exactly as stored, e.g. `100644`
    pub mode: String,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Kind of object the entry points at, derived from its mode
    pub fn kind(&self) -> ObjectKind {
        match self.mode.trim_start_matches('0') {
            TREE_MODE => ObjectKind::Tree,
            GITLINK_MODE => ObjectKind::Commit,
            _ => ObjectKind::Blob,
        }
    }

    pub fn is_tree(&self) -> bool {
        self.kind() == ObjectKind::Tree
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `ls-tree`-style listing, one entry per line
    pub fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode,
                    entry.kind(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Unpackable for Tree {
    fn deserialize(content: Bytes) -> Result<Self, FormatError> {
        let mut entries = Vec::new();
        let mut offset = 0;

        while offset < content.len() {
            let truncated = FormatError::TruncatedTreeEntry { offset };
            let rest = &content[offset..];

            let space = rest
                .iter()
                .position(|&b| b == b' ')
                .ok_or(truncated.clone())?;
            let name_end = rest[space + 1..]
                .iter()
                .position(|&b| b == 0)
                .map(|pos| space + 1 + pos)
                .ok_or(truncated.clone())?;
            let oid_bytes = rest
                .get(name_end + 1..name_end + 1 + OBJECT_ID_LENGTH)
                .ok_or(truncated.clone())?;

            let mode = String::from_utf8_lossy(&rest[..space]).into_owned();
            let name = String::from_utf8_lossy(&rest[space + 1..name_end]).into_owned();
            let oid = ObjectId::from_slice(oid_bytes).ok_or(truncated)?;

            tracing::trace!(offset, %mode, %name, "decoded tree entry");
            entries.push(TreeEntry::new(mode, name, oid));

            offset += name_end + 1 + OBJECT_ID_LENGTH;
        }

        Ok(Tree { entries })
    }
}
