//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are kept as the 20 raw bytes found on disk (index entries, tree entries).
//! Hex rendering only happens when an ID is displayed or turned into a store path.
//!
//! ## Storage
//!
//! Loose objects live at `.git/objects/<first-2-hex>/<remaining-38-hex>`

use crate::artifacts::objects::{OBJECT_ID_HEX_LENGTH, OBJECT_ID_LENGTH};
use std::path::PathBuf;

/// Git object identifier in raw form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LENGTH]);

impl ObjectId {
    pub fn from_raw(raw: [u8; OBJECT_ID_LENGTH]) -> Self {
        Self(raw)
    }

    /// Copy an object ID out of a raw 20-byte slice
    ///
    /// Returns `None` when the slice is not exactly 20 bytes long.
    pub fn from_slice(raw: &[u8]) -> Option<Self> {
        let raw: [u8; OBJECT_ID_LENGTH] = raw.try_into().ok()?;
        Some(Self(raw))
    }

    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(id: &str) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_HEX_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }

        let mut raw = [0u8; OBJECT_ID_LENGTH];
        hex::decode_to_slice(id, &mut raw)
            .map_err(|_| anyhow::anyhow!("Invalid object ID characters: {}", id))?;

        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to the loose-object path relative to `.git/objects`
    ///
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 hex characters (standard Git abbreviation)
    pub fn to_short_oid(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(7);
        hex
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
