//! Git index file format
//!
//! The index (also called staging area or cache) stores information about the working tree.
//! It tracks which files should be included in the next commit.
//!
//! ## File Format (Versions 2 and 3)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 or 3 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - Each entry padded to 8-byte alignment
//!   - Contains metadata and path
//!
//! Extensions and checksum (not decoded):
//!   - Optional extension blocks, then the SHA-1 of all preceding bytes
//! ```
//!
//! Version 4 prefix-compresses paths and is rejected.

pub mod entry_flags;
pub mod index_entry;
pub mod index_header;

use crate::artifacts::errors::FormatError;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use bytes::Bytes;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// Index file format versions this decoder understands
pub const SUPPORTED_VERSIONS: [u32; 2] = [2, 3];

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Metadata, object ID and flags that precede every entry path
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Default upper bound on an entry path, in bytes
pub const MAX_PATH_SIZE: usize = 4095;

/// Tunables for the index decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDecodeOptions {
    /// Longest accepted path; longer ones fail with `FormatError::NameTooLong`
    pub max_path_len: usize,
}

impl Default for IndexDecodeOptions {
    fn default() -> Self {
        IndexDecodeOptions {
            max_path_len: MAX_PATH_SIZE,
        }
    }
}

/// A decoded index: header plus entries in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFile {
    header: IndexHeader,
    entries: Vec<IndexEntry>,
    /// Where the entry stream ended; extensions and the checksum follow
    trailer_offset: usize,
}

impl IndexFile {
    /// Decode the full contents of an index file
    ///
    /// Entries are returned exactly in file order: nothing is sorted, filtered or merged.
    pub fn decode(bytes: &[u8], options: &IndexDecodeOptions) -> Result<Self, FormatError> {
        let header = IndexHeader::decode(bytes)?;

        if !SUPPORTED_VERSIONS.contains(&header.version) {
            return Err(FormatError::UnsupportedVersion {
                version: header.version,
            });
        }

        // every entry needs at least one block, which bounds the preallocation
        let capacity = (header.entries_count as usize).min(bytes.len() / ENTRY_BLOCK);
        let mut entries = Vec::with_capacity(capacity);
        let mut offset = HEADER_SIZE;

        for position in 0..header.entries_count as usize {
            let (entry, span) =
                IndexEntry::decode_at(bytes, offset, position, header.version, options)?;
            entries.push(entry);
            offset += span;
        }

        tracing::debug!(
            version = header.version,
            entries = entries.len(),
            trailer_bytes = bytes.len() - offset,
            "decoded index"
        );

        Ok(IndexFile {
            header,
            entries,
            trailer_offset: offset,
        })
    }

    /// Header and entries re-encoded with the decoder's padding rule
    ///
    /// Extensions and the trailing checksum are not reproduced.
    pub fn encode(&self) -> Bytes {
        let mut bytes = self.header.encode().to_vec();
        for entry in &self.entries {
            bytes.extend_from_slice(&entry.encode());
        }

        Bytes::from(bytes)
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = IndexEntry> {
        self.entries.into_iter()
    }

    pub fn trailer_offset(&self) -> usize {
        self.trailer_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::entry_flags::{EntryFlags, NAME_LENGTH_UNKNOWN};
    use crate::artifacts::index::index_entry::EntryMetadata;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn entry(path: &[u8], seed: u8) -> IndexEntry {
        IndexEntry {
            metadata: EntryMetadata {
                mtime: seed as u32,
                mode: 0o100644,
                size: path.len() as u32,
                ..Default::default()
            },
            oid: ObjectId::from_raw([seed; 20]),
            flags: EntryFlags::from_raw(path.len().min(NAME_LENGTH_UNKNOWN as usize) as u16),
            extended_flags: None,
            path: Bytes::copy_from_slice(path),
        }
    }

    fn index_bytes(version: u32, entries: &[IndexEntry]) -> Vec<u8> {
        let mut bytes = IndexHeader::new(*SIGNATURE, version, entries.len() as u32)
            .encode()
            .to_vec();
        for entry in entries {
            bytes.extend_from_slice(&entry.encode());
        }
        bytes
    }

    #[test]
    fn keeps_file_order() {
        let entries = vec![entry(b"zeta", 1), entry(b"alpha", 2), entry(b"mid/dle", 3)];
        let bytes = index_bytes(2, &entries);

        let index = IndexFile::decode(&bytes, &IndexDecodeOptions::default()).unwrap();

        let paths: Vec<String> = index.entries().iter().map(|e| e.path_lossy()).collect();
        assert_eq!(paths, vec!["zeta", "alpha", "mid/dle"]);
        assert_eq!(index.trailer_offset(), bytes.len());
    }

    #[test]
    fn ignores_extensions_and_checksum() {
        let entries = vec![entry(b"a", 1)];
        let mut bytes = index_bytes(2, &entries);
        let trailer_offset = bytes.len();
        bytes.extend_from_slice(b"TREE\x00\x00\x00\x00");
        bytes.extend_from_slice(&[0xaa; 20]);

        let index = IndexFile::decode(&bytes, &IndexDecodeOptions::default()).unwrap();

        assert_eq!(index.entries().len(), 1);
        assert_eq!(index.trailer_offset(), trailer_offset);
    }

    #[test]
    fn empty_index() {
        let index =
            IndexFile::decode(&index_bytes(2, &[]), &IndexDecodeOptions::default()).unwrap();

        assert!(index.entries().is_empty());
        assert_eq!(index.header().signature(), "DIRC");
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(5)]
    fn rejects_unsupported_versions(#[case] version: u32) {
        let err = IndexFile::decode(&index_bytes(version, &[]), &IndexDecodeOptions::default())
            .unwrap_err();

        assert_eq!(err, FormatError::UnsupportedVersion { version });
    }

    #[test]
    fn long_path_is_found_by_scanning() {
        let long_path = vec![b'p'; 5000];
        let bytes = index_bytes(2, &[entry(&long_path, 1), entry(b"after", 2)]);
        let options = IndexDecodeOptions { max_path_len: 8192 };

        let index = IndexFile::decode(&bytes, &options).unwrap();

        assert_eq!(index.entries()[0].path.len(), 5000);
        assert_eq!(index.entries()[0].declared_name_len(), NAME_LENGTH_UNKNOWN);
        assert_eq!(index.entries()[1].path_lossy(), "after");
    }

    #[test]
    fn path_at_the_default_limit_is_accepted() {
        let path = vec![b'x'; MAX_PATH_SIZE];
        let bytes = index_bytes(2, &[entry(&path, 1)]);

        let index = IndexFile::decode(&bytes, &IndexDecodeOptions::default()).unwrap();

        assert_eq!(index.entries()[0].path.len(), MAX_PATH_SIZE);
    }

    #[test]
    fn path_over_the_limit_is_rejected() {
        let bytes = index_bytes(2, &[entry(b"ok", 1), entry(b"0123456789", 2)]);
        let options = IndexDecodeOptions { max_path_len: 8 };

        let err = IndexFile::decode(&bytes, &options).unwrap_err();

        assert_eq!(
            err,
            FormatError::NameTooLong {
                entry: 1,
                offset: HEADER_SIZE + 72,
                len: 10,
                max: 8
            }
        );
    }

    #[test]
    fn entry_count_beyond_buffer_is_truncated() {
        let mut bytes = index_bytes(2, &[entry(b"only", 1)]);
        bytes[11] = 2;

        let err = IndexFile::decode(&bytes, &IndexDecodeOptions::default()).unwrap_err();

        assert_eq!(
            err,
            FormatError::TruncatedEntry {
                entry: 1,
                offset: HEADER_SIZE + 72
            }
        );
    }

    #[test]
    fn fixed_region_cut_short_is_truncated() {
        let bytes = index_bytes(2, &[entry(b"file", 1)]);

        let err = IndexFile::decode(&bytes[..HEADER_SIZE + 30], &IndexDecodeOptions::default())
            .unwrap_err();

        assert_eq!(
            err,
            FormatError::TruncatedEntry {
                entry: 0,
                offset: HEADER_SIZE
            }
        );
    }

    #[test]
    fn huge_declared_count_does_not_preallocate() {
        let mut bytes = index_bytes(2, &[]);
        bytes[8..12].copy_from_slice(&u32::MAX.to_be_bytes());

        let err = IndexFile::decode(&bytes, &IndexDecodeOptions::default()).unwrap_err();

        assert!(matches!(err, FormatError::TruncatedEntry { entry: 0, .. }));
    }

    fn arb_entry() -> impl Strategy<Value = IndexEntry> {
        (
            proptest::collection::vec(1u8..=255, 1..300),
            any::<[u8; 20]>(),
            any::<(u32, u32, u32, u32)>(),
            0u16..4,
        )
            .prop_map(|(path, oid, (ctime, mtime, ino, size), stage)| {
                let len = path.len().min(NAME_LENGTH_UNKNOWN as usize) as u16;
                IndexEntry {
                    metadata: EntryMetadata {
                        ctime,
                        mtime,
                        ino,
                        size,
                        mode: 0o100755,
                        ..Default::default()
                    },
                    oid: ObjectId::from_raw(oid),
                    flags: EntryFlags::from_raw(len | (stage << 12)),
                    extended_flags: None,
                    path: Bytes::from(path),
                }
            })
    }

    proptest! {
        #[test]
        fn decode_matches_header_count_and_reencodes_exactly(
            entries in proptest::collection::vec(arb_entry(), 0..20)
        ) {
            let bytes = index_bytes(2, &entries);

            let index = IndexFile::decode(&bytes, &IndexDecodeOptions::default()).unwrap();

            prop_assert_eq!(index.entries().len(), index.header().entries_count as usize);
            prop_assert_eq!(index.entries(), &entries[..]);
            let encoded = index.encode();
            prop_assert_eq!(encoded.as_ref(), &bytes[..]);
        }
    }
}
