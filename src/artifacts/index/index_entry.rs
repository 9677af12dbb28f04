//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path
//! - Content hash (object ID)
//! - File metadata (mode, size, timestamps)
//!
//! ## Entry Format
//!
//! ```text
//! ctime-s ctime-ns mtime-s mtime-ns dev ino mode uid gid size   (ten u32, 40 bytes)
//! object id                                                     (20 raw bytes)
//! flags                                                         (u16)
//! extended flags                                                (u16, v3 + EXTENDED only)
//! path \0 padding                                               (span rounded up to 8)
//! ```
//!
//! The 12-bit length in `flags` saturates at 4095, so the path always ends at the first
//! null byte after the fixed fields, whatever the length field says.

use crate::artifacts::errors::FormatError;
use crate::artifacts::index::entry_flags::{EntryFlags, ExtendedFlags, NAME_LENGTH_UNKNOWN};
use crate::artifacts::index::{ENTRY_BLOCK, ENTRY_FIXED_SIZE, IndexDecodeOptions};
use crate::artifacts::objects::object_id::ObjectId;
use byteorder::ByteOrder;
use bytes::Bytes;

/// Offset of the object ID inside an entry
const OID_OFFSET: usize = 40;

/// Offset of the flags word inside an entry
const FLAGS_OFFSET: usize = 60;

/// Index entry for one tracked path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub metadata: EntryMetadata,
    pub oid: ObjectId,
    pub flags: EntryFlags,
    pub extended_flags: Option<ExtendedFlags>,
    /// Raw path bytes relative to the repository root, without the terminator
    pub path: Bytes,
}

/// File metadata stored in index entries, as the 32-bit values found on disk
///
/// ## Timestamps
///
/// - `ctime`: File status change time (inode modification)
/// - `mtime`: File content modification time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    /// File mode (object type and permissions), usually rendered in octal
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
}

impl EntryMetadata {
    fn read(fields: &[u8]) -> Self {
        let field = |i: usize| byteorder::NetworkEndian::read_u32(&fields[i * 4..i * 4 + 4]);

        EntryMetadata {
            ctime: field(0),
            ctime_nsec: field(1),
            mtime: field(2),
            mtime_nsec: field(3),
            dev: field(4),
            ino: field(5),
            mode: field(6),
            uid: field(7),
            gid: field(8),
            size: field(9),
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        for field in [
            self.ctime,
            self.ctime_nsec,
            self.mtime,
            self.mtime_nsec,
            self.dev,
            self.ino,
            self.mode,
            self.uid,
            self.gid,
            self.size,
        ] {
            out.extend_from_slice(&field.to_be_bytes());
        }
    }

    pub fn mode_octal(&self) -> String {
        format!("{:o}", self.mode)
    }

    pub fn ctime_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.ctime as i64, self.ctime_nsec)
    }

    pub fn mtime_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.mtime as i64, self.mtime_nsec)
    }
}

impl IndexEntry {
    /// Decode the entry starting at `start`
    ///
    /// Returns the entry and the number of bytes it occupies, padding included.
    pub(crate) fn decode_at(
        bytes: &[u8],
        start: usize,
        position: usize,
        version: u32,
        options: &IndexDecodeOptions,
    ) -> Result<(Self, usize), FormatError> {
        let truncated = || FormatError::TruncatedEntry {
            entry: position,
            offset: start,
        };

        let fixed = bytes
            .get(start..start + ENTRY_FIXED_SIZE)
            .ok_or_else(truncated)?;
        let metadata = EntryMetadata::read(&fixed[..OID_OFFSET]);
        let oid = ObjectId::from_slice(&fixed[OID_OFFSET..FLAGS_OFFSET]).ok_or_else(truncated)?;
        let flags = EntryFlags::from_raw(byteorder::NetworkEndian::read_u16(
            &fixed[FLAGS_OFFSET..ENTRY_FIXED_SIZE],
        ));

        let mut path_start = start + ENTRY_FIXED_SIZE;
        let extended_flags = if version >= 3 && flags.contains(EntryFlags::EXTENDED) {
            let raw = bytes
                .get(path_start..path_start + 2)
                .ok_or_else(truncated)?;
            path_start += 2;
            Some(ExtendedFlags::from_raw(byteorder::NetworkEndian::read_u16(
                raw,
            )))
        } else {
            None
        };

        let path_len = bytes[path_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(truncated)?;

        if path_len > options.max_path_len {
            return Err(FormatError::NameTooLong {
                entry: position,
                offset: start,
                len: path_len,
                max: options.max_path_len,
            });
        }

        let declared = flags.declared_name_len();
        if declared < NAME_LENGTH_UNKNOWN && declared as usize != path_len {
            tracing::warn!(
                entry = position,
                offset = start,
                declared,
                scanned = path_len,
                "declared name length disagrees with terminator position"
            );
        }

        let terminator = path_start + path_len;
        let span = padded_len(terminator + 1 - start);
        if start + span > bytes.len() {
            return Err(truncated());
        }

        let entry = IndexEntry {
            metadata,
            oid,
            flags,
            extended_flags,
            path: Bytes::copy_from_slice(&bytes[path_start..terminator]),
        };

        tracing::trace!(
            entry = position,
            offset = start,
            span,
            path = %entry.path_lossy(),
            "decoded index entry"
        );

        Ok((entry, span))
    }

    /// Encode with the same layout and padding rule the decoder expects
    pub fn encode(&self) -> Bytes {
        let mut entry_bytes = Vec::with_capacity(padded_len(ENTRY_FIXED_SIZE + self.path.len() + 1));

        self.metadata.write(&mut entry_bytes);
        entry_bytes.extend_from_slice(self.oid.as_bytes());
        entry_bytes.extend_from_slice(&self.flags.bits().to_be_bytes());
        if let Some(extended_flags) = self.extended_flags {
            entry_bytes.extend_from_slice(&extended_flags.bits().to_be_bytes());
        }
        entry_bytes.extend_from_slice(&self.path);

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Bytes::from(entry_bytes)
    }

    pub fn path_lossy(&self) -> String {
        String::from_utf8_lossy(&self.path).into_owned()
    }

    pub fn declared_name_len(&self) -> u16 {
        self.flags.declared_name_len()
    }

    pub fn stage(&self) -> u8 {
        self.flags.stage()
    }
}

/// Round an entry length up to the next multiple of `ENTRY_BLOCK`
pub fn padded_len(len: usize) -> usize {
    len.div_ceil(ENTRY_BLOCK) * ENTRY_BLOCK
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use sha1::Digest;

    #[fixture]
    fn oid() -> ObjectId {
        let mut hasher = sha1::Sha1::new();
        hasher.update("test data");
        ObjectId::from_slice(&hasher.finalize()).unwrap()
    }

    #[fixture]
    fn metadata() -> EntryMetadata {
        EntryMetadata {
            ctime: 1_700_000_000,
            ctime_nsec: 12,
            mtime: 1_700_000_100,
            mtime_nsec: 34,
            dev: 2049,
            ino: 131_090,
            mode: 0o100644,
            uid: 1000,
            gid: 1000,
            size: 42,
        }
    }

    fn entry(metadata: EntryMetadata, oid: ObjectId, path: &str) -> IndexEntry {
        let len = path.len().min(NAME_LENGTH_UNKNOWN as usize) as u16;
        IndexEntry {
            metadata,
            oid,
            flags: EntryFlags::from_raw(len),
            extended_flags: None,
            path: Bytes::copy_from_slice(path.as_bytes()),
        }
    }

    #[rstest]
    #[case(62, 64)]
    #[case(63, 64)]
    #[case(64, 64)]
    #[case(65, 72)]
    #[case(71, 72)]
    fn pads_to_eight_bytes(#[case] len: usize, #[case] expected: usize) {
        assert_eq!(padded_len(len), expected);
    }

    #[rstest]
    #[case("a", 64)]
    #[case("ab", 72)]
    #[case("abc", 72)]
    #[case("src/lib.rs", 80)]
    fn encoded_span(metadata: EntryMetadata, oid: ObjectId, #[case] path: &str, #[case] span: usize) {
        let encoded = entry(metadata, oid, path).encode();

        assert_eq!(encoded.len(), span);
        assert_eq!(encoded[ENTRY_FIXED_SIZE + path.len()], 0);
    }

    #[rstest]
    fn decodes_every_field(metadata: EntryMetadata, oid: ObjectId) {
        let bytes = entry(metadata, oid, "src/main.rs").encode();

        let (decoded, span) =
            IndexEntry::decode_at(&bytes, 0, 0, 2, &IndexDecodeOptions::default()).unwrap();

        assert_eq!(span, bytes.len());
        assert_eq!(decoded.metadata, metadata);
        assert_eq!(decoded.metadata.mode_octal(), "100644");
        assert_eq!(decoded.oid, oid);
        assert_eq!(decoded.path.as_ref(), b"src/main.rs");
        assert_eq!(decoded.declared_name_len(), 11);
        assert_eq!(decoded.stage(), 0);
        assert_eq!(
            decoded.metadata.mtime_datetime().unwrap().timestamp_subsec_nanos(),
            34
        );
    }

    #[rstest]
    fn terminator_scan_beats_declared_length(metadata: EntryMetadata, oid: ObjectId) {
        let mut bad = entry(metadata, oid, "hello.txt");
        bad.flags = EntryFlags::from_raw(3);

        let (decoded, _) =
            IndexEntry::decode_at(&bad.encode(), 0, 0, 2, &IndexDecodeOptions::default())
                .unwrap();

        assert_eq!(decoded.path_lossy(), "hello.txt");
    }

    #[rstest]
    fn extended_flags_only_in_version_three(metadata: EntryMetadata, oid: ObjectId) {
        let mut extended = entry(metadata, oid, "sparse/file");
        extended.flags |= EntryFlags::EXTENDED;
        extended.extended_flags = Some(ExtendedFlags::SKIP_WORKTREE);
        let bytes = extended.encode();

        let (decoded, span) =
            IndexEntry::decode_at(&bytes, 0, 0, 3, &IndexDecodeOptions::default()).unwrap();

        assert_eq!(span, bytes.len());
        assert_eq!(decoded, extended);
        assert_eq!(decoded.encode(), bytes);
    }

    #[rstest]
    fn encodes_fields_in_network_order(metadata: EntryMetadata, oid: ObjectId) {
        let mut staged = entry(metadata, oid, "ab");
        staged.flags |= EntryFlags::EXTENDED;
        staged.extended_flags = Some(ExtendedFlags::INTENT_TO_ADD);

        let bytes = staged.encode();

        assert_eq!(&bytes[0..4], &1_700_000_000u32.to_be_bytes());
        assert_eq!(&bytes[24..28], &0o100644u32.to_be_bytes());
        assert_eq!(&bytes[36..40], &42u32.to_be_bytes());
        assert_eq!(&bytes[OID_OFFSET..FLAGS_OFFSET], oid.as_bytes());
        assert_eq!(&bytes[FLAGS_OFFSET..ENTRY_FIXED_SIZE], &[0x40u8, 0x02]);
        assert_eq!(&bytes[ENTRY_FIXED_SIZE..ENTRY_FIXED_SIZE + 2], &[0x20u8, 0x00]);
        assert_eq!(&bytes[ENTRY_FIXED_SIZE + 2..], b"ab\0\0\0\0\0\0");
    }

    #[rstest]
    fn missing_terminator_is_truncated(metadata: EntryMetadata, oid: ObjectId) {
        let bytes = entry(metadata, oid, "abc").encode();
        let cut = &bytes[..ENTRY_FIXED_SIZE + 3];

        let err = IndexEntry::decode_at(cut, 0, 0, 2, &IndexDecodeOptions::default()).unwrap_err();

        assert_eq!(err, FormatError::TruncatedEntry { entry: 0, offset: 0 });
    }

    #[rstest]
    fn missing_padding_is_truncated(metadata: EntryMetadata, oid: ObjectId) {
        let bytes = entry(metadata, oid, "abc").encode();
        let cut = &bytes[..ENTRY_FIXED_SIZE + 4];

        let err = IndexEntry::decode_at(cut, 0, 0, 2, &IndexDecodeOptions::default()).unwrap_err();

        assert_eq!(err, FormatError::TruncatedEntry { entry: 0, offset: 0 });
    }
}
