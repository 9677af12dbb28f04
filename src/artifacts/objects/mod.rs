//! Git object types and decoders
//!
//! Git stores all content as objects identified by SHA-1 hashes. There are four main types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//! - **Tag**: Annotated reference to another object
//!
//! Decoding happens in two steps. `envelope` splits the decompressed
//! `<type> <size>\0<content>` payload, then `object::ParsedObject` hands the content to the
//! decoder for that kind.

pub mod blob;
pub mod commit;
pub mod envelope;
pub mod header_record;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_LENGTH: usize = 20;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_HEX_LENGTH: usize = 40;
