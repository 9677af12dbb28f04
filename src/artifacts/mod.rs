//! Git data structures and decoders
//!
//! This module contains the byte-level core:
//!
//! - `core`: Shared utilities (pager wrapper)
//! - `errors`: Decoder error taxonomy
//! - `index`: Index file decoder
//! - `objects`: Loose object envelope and per-kind content decoders
//!
//! The decoders never touch the filesystem; each works on a buffer it is handed.

pub mod core;
pub mod errors;
pub mod index;
pub mod objects;
