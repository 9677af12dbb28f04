//! Command implementations
//!
//! - `plumbing`: Low-level views of a single file or object (ls-files, cat-file, ls-tree)
//! - `porcelain`: Whole-store reports built from the plumbing decoders (inspect)

pub mod plumbing;
pub mod porcelain;
