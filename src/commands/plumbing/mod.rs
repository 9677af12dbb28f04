//! Plumbing commands (low-level Git operations)
//!
//! Plumbing commands provide direct access to Git's internal data structures.
//!
//! ## Commands
//!
//! - `cat-file`: Print the content, kind or size of an object
//! - `ls-files`: Dump the decoded index
//! - `ls-tree`: List the entries of a tree object

pub mod cat_file;
pub mod ls_files;
pub mod ls_tree;
