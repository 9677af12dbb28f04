//! Repository areas read by the inspector
//!
//! - `config`: Settings gathered from flags and the environment
//! - `database`: Loose object store (enumeration, reading, decoding)
//! - `index`: The staging area file
//! - `repository`: Coordination and output

pub mod config;
pub mod database;
pub mod index;
pub mod repository;
