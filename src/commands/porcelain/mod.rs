//! Porcelain commands (user-facing reports)
//!
//! ## Commands
//!
//! - `inspect`: Decode and report every loose object in the store

pub mod inspect;
