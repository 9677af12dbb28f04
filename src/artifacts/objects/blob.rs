//! Git blob object
//!
//! Blobs store file content. The content is opaque: no encoding is assumed, and the bytes
//! are kept exactly as they came out of the envelope.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::errors::FormatError;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The content as text, if it happens to be valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Unpackable for Blob {
    fn deserialize(content: Bytes) -> Result<Self, FormatError> {
        Ok(Self::new(content))
    }
}
