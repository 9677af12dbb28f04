//! Loose object envelope
//!
//! A loose object file is a zlib stream whose payload is
//!
//! ```text
//! <type> <decimal-size>\0<content-bytes>
//! ```
//!
//! The envelope decoder only splits that payload: it names the kind, reads the advisory size
//! and hands the remaining bytes to a content decoder. It never checks the size against the
//! content; `check_integrity` reports a mismatch as a warning.

use crate::artifacts::errors::{DecodeError, FormatError, IntegrityWarning};
use crate::artifacts::objects::object_type::ObjectKind;
use bytes::Bytes;
use derive_new::new;
use std::io::Read;

/// Decompression capability consumed by the envelope decoder
pub trait Inflate {
    fn inflate(&self, compressed: &[u8]) -> std::io::Result<Vec<u8>>;
}

/// zlib decompression backed by `flate2`
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibInflate;

impl Inflate for ZlibInflate {
    fn inflate(&self, compressed: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(compressed);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content)
    }
}

/// A loose object split into its envelope fields
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DecodedObject {
    kind: ObjectKind,
    declared_size: u64,
    content: Bytes,
}

impl DecodedObject {
    /// Decompress and split one loose object
    pub fn decode(compressed: &[u8], inflate: &impl Inflate) -> Result<Self, DecodeError> {
        let decompressed = inflate
            .inflate(compressed)
            .map_err(DecodeError::Decompression)?;

        Ok(Self::parse(Bytes::from(decompressed))?)
    }

    /// Split an already-decompressed payload
    pub fn parse(payload: Bytes) -> Result<Self, FormatError> {
        let header_end = payload
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| FormatError::malformed_header("missing null terminator"))?;
        let header = &payload[..header_end];

        let space = header
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| FormatError::malformed_header("missing space between type and size"))?;
        let (type_token, size_token) = (&header[..space], &header[space + 1..]);

        let type_token = std::str::from_utf8(type_token)
            .map_err(|_| FormatError::malformed_header("type is not valid text"))?;
        let declared_size = Self::parse_size(size_token)?;
        let kind = ObjectKind::from(type_token);

        tracing::trace!(%kind, declared_size, "split object envelope");

        Ok(DecodedObject {
            kind,
            declared_size,
            content: payload.slice(header_end + 1..),
        })
    }

    fn parse_size(token: &[u8]) -> Result<u64, FormatError> {
        // u64::from_str would also take a leading '+'
        if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
            return Err(FormatError::malformed_header(format!(
                "size is not a decimal number: {:?}",
                String::from_utf8_lossy(token)
            )));
        }

        std::str::from_utf8(token)
            .ok()
            .and_then(|token| token.parse::<u64>().ok())
            .ok_or_else(|| FormatError::malformed_header("size does not fit in 64 bits"))
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn declared_size(&self) -> u64 {
        self.declared_size
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_parts(self) -> (ObjectKind, u64, Bytes) {
        (self.kind, self.declared_size, self.content)
    }

    /// Compare the advisory size against the content actually present
    pub fn check_integrity(&self) -> Option<IntegrityWarning> {
        let actual = self.content.len() as u64;
        (actual != self.declared_size).then_some(IntegrityWarning {
            declared: self.declared_size,
            actual,
        })
    }
}
