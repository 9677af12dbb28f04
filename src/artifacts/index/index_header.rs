use crate::artifacts::errors::FormatError;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE};
use byteorder::ByteOrder;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub marker: [u8; 4],
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    /// Read the fixed 12-byte header
    ///
    /// Only the signature is validated here; which versions are accepted is up to the
    /// index decoder.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::TruncatedHeader { len: bytes.len() });
        }

        let mut marker = [0u8; 4];
        marker.copy_from_slice(&bytes[0..4]);
        if &marker != SIGNATURE {
            return Err(FormatError::InvalidSignature { found: marker });
        }

        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        let entries_count = byteorder::NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(&self.marker);
        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(&self.entries_count.to_be_bytes());

        Bytes::from(bytes)
    }

    pub fn signature(&self) -> String {
        String::from_utf8_lossy(&self.marker).into_owned()
    }
}
