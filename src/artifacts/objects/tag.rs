//! Annotated tag object
//!
//! Same layout as a commit (see `HeaderRecord`) with different header keys:
//!
//! ```text
//! object <target-sha>
//! type <target-kind>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <tag message>
//! ```

use crate::artifacts::errors::FormatError;
use crate::artifacts::objects::commit::Signature;
use crate::artifacts::objects::header_record::HeaderRecord;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_type::ObjectKind;
use bytes::Bytes;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    record: HeaderRecord,
}

impl Tag {
    pub fn record(&self) -> &HeaderRecord {
        &self.record
    }

    pub fn headers(&self) -> &[(String, String)] {
        self.record.headers()
    }

    pub fn message(&self) -> &str {
        self.record.message()
    }

    /// Tagged object ID in hex
    pub fn object(&self) -> Option<&str> {
        self.record.first("object")
    }

    pub fn target_kind(&self) -> Option<ObjectKind> {
        self.record.first("type").map(ObjectKind::from)
    }

    pub fn tag_name(&self) -> Option<&str> {
        self.record.first("tag")
    }

    pub fn tagger(&self) -> Option<anyhow::Result<Signature>> {
        self.record.first("tagger").map(Signature::try_from)
    }

    pub fn display(&self) -> String {
        self.record.display()
    }
}

impl Unpackable for Tag {
    fn deserialize(content: Bytes) -> Result<Self, FormatError> {
        Ok(Tag {
            record: HeaderRecord::parse(&content),
        })
    }
}
