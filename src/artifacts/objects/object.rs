use crate::artifacts::errors::FormatError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::envelope::DecodedObject;
use crate::artifacts::objects::object_type::ObjectKind;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;

/// Decode a record from envelope content (everything after the header's null)
pub trait Unpackable {
    fn deserialize(content: Bytes) -> Result<Self, FormatError>
    where
        Self: Sized;
}

/// A loose object decoded according to its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
    Unknown { kind: String, content: Bytes },
}

impl ParsedObject {
    pub fn from_decoded(object: DecodedObject) -> Result<Self, FormatError> {
        let (kind, _, content) = object.into_parts();

        Ok(match kind {
            ObjectKind::Blob => ParsedObject::Blob(Blob::deserialize(content)?),
            ObjectKind::Tree => ParsedObject::Tree(Tree::deserialize(content)?),
            ObjectKind::Commit => ParsedObject::Commit(Commit::deserialize(content)?),
            ObjectKind::Tag => ParsedObject::Tag(Tag::deserialize(content)?),
            ObjectKind::Unknown(kind) => ParsedObject::Unknown { kind, content },
        })
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ParsedObject::Blob(_) => ObjectKind::Blob,
            ParsedObject::Tree(_) => ObjectKind::Tree,
            ParsedObject::Commit(_) => ObjectKind::Commit,
            ParsedObject::Tag(_) => ObjectKind::Tag,
            ParsedObject::Unknown { kind, .. } => ObjectKind::Unknown(kind.clone()),
        }
    }
}
