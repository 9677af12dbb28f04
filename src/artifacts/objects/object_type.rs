/// Object kind named by a loose object's envelope
///
/// Unknown type tokens are carried through instead of rejected, so a future object kind
/// still splits into header and content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
    Unknown(String),
}

const KNOWN_KINDS: phf::Map<&'static str, ObjectKind> = phf::phf_map! {
    "blob" => ObjectKind::Blob,
    "tree" => ObjectKind::Tree,
    "commit" => ObjectKind::Commit,
    "tag" => ObjectKind::Tag,
};

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
            ObjectKind::Tag => "tag",
            ObjectKind::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ObjectKind::Unknown(_))
    }
}

impl From<&str> for ObjectKind {
    fn from(value: &str) -> Self {
        KNOWN_KINDS
            .get(value)
            .cloned()
            .unwrap_or_else(|| ObjectKind::Unknown(value.to_string()))
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
