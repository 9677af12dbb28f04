use crate::artifacts::objects::envelope::{DecodedObject, Inflate, ZlibInflate};
use crate::artifacts::objects::object::ParsedObject;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Fan-out directory name: two lowercase hex digits
const OBJECT_DIR_REGEX: &str = r"^[0-9a-f]{2}$";

/// Loose object file name: the remaining 38 hex digits
const OBJECT_FILE_REGEX: &str = r"^[0-9a-f]{38}$";

/// Read-only view over `.git/objects`
#[derive(Debug, Clone)]
pub struct Database<I = ZlibInflate> {
    path: Box<Path>,
    inflate: I,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            inflate: ZlibInflate,
        }
    }
}

// TODO: read objects from packfiles once pack index decoding exists
impl<I: Inflate> Database<I> {
    pub fn with_inflate(path: Box<Path>, inflate: I) -> Self {
        Database { path, inflate }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// List every loose object ID in the store, sorted
    ///
    /// Walks the two-level `xx/yyyy...` layout; `pack`, `info` and anything else that is
    /// not a hex fan-out directory or a 38-digit object file is skipped.
    pub fn enumerate_object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.is_dir() {
            return Err(anyhow::anyhow!(
                "Object directory not found: {}",
                self.path.display()
            ));
        }

        let dir_regex = regex::Regex::new(OBJECT_DIR_REGEX)?;
        let file_regex = regex::Regex::new(OBJECT_FILE_REGEX)?;
        let mut object_ids = Vec::new();

        let walker = walkdir::WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() != 1
                    || !entry.file_type().is_dir()
                    || dir_regex.is_match(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = entry.context(format!(
                "Unable to enumerate objects in {}",
                self.path.display()
            ))?;
            if entry.depth() != 2 || !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !file_regex.is_match(&file_name) {
                tracing::debug!(path = %entry.path().display(), "skipping non-object file");
                continue;
            }

            let dir_name = entry
                .path()
                .parent()
                .and_then(|parent| parent.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            object_ids.push(ObjectId::try_parse(&format!("{dir_name}{file_name}"))?);
        }

        tracing::debug!(count = object_ids.len(), "enumerated loose objects");

        Ok(object_ids)
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Compressed bytes of one loose object
    pub fn read_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(Bytes::from(object_content))
    }

    /// Decompress and split one object into its envelope fields
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<DecodedObject> {
        let compressed = self.read_raw(object_id)?;

        DecodedObject::decode(&compressed, &self.inflate)
            .context(format!("Unable to decode object {object_id}"))
    }

    /// Decode an object all the way to its per-kind record
    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ParsedObject> {
        let object = self.load(object_id)?;

        ParsedObject::from_decoded(object).context(format!("Unable to parse object {object_id}"))
    }
}
