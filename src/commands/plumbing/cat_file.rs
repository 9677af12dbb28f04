use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ParsedObject;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Content, formatted by kind
    Pretty,
    /// Kind name from the envelope
    Kind,
    /// Declared size from the envelope
    Size,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;
        let object = self.database().load(&oid)?;

        match mode {
            CatFileMode::Kind => writeln!(self.writer(), "{}", object.kind())?,
            CatFileMode::Size => writeln!(self.writer(), "{}", object.declared_size())?,
            CatFileMode::Pretty => {
                let object = ParsedObject::from_decoded(object)
                    .context(format!("Unable to parse object {oid}"))?;
                self.show_object(&object)?;
            }
        }

        Ok(())
    }

    fn show_object(&self, object: &ParsedObject) -> anyhow::Result<()> {
        match object {
            ParsedObject::Blob(blob) => self.writer().write_all(blob.content())?,
            ParsedObject::Tree(tree) => {
                if !tree.is_empty() {
                    writeln!(self.writer(), "{}", tree.display())?;
                }
            }
            ParsedObject::Commit(commit) => write!(self.writer(), "{}", commit.display())?,
            ParsedObject::Tag(tag) => write!(self.writer(), "{}", tag.display())?,
            ParsedObject::Unknown { content, .. } => self.writer().write_all(content)?,
        }

        Ok(())
    }
}
