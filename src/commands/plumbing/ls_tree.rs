use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ParsedObject;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// List the entries of a single tree object
    ///
    /// Subtrees are listed as entries, not expanded.
    pub fn ls_tree(&self, object_id: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_id)?;

        let tree = match self.database().parse_object(&oid)? {
            ParsedObject::Tree(tree) => tree,
            other => {
                return Err(anyhow::anyhow!(
                    "Object {} is a {}, not a tree",
                    oid,
                    other.kind()
                ));
            }
        };

        for entry in tree.entries() {
            writeln!(
                self.writer(),
                "{:0>6} {} {}\t{}",
                entry.mode,
                entry.kind(),
                entry.oid,
                entry.name
            )?;
        }

        Ok(())
    }
}
