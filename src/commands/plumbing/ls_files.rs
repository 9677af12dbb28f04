use crate::areas::repository::Repository;
use crate::artifacts::index::entry_flags::NAME_LENGTH_UNKNOWN;
use crate::artifacts::index::index_entry::IndexEntry;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct LsFilesOptions {
    /// Also print the stat metadata of every entry
    pub debug: bool,
}

impl Repository {
    pub fn ls_files(&self, opts: &LsFilesOptions) -> anyhow::Result<()> {
        let index = self.index().load()?;

        writeln!(self.writer(), "signature: {}", index.header().signature())?;
        writeln!(self.writer(), "version: {}", index.version())?;
        writeln!(self.writer(), "entry count: {}", index.entries().len())?;

        for entry in index.entries() {
            self.show_index_entry(entry, opts.debug)?;
        }

        Ok(())
    }

    fn show_index_entry(&self, entry: &IndexEntry, debug: bool) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{} {} {}\t{}",
            entry.metadata.mode_octal(),
            entry.oid,
            entry.stage(),
            entry.path_lossy()
        )?;

        if debug {
            let metadata = &entry.metadata;
            writeln!(
                self.writer(),
                "  ctime: {}:{} ({})",
                metadata.ctime,
                metadata.ctime_nsec,
                readable_time(metadata.ctime_datetime())
            )?;
            writeln!(
                self.writer(),
                "  mtime: {}:{} ({})",
                metadata.mtime,
                metadata.mtime_nsec,
                readable_time(metadata.mtime_datetime())
            )?;
            writeln!(self.writer(), "  dev: {}\tino: {}", metadata.dev, metadata.ino)?;
            writeln!(self.writer(), "  uid: {}\tgid: {}", metadata.uid, metadata.gid)?;
            writeln!(
                self.writer(),
                "  size: {}\tflags: {:#06x}",
                metadata.size,
                entry.flags.bits()
            )?;
            if let Some(extended_flags) = entry.extended_flags {
                writeln!(self.writer(), "  extended flags: {:#06x}", extended_flags.bits())?;
            }
            self.note_length_mismatch(entry)?;
        }

        Ok(())
    }

    fn note_length_mismatch(&self, entry: &IndexEntry) -> anyhow::Result<()> {
        let declared = entry.declared_name_len();
        if declared < NAME_LENGTH_UNKNOWN && declared as usize != entry.path.len() {
            writeln!(
                self.writer(),
                "  note: declared name length {} differs from path length {}",
                declared,
                entry.path.len()
            )?;
        }

        Ok(())
    }
}

fn readable_time(time: Option<chrono::DateTime<chrono::Utc>>) -> String {
    time.map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "invalid".to_string())
}
