use derive_new::new;
use sha1::{Digest, Sha1};

const EXTENDED: u16 = 0x4000;
const NAME_LENGTH_UNKNOWN: u16 = 0x0FFF;

#[derive(Debug, Clone, new)]
pub struct StagedFile {
    pub path: String,
    pub oid: String,
    #[new(value = "0o100644")]
    pub mode: u32,
    #[new(value = "0")]
    pub stage: u16,
    #[new(default)]
    pub extended_flags: Option<u16>,
    #[new(default)]
    pub mtime: u32,
    #[new(default)]
    pub size: u32,
}

impl StagedFile {
    pub fn with_stage(mut self, stage: u16) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_extended_flags(mut self, extended_flags: u16) -> Self {
        self.extended_flags = Some(extended_flags);
        self
    }

    pub fn with_stat(mut self, mtime: u32, size: u32) -> Self {
        self.mtime = mtime;
        self.size = size;
        self
    }

    fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        let metadata = [
            self.mtime, 0, self.mtime, 0, 2049, 1234, self.mode, 1000, 1000, self.size,
        ];
        for field in metadata {
            bytes.extend_from_slice(&field.to_be_bytes());
        }
        bytes.extend_from_slice(&hex::decode(&self.oid).expect("Invalid hex object ID"));

        let name_len = (self.path.len() as u16).min(NAME_LENGTH_UNKNOWN);
        let mut flags = name_len | (self.stage << 12);
        if self.extended_flags.is_some() {
            flags |= EXTENDED;
        }
        bytes.extend_from_slice(&flags.to_be_bytes());
        if let Some(extended_flags) = self.extended_flags {
            bytes.extend_from_slice(&extended_flags.to_be_bytes());
        }

        bytes.extend_from_slice(self.path.as_bytes());
        bytes.push(0);
        while bytes.len() % 8 != 0 {
            bytes.push(0);
        }
        bytes
    }
}

/// Index file bytes: header, entries in the given order, then the checksum
pub fn index_bytes(version: u32, entries: &[StagedFile]) -> Vec<u8> {
    let mut bytes = b"DIRC".to_vec();
    bytes.extend_from_slice(&version.to_be_bytes());
    bytes.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        bytes.extend_from_slice(&entry.encode());
    }

    let checksum = Sha1::digest(&bytes);
    bytes.extend_from_slice(&checksum);
    bytes
}

pub fn write_index(git_dir: &std::path::Path, bytes: &[u8]) {
    std::fs::write(git_dir.join("index"), bytes).expect("Failed to write index");
}
