use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::Path;

pub fn compress(payload: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(payload).expect("Failed to compress");
    encoder.finish().expect("Failed to compress")
}

pub fn envelope(kind: &str, content: &[u8]) -> Vec<u8> {
    let mut payload = format!("{} {}\0", kind, content.len()).into_bytes();
    payload.extend_from_slice(content);
    payload
}

/// Store a raw, uncompressed payload under the ID git would give it
pub fn write_raw_object(git_dir: &Path, payload: &[u8]) -> String {
    let oid = hex::encode(Sha1::digest(payload));
    write_compressed_at(git_dir, &oid, &compress(payload));
    oid
}

/// Store a well-formed loose object and return its hex ID
pub fn write_object(git_dir: &Path, kind: &str, content: &[u8]) -> String {
    write_raw_object(git_dir, &envelope(kind, content))
}

/// Store arbitrary bytes as the object file of `oid`
pub fn write_compressed_at(git_dir: &Path, oid: &str, bytes: &[u8]) {
    let (fan_out, file) = oid.split_at(2);
    let dir = git_dir.join("objects").join(fan_out);
    std::fs::create_dir_all(&dir).expect("Failed to create fan-out directory");
    std::fs::write(dir.join(file), bytes).expect("Failed to write object file");
}

/// Tree content for `(mode, name, hex id)` triples, in the given order
pub fn tree_content(entries: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut content = Vec::new();
    for (mode, name, oid) in entries {
        content.extend_from_slice(format!("{mode} {name}\0").as_bytes());
        content.extend_from_slice(&hex::decode(oid).expect("Invalid hex object ID"));
    }
    content
}
