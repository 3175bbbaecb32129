#![allow(dead_code)]

pub mod command;
pub mod file;

use std::collections::BTreeMap;
use std::path::Path;

/// Read a ref file relative to the repo directory.
pub fn read_ref(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(".gogit").join(name))
        .unwrap_or_else(|e| panic!("Failed to read ref {name}: {e}"))
        .trim()
        .to_string()
}

/// Resolve HEAD through at most one symbolic hop.
pub fn head_oid(dir: &Path) -> String {
    let head = read_ref(dir, "HEAD");
    match head.strip_prefix("ref: ") {
        Some(target) => read_ref(dir, target),
        None => head,
    }
}

pub fn read_index(dir: &Path) -> BTreeMap<String, String> {
    let raw = std::fs::read_to_string(dir.join(".gogit").join("index"))
        .unwrap_or_else(|e| panic!("Failed to read index: {e}"));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Failed to parse index: {e}"))
}

pub fn objects_count(dir: &Path) -> usize {
    std::fs::read_dir(dir.join(".gogit").join("objects"))
        .unwrap_or_else(|e| panic!("Failed to read objects directory: {e}"))
        .count()
}

pub fn is_hex_oid(value: &str) -> bool {
    value.len() == 40 && value.chars().all(|c| c.is_ascii_hexdigit())
}
