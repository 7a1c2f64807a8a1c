//! In-memory mod artifacts.
//!
//! Builds zip archives shaped like Forge mod jars so the proposal builder can be
//! exercised without downloading anything.

use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, ZipWriter};

use crate::error::TestError;

const JAR_MANIFEST: &[u8] = b"Manifest-Version: 1.0\n";

/// Builds a zip archive from `(path, contents)` pairs.
///
/// # Arguments
/// - `files` - Archive entries to write in order
///
/// # Returns
/// - `Ok(Vec<u8>)` - The finished archive bytes
/// - `Err(TestError)` - Failed to write an entry
pub fn archive(files: &[(&str, &[u8])]) -> Result<Vec<u8>, TestError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (path, contents) in files {
        writer.start_file(*path, options)?;
        writer.write_all(contents)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Builds a mod jar whose `mcmod.info` declares `modid`.
pub fn mod_jar(modid: &str) -> Result<Vec<u8>, TestError> {
    let info = serde_json::json!([{ "modid": modid, "name": modid, "version": "1.0.0" }]);
    archive(&[
        ("mcmod.info", info.to_string().as_bytes()),
        ("META-INF/MANIFEST.MF", JAR_MANIFEST),
    ])
}

/// Builds a mod jar using the `{"modList": [...]}` descriptor form.
pub fn mod_jar_v2(modid: &str) -> Result<Vec<u8>, TestError> {
    let info = serde_json::json!({ "modListVersion": 2, "modList": [{ "modid": modid }] });
    archive(&[("mcmod.info", info.to_string().as_bytes())])
}

/// Builds a jar with no `mcmod.info` at all.
pub fn jar_without_descriptor() -> Result<Vec<u8>, TestError> {
    archive(&[("META-INF/MANIFEST.MF", JAR_MANIFEST)])
}
