//! Manifest JSON documents shaped like `files/mods.json`.

use serde_json::{json, Value};

/// A single-entry manifest keyed by `forge_id`.
pub fn single_forge_entry(forge_id: &str, url: &str, hash: &str) -> Value {
    json!([{ "forge_id": forge_id, "url": url, "hash": hash }])
}

/// A manifest resembling the real one, with extra display keys and an `id`-keyed entry.
pub fn mixed() -> Value {
    json!([
        {
            "id": "skyblockextras",
            "forge_id": "skyblockextras",
            "display": "SkyblockExtras",
            "description": "Quality of life features",
            "url": "https://example.com/sbe-1.0.jar",
            "file": "sbe-1.0.jar",
            "hash": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        },
        {
            "id": "patcher",
            "display": "Patcher",
            "url": "https://example.com/Patcher-1.8.jar",
            "file": "Patcher-1.8.jar",
            "hash": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"
        }
    ])
}
