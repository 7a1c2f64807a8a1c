//! Typed view of the mod manifest (`files/mods.json`).
//!
//! The manifest is a JSON array of entries. Each entry is kept as the ordered key
//! map it was read as, so keys the update workflow never touches (including
//! explicit `null`s) are written back in place. The fields the workflow does touch
//! are read through accessors.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};

/// Indentation used when writing the manifest back.
const MANIFEST_INDENT: &[u8] = b"    ";

/// One trackable artifact in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestEntry(Map<String, Value>);

impl ManifestEntry {
    /// Internal identifier used by the installer.
    pub fn id(&self) -> Option<&str> {
        self.text("id")
    }

    /// Forge `modid` as declared in the jar's `mcmod.info`.
    pub fn forge_id(&self) -> Option<&str> {
        self.text("forge_id")
    }

    pub fn url(&self) -> Option<&str> {
        self.text("url")
    }

    pub fn file(&self) -> Option<&str> {
        self.text("file")
    }

    pub fn hash(&self) -> Option<&str> {
        self.text("hash")
    }

    /// Raw value of any key, untyped.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Overwrites every field the patch sets, leaving the rest untouched.
    ///
    /// A key already present keeps its position; a new key goes at the end.
    pub fn merge(&mut self, patch: &ManifestPatch) {
        for (key, value) in patch.fields() {
            if let Some(value) = value {
                self.0.insert(key.to_string(), Value::String(value.clone()));
            }
        }
    }
}

impl From<&ManifestPatch> for ManifestEntry {
    fn from(patch: &ManifestPatch) -> Self {
        let mut entry = ManifestEntry::default();
        entry.merge(patch);
        entry
    }
}

/// Proposed field values for a single manifest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestPatch {
    pub forge_id: Option<String>,
    pub id: Option<String>,
    pub url: Option<String>,
    pub file: Option<String>,
    pub hash: Option<String>,
}

impl ManifestPatch {
    /// The key this patch is matched by, preferring `forge_id`.
    pub fn identifier(&self) -> Option<&str> {
        self.forge_id.as_deref().or(self.id.as_deref())
    }

    /// Manifest keys paired with the values this patch proposes for them.
    fn fields(&self) -> [(&'static str, &Option<String>); 5] {
        [
            ("id", &self.id),
            ("forge_id", &self.forge_id),
            ("url", &self.url),
            ("file", &self.file),
            ("hash", &self.hash),
        ]
    }

    /// Whether `entry` is the entry this patch targets.
    ///
    /// Both key kinds are checked; a key only participates when the patch sets it.
    pub fn matches(&self, entry: &ManifestEntry) -> bool {
        let forge_match = self.forge_id.is_some() && entry.forge_id() == self.forge_id.as_deref();
        let id_match = self.id.is_some() && entry.id() == self.id.as_deref();
        forge_match || id_match
    }
}

/// Where a patch landed in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    /// Merged into the existing entry at this index.
    Updated(usize),
    /// Appended as a new entry.
    Appended,
}

/// Ordered list of manifest entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Serializes with the stable formatting used for every write.
    ///
    /// Four-space indentation and a trailing newline, so that two manifests with
    /// the same content always produce the same bytes.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(MANIFEST_INDENT));
        self.serialize(&mut serializer)?;
        out.push(b'\n');

        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Index of the first entry the patch targets.
    pub fn position_of(&self, patch: &ManifestPatch) -> Option<usize> {
        self.entries.iter().position(|entry| patch.matches(entry))
    }

    /// Merges the patch into its target entry, or appends it when none matches.
    pub fn apply(&mut self, patch: &ManifestPatch) -> PatchTarget {
        match self.position_of(patch) {
            Some(index) => {
                self.entries[index].merge(patch);
                PatchTarget::Updated(index)
            }
            None => {
                self.entries.push(ManifestEntry::from(patch));
                PatchTarget::Appended
            }
        }
    }
}

/// Opaque marker of the stored manifest revision (the GitHub blob sha).
///
/// Only ever obtained from a fetch and handed back on the write that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionToken(String);

impl RevisionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
