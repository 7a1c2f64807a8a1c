//! Builds manifest patches from downloaded mod jars.

use std::io::{Cursor, Read};

use serde_json::Value;
use url::Url;
use zip::{result::ZipError, ZipArchive};

use crate::{error::update::UpdateError, model::manifest::ManifestPatch};

use super::{gate, hash::content_hash};

/// Descriptor Forge mods ship at the jar root.
const MOD_DESCRIPTOR: &str = "mcmod.info";

/// Derives the manifest patch for an artifact.
///
/// Runs the same steps the update command reports one by one: resolve the forge id
/// from the jar, check it against the requester's restriction, then derive the file
/// name and hash.
///
/// # Arguments
/// - `bytes` - The downloaded artifact
/// - `source_url` - URL the artifact was downloaded from
/// - `restriction` - Forge id the requester is confined to, if any
///
/// # Returns
/// - `Ok(ManifestPatch)` - Patch with `forge_id` set when the jar declared one
/// - `Err(UpdateError::InvalidArchive)` - Artifact isn't a zip archive
/// - `Err(UpdateError::OwnershipMismatch)` - Restricted requester, different mod
/// - `Err(UpdateError::InvalidUrl | MissingFileName)` - No file name in the URL
pub fn propose(
    bytes: &[u8],
    source_url: &str,
    restriction: Option<&str>,
) -> Result<ManifestPatch, UpdateError> {
    let forge_id = read_mod_id(bytes)?;
    gate::ensure_scope(restriction, forge_id.as_deref())?;
    build_patch(forge_id, bytes, source_url)
}

/// Reads the forge id declared in the jar's `mcmod.info`.
///
/// Accepts both the plain array form and the `{"modList": [...]}` form. A missing or
/// unparseable descriptor yields `Ok(None)` so the update can still be edited by hand.
///
/// # Returns
/// - `Ok(Some(id))` - First mod's `modid`
/// - `Ok(None)` - No usable descriptor
/// - `Err(UpdateError::InvalidArchive)` - Bytes aren't a readable zip archive
pub fn read_mod_id(bytes: &[u8]) -> Result<Option<String>, UpdateError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut descriptor = match archive.by_name(MOD_DESCRIPTOR) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut raw = Vec::new();
    descriptor.read_to_end(&mut raw).map_err(ZipError::from)?;

    let info: Value = match serde_json::from_slice(&raw) {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!("Unparseable {}: {}", MOD_DESCRIPTOR, e);
            return Ok(None);
        }
    };

    let mods = match &info {
        Value::Array(mods) => mods,
        Value::Object(root) => match root.get("modList") {
            Some(Value::Array(mods)) => mods,
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };

    Ok(mods
        .first()
        .and_then(|first| first.get("modid"))
        .and_then(Value::as_str)
        .filter(|modid| !modid.is_empty())
        .map(str::to_string))
}

/// Assembles the patch once the forge id has been resolved and checked.
pub fn build_patch(
    forge_id: Option<String>,
    bytes: &[u8],
    source_url: &str,
) -> Result<ManifestPatch, UpdateError> {
    Ok(ManifestPatch {
        forge_id,
        id: None,
        url: Some(source_url.to_string()),
        file: Some(file_name_from_url(source_url)?),
        hash: Some(content_hash(bytes).into_string()),
    })
}

/// Last path segment of the URL with percent-escapes decoded.
///
/// # Returns
/// - `Ok(String)` - Decoded file name
/// - `Err(UpdateError::InvalidUrl)` - URL doesn't parse
/// - `Err(UpdateError::MissingFileName)` - URL path ends without a file name
pub fn file_name_from_url(source_url: &str) -> Result<String, UpdateError> {
    let url = Url::parse(source_url)?;

    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or(UpdateError::MissingFileName)?;

    Ok(match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixture::artifact;

    const URL: &str = "https://cdn.example.com/files/Dungeons%20Guide-4.0.jar";

    #[test]
    fn resolves_forge_id_from_descriptor() {
        let jar = artifact::mod_jar("dungeons_guide_loader").unwrap();

        let patch = propose(&jar, URL, None).unwrap();

        assert_eq!(patch.forge_id.as_deref(), Some("dungeons_guide_loader"));
        assert_eq!(patch.id, None);
        assert_eq!(patch.url.as_deref(), Some(URL));
        assert_eq!(patch.file.as_deref(), Some("Dungeons Guide-4.0.jar"));
        assert_eq!(patch.hash, Some(content_hash(&jar).into_string()));
    }

    #[test]
    fn resolves_forge_id_from_mod_list_descriptor() {
        let jar = artifact::mod_jar_v2("skytils").unwrap();

        assert_eq!(read_mod_id(&jar).unwrap().as_deref(), Some("skytils"));
    }

    #[test]
    fn missing_descriptor_leaves_id_unresolved() {
        let jar = artifact::jar_without_descriptor().unwrap();

        let patch = propose(&jar, URL, None).unwrap();

        assert_eq!(patch.forge_id, None);
        assert!(patch.hash.is_some());
    }

    #[test]
    fn unparseable_descriptor_leaves_id_unresolved() {
        let jar = artifact::archive(&[("mcmod.info", b"{ not json".as_slice())]).unwrap();

        assert_eq!(read_mod_id(&jar).unwrap(), None);
    }

    #[test]
    fn rejects_non_archives() {
        assert!(matches!(
            propose(b"definitely not a zip", URL, None),
            Err(UpdateError::InvalidArchive(_))
        ));
    }

    #[test]
    fn restricted_requester_cannot_propose_other_mods() {
        let jar = artifact::mod_jar("someone_elses_mod").unwrap();

        assert!(matches!(
            propose(&jar, URL, Some("dungeons_guide_loader")),
            Err(UpdateError::OwnershipMismatch { .. })
        ));
    }

    #[test]
    fn restricted_requester_cannot_propose_unknown_mods() {
        let jar = artifact::jar_without_descriptor().unwrap();

        assert!(matches!(
            propose(&jar, URL, Some("dungeons_guide_loader")),
            Err(UpdateError::OwnershipMismatch { found: None, .. })
        ));
    }

    #[test]
    fn restricted_requester_can_propose_own_mod() {
        let jar = artifact::mod_jar("dungeons_guide_loader").unwrap();

        let patch = propose(&jar, URL, Some("dungeons_guide_loader")).unwrap();

        assert_eq!(patch.forge_id.as_deref(), Some("dungeons_guide_loader"));
    }

    #[test]
    fn file_name_ignores_query_string() {
        assert_eq!(
            file_name_from_url("https://example.com/a/b/Mod-1.2.jar?raw=true").unwrap(),
            "Mod-1.2.jar"
        );
    }

    #[test]
    fn file_name_requires_a_path_segment() {
        assert!(matches!(
            file_name_from_url("https://example.com/"),
            Err(UpdateError::MissingFileName)
        ));
        assert!(matches!(
            file_name_from_url("not a url"),
            Err(UpdateError::InvalidUrl(_))
        ));
    }
}
