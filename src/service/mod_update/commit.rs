//! Writes confirmed updates back to the manifest.

use crate::{
    data::manifest::ManifestStore,
    error::update::UpdateError,
    model::{manifest::ManifestPatch, update::CommitOutcome},
};

/// Applies a patch to the current manifest and writes it back.
///
/// Always fetches fresh: the proposal may have waited on a button press for hours,
/// so nothing read at proposal time is reused. The write is conditioned on the
/// revision read here, so a concurrent change makes it fail instead of being lost.
///
/// # Arguments
/// - `store` - Manifest storage
/// - `patch` - Confirmed patch
///
/// # Returns
/// - `Ok(CommitOutcome)` - Manifest written
/// - `Err(UpdateError::MissingIdentifier)` - Patch has neither `forge_id` nor `id`
/// - `Err(UpdateError::NoOpUpdate)` - Patch wouldn't change the manifest; nothing written
/// - `Err(UpdateError::Conflict)` - Manifest changed after it was fetched; nothing written
/// - `Err(UpdateError)` - Fetch or write failure
pub async fn commit(
    store: &dyn ManifestStore,
    patch: &ManifestPatch,
) -> Result<CommitOutcome, UpdateError> {
    let identifier = patch.identifier().ok_or(UpdateError::MissingIdentifier)?;

    let (mut manifest, revision) = store.fetch().await?;

    let before = manifest.to_canonical_json()?;
    let target = manifest.apply(patch);
    let after = manifest.to_canonical_json()?;

    if before == after {
        tracing::info!("Update for {} would not change the manifest", identifier);
        return Err(UpdateError::NoOpUpdate);
    }

    let message = format!(
        "Update {} to {}",
        identifier,
        patch.file.as_deref().unwrap_or("latest")
    );

    let revision = store.write(&after, &message, &revision).await?;

    tracing::info!("{} ({:?}), manifest now at {}", message, target, revision);

    Ok(CommitOutcome {
        target,
        revision,
        message,
    })
}
