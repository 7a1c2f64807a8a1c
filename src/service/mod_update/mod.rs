//! Staged mod-update workflow.
//!
//! A requester posts a download URL; the bot downloads and inspects the jar, shows
//! the proposed manifest change, and waits for a Confirm or Edit press. Nothing is
//! written until then, and the write is checked against the manifest revision read
//! at commit time.

pub mod commit;
pub mod download;
pub mod gate;
pub mod hash;
pub mod pending;
pub mod proposal;

use crate::{
    data::manifest::ManifestStore,
    error::update::UpdateError,
    model::{
        manifest::ManifestPatch,
        update::{Authorization, CommitOutcome, PendingUpdate, Requester},
    },
};

use self::{gate::OwnershipGrants, pending::PendingUpdateStore};

pub struct ModUpdateService<'a> {
    store: &'a dyn ManifestStore,
    pending: &'a PendingUpdateStore,
    grants: &'a OwnershipGrants,
}

impl<'a> ModUpdateService<'a> {
    pub fn new(
        store: &'a dyn ManifestStore,
        pending: &'a PendingUpdateStore,
        grants: &'a OwnershipGrants,
    ) -> Self {
        Self {
            store,
            pending,
            grants,
        }
    }

    /// Checks whether the requester may start an update.
    ///
    /// # Returns
    /// - `Ok(Authorization::Maintainer)` - May update any mod
    /// - `Ok(Authorization::Restricted(forge_id))` - May only update `forge_id`
    /// - `Err(UpdateError::Unauthorized)` - May not update anything
    pub fn authorize(&self, requester: &Requester) -> Result<Authorization, UpdateError> {
        gate::require(requester, self.grants)
    }

    /// Stores a proposal until someone presses one of its buttons.
    ///
    /// Whoever presses a button is gated again at that point, so only the prompt
    /// and the patch are kept.
    ///
    /// # Arguments
    /// - `prompt_id` - Id of the status message carrying the buttons
    /// - `patch` - Proposed manifest change
    pub async fn stage(&self, prompt_id: u64, patch: ManifestPatch) -> PendingUpdate {
        let update = PendingUpdate { prompt_id, patch };

        self.pending.put(update.clone()).await;
        tracing::debug!(
            "Staged update for {:?} on prompt {} ({} pending)",
            update.patch.identifier(),
            prompt_id,
            self.pending.len().await
        );

        update
    }

    /// Handles a Confirm press: consumes the proposal and commits it.
    ///
    /// The presser is gated again, so a restricted user can't confirm someone else's
    /// proposal for a different mod. The proposal stays pending when the presser is
    /// refused.
    ///
    /// # Returns
    /// - `Ok(CommitOutcome)` - Manifest written
    /// - `Err(UpdateError::Unauthorized | OwnershipMismatch)` - Presser may not confirm this
    /// - `Err(UpdateError::NotPending)` - Already consumed or expired
    /// - `Err(UpdateError)` - Commit failure; the proposal is consumed either way
    pub async fn confirm(
        &self,
        prompt_id: u64,
        presser: &Requester,
    ) -> Result<CommitOutcome, UpdateError> {
        let authorization = self.authorize(presser)?;

        let staged = self
            .pending
            .peek(prompt_id)
            .await
            .ok_or(UpdateError::NotPending)?;
        gate::ensure_scope(
            authorization.restriction(),
            staged.patch.forge_id.as_deref(),
        )?;

        let update = self
            .pending
            .take(prompt_id)
            .await
            .ok_or(UpdateError::NotPending)?;

        commit::commit(self.store, &update.patch).await
    }

    /// Handles an Edit press: reads the proposal so it can be shown in a form.
    ///
    /// The proposal stays pending until the form is submitted, so a dismissed form
    /// leaves Confirm usable. Only unrestricted pressers may edit, since an edit can
    /// retarget the entry.
    ///
    /// # Returns
    /// - `Ok(PendingUpdate)` - Proposal to prefill the form with
    /// - `Err(UpdateError::OwnershipMismatch)` - Presser is ownership-restricted
    /// - `Err(UpdateError::Unauthorized)` - Presser may not update anything
    /// - `Err(UpdateError::NotPending)` - Already consumed or expired
    pub async fn edit(
        &self,
        prompt_id: u64,
        presser: &Requester,
    ) -> Result<PendingUpdate, UpdateError> {
        if let Authorization::Restricted(expected) = self.authorize(presser)? {
            return Err(UpdateError::OwnershipMismatch {
                expected,
                found: None,
            });
        }

        self.pending
            .peek(prompt_id)
            .await
            .ok_or(UpdateError::NotPending)
    }

    /// Commits a patch submitted through the edit form in place of the proposal.
    ///
    /// # Arguments
    /// - `prompt_id` - Prompt the form was opened from
    /// - `submitter` - User who submitted the form
    /// - `patch` - Values entered in the form
    ///
    /// # Returns
    /// - `Ok(CommitOutcome)` - Manifest written
    /// - `Err(UpdateError::OwnershipMismatch)` - Submitter is ownership-restricted
    /// - `Err(UpdateError::NotPending)` - Proposal already confirmed, submitted or expired
    /// - `Err(UpdateError)` - Gate or commit failure; the proposal is consumed either way
    pub async fn commit_edited(
        &self,
        prompt_id: u64,
        submitter: &Requester,
        patch: &ManifestPatch,
    ) -> Result<CommitOutcome, UpdateError> {
        if let Authorization::Restricted(expected) = self.authorize(submitter)? {
            return Err(UpdateError::OwnershipMismatch {
                expected,
                found: patch.forge_id.clone(),
            });
        }

        self.pending
            .take(prompt_id)
            .await
            .ok_or(UpdateError::NotPending)?;

        commit::commit(self.store, patch).await
    }
}
