//! Application state shared across all event handlers.
//!
//! Initialized once during startup and owned by the bot's `Handler`. Serenity runs
//! every event on its own task, so all fields are cheap to share: the database is a
//! connection pool, `reqwest::Client` and `PendingUpdateStore` are reference-counted
//! internally.

use sea_orm::DatabaseConnection;

use crate::{
    data::manifest::GithubManifestStore,
    service::mod_update::{gate::OwnershipGrants, pending::PendingUpdateStore, ModUpdateService},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for ticket tracking.
    pub db: DatabaseConnection,

    /// HTTP client used for artifact downloads.
    pub http_client: reqwest::Client,

    /// Remote manifest the update workflow commits to.
    pub manifest_store: GithubManifestStore,

    /// Proposals waiting for a Confirm or Edit press.
    pub pending_updates: PendingUpdateStore,

    /// Users allowed to update a single mod without the maintainer role.
    pub grants: OwnershipGrants,

    /// Role whose members may update any mod.
    pub maintainer_role_id: u64,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        manifest_store: GithubManifestStore,
        pending_updates: PendingUpdateStore,
        grants: OwnershipGrants,
        maintainer_role_id: u64,
    ) -> Self {
        Self {
            db,
            http_client,
            manifest_store,
            pending_updates,
            grants,
            maintainer_role_id,
        }
    }

    /// Update service borrowing this state's store, pending updates and grants.
    pub fn mod_updates(&self) -> ModUpdateService<'_> {
        ModUpdateService::new(&self.manifest_store, &self.pending_updates, &self.grants)
    }
}
