mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;
mod state;
mod util;

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    data::manifest::GithubManifestStore,
    error::AppError,
    service::mod_update::{gate::OwnershipGrants, pending::PendingUpdateStore},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    let manifest_store = GithubManifestStore::new(
        http_client.clone(),
        config.manifest_endpoint(),
        config.github_token.clone(),
    );

    tracing::info!(
        "Committing mod updates to {}/{} ({} ownership grants)",
        config.manifest_repo,
        config.manifest_path,
        config.mod_owners.len()
    );

    let state = AppState::new(
        db,
        http_client,
        manifest_store,
        PendingUpdateStore::new(config.pending_update_ttl),
        OwnershipGrants::new(config.mod_owners.clone()),
        config.maintainer_role_id,
    );

    bot::start::start_bot(&config, state).await
}
