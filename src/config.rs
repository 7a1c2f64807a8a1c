use std::collections::HashMap;
use std::time::Duration;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_MANIFEST_REPO: &str = "SkyblockClient/SkyblockClient-REPO";
const DEFAULT_MANIFEST_PATH: &str = "files/mods.json";
const GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_PENDING_UPDATE_TTL_SECS: u64 = 60 * 60 * 24;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub github_token: String,
    pub github_api_url: String,
    pub manifest_repo: String,
    pub manifest_path: String,

    /// Role whose members may update any mod ("Github Keeper").
    pub maintainer_role_id: u64,
    /// Discord user id -> forge id that user may update without the maintainer role.
    pub mod_owners: HashMap<u64, String>,
    pub pending_update_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let pending_update_ttl_secs = match std::env::var("PENDING_UPDATE_TTL_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                name: "PENDING_UPDATE_TTL_SECS".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_PENDING_UPDATE_TTL_SECS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            github_token: required("GITHUB_TOKEN")?,
            github_api_url: GITHUB_API_URL.to_string(),
            manifest_repo: std::env::var("MANIFEST_REPO")
                .unwrap_or_else(|_| DEFAULT_MANIFEST_REPO.to_string()),
            manifest_path: std::env::var("MANIFEST_PATH")
                .unwrap_or_else(|_| DEFAULT_MANIFEST_PATH.to_string()),
            maintainer_role_id: parse_u64_var(
                "MAINTAINER_ROLE_ID",
                &required("MAINTAINER_ROLE_ID")?,
            )?,
            mod_owners: parse_mod_owners(&std::env::var("MOD_OWNERS").unwrap_or_default())?,
            pending_update_ttl: Duration::from_secs(pending_update_ttl_secs),
        })
    }

    /// Contents API URL of the manifest file.
    pub fn manifest_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.github_api_url, self.manifest_repo, self.manifest_path
        )
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_u64_var(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Parses `MOD_OWNERS`, a comma separated list of `user_id:forge_id` pairs.
///
/// # Arguments
/// - `value` - Raw variable contents, may be empty
///
/// # Returns
/// - `Ok(HashMap)` - User id to forge id grants
/// - `Err(ConfigError::InvalidEnvVar)` - A pair is malformed or its user id isn't numeric
pub fn parse_mod_owners(value: &str) -> Result<HashMap<u64, String>, ConfigError> {
    let mut owners = HashMap::new();

    for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((user_id, forge_id)) = pair.split_once(':') else {
            return Err(ConfigError::InvalidEnvVar {
                name: "MOD_OWNERS".to_string(),
                reason: format!("expected user_id:forge_id, got '{}'", pair),
            });
        };

        let forge_id = forge_id.trim();
        if forge_id.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                name: "MOD_OWNERS".to_string(),
                reason: format!("missing forge id for user {}", user_id),
            });
        }

        owners.insert(parse_u64_var("MOD_OWNERS", user_id)?, forge_id.to_string());
    }

    Ok(owners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_pairs() {
        let owners =
            parse_mod_owners("332836587576492033:dungeons_guide_loader, 1:other").unwrap();

        assert_eq!(owners.len(), 2);
        assert_eq!(
            owners.get(&332836587576492033).map(String::as_str),
            Some("dungeons_guide_loader")
        );
        assert_eq!(owners.get(&1).map(String::as_str), Some("other"));
    }

    #[test]
    fn empty_owner_list_is_allowed() {
        assert!(parse_mod_owners("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(matches!(
            parse_mod_owners("not-a-pair"),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
        assert!(matches!(
            parse_mod_owners("abc:some_mod"),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
        assert!(matches!(
            parse_mod_owners("123:"),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
    }
}
