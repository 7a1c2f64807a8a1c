//! Role/ownership gate for the update workflow.

use std::collections::HashMap;

use crate::{
    error::update::UpdateError,
    model::update::{Authorization, Denial, Requester},
};

/// Static grants letting specific users update a single mod without the maintainer role.
#[derive(Debug, Clone, Default)]
pub struct OwnershipGrants {
    owners: HashMap<u64, String>,
}

impl OwnershipGrants {
    pub fn new(owners: HashMap<u64, String>) -> Self {
        Self { owners }
    }

    /// Forge id granted to `user_id`, if any.
    pub fn granted_to(&self, user_id: u64) -> Option<&str> {
        self.owners.get(&user_id).map(String::as_str)
    }
}

/// Decides what a requester may update.
///
/// Maintainers may update anything, grant holders only their own mod. Everyone else
/// is denied, with administrators told to assign themselves the role.
pub fn authorize(requester: &Requester, grants: &OwnershipGrants) -> Authorization {
    if requester.is_maintainer {
        return Authorization::Maintainer;
    }

    if let Some(forge_id) = grants.granted_to(requester.user_id) {
        return Authorization::Restricted(forge_id.to_string());
    }

    if requester.is_administrator {
        Authorization::Denied(Denial::MissingRole)
    } else {
        Authorization::Denied(Denial::NotPermitted)
    }
}

/// Like `authorize`, but turns a denial into an error.
pub fn require(
    requester: &Requester,
    grants: &OwnershipGrants,
) -> Result<Authorization, UpdateError> {
    match authorize(requester, grants) {
        Authorization::Denied(denial) => Err(UpdateError::Unauthorized(denial)),
        allowed => Ok(allowed),
    }
}

/// Checks that a restricted requester only targets the mod they were granted.
///
/// # Arguments
/// - `restriction` - Forge id the requester is confined to, `None` for maintainers
/// - `forge_id` - Forge id the update targets, `None` if it couldn't be resolved
///
/// # Returns
/// - `Ok(())` - Unrestricted, or the ids match
/// - `Err(UpdateError::OwnershipMismatch)` - Restricted and the ids differ
pub fn ensure_scope(
    restriction: Option<&str>,
    forge_id: Option<&str>,
) -> Result<(), UpdateError> {
    match restriction {
        Some(expected) if forge_id != Some(expected) => Err(UpdateError::OwnershipMismatch {
            expected: expected.to_string(),
            found: forge_id.map(str::to_string),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER_ID: u64 = 332836587576492033;

    fn grants() -> OwnershipGrants {
        OwnershipGrants::new(HashMap::from([(
            OWNER_ID,
            "dungeons_guide_loader".to_string(),
        )]))
    }

    fn requester(user_id: u64, is_maintainer: bool, is_administrator: bool) -> Requester {
        Requester {
            user_id,
            is_maintainer,
            is_administrator,
        }
    }

    #[test]
    fn maintainer_is_unrestricted() {
        assert_eq!(
            authorize(&requester(1, true, false), &grants()),
            Authorization::Maintainer
        );
    }

    #[test]
    fn maintainer_role_wins_over_ownership_grant() {
        assert_eq!(
            authorize(&requester(OWNER_ID, true, false), &grants()),
            Authorization::Maintainer
        );
    }

    #[test]
    fn grant_holder_is_restricted_to_their_mod() {
        let auth = authorize(&requester(OWNER_ID, false, false), &grants());

        assert_eq!(
            auth,
            Authorization::Restricted("dungeons_guide_loader".to_string())
        );
        assert_eq!(auth.restriction(), Some("dungeons_guide_loader"));
    }

    #[test]
    fn administrator_without_role_is_told_to_assign_it() {
        assert_eq!(
            authorize(&requester(2, false, true), &grants()),
            Authorization::Denied(Denial::MissingRole)
        );
        assert_eq!(
            Denial::MissingRole.message(),
            "please assign yourself the Github Keeper role and try again"
        );
    }

    #[test]
    fn everyone_else_is_denied() {
        assert_eq!(
            authorize(&requester(3, false, false), &grants()),
            Authorization::Denied(Denial::NotPermitted)
        );
        assert!(matches!(
            require(&requester(3, false, false), &grants()),
            Err(UpdateError::Unauthorized(Denial::NotPermitted))
        ));
    }

    #[test]
    fn scope_check_only_applies_to_restricted_requesters() {
        assert!(ensure_scope(None, Some("anything")).is_ok());
        assert!(ensure_scope(None, None).is_ok());
        assert!(ensure_scope(Some("mine"), Some("mine")).is_ok());
        assert!(matches!(
            ensure_scope(Some("mine"), Some("theirs")),
            Err(UpdateError::OwnershipMismatch { .. })
        ));
        assert!(matches!(
            ensure_scope(Some("mine"), None),
            Err(UpdateError::OwnershipMismatch { found: None, .. })
        ));
    }
}
