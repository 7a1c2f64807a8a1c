//! Models for the staged mod update workflow.

use crate::model::manifest::{ManifestPatch, PatchTarget, RevisionToken};

/// The facts about a Discord member the authorization decision needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// Discord user id.
    pub user_id: u64,
    /// Holds the maintainer ("Github Keeper") role.
    pub is_maintainer: bool,
    /// Holds the Administrator permission in the guild.
    pub is_administrator: bool,
}

/// Outcome of the role/ownership gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// May update any manifest entry.
    Maintainer,
    /// May only update the entry with this forge id.
    Restricted(String),
    /// May not update anything.
    Denied(Denial),
}

impl Authorization {
    /// The forge id the requester is confined to, if any.
    pub fn restriction(&self) -> Option<&str> {
        match self {
            Self::Restricted(forge_id) => Some(forge_id),
            _ => None,
        }
    }
}

/// Why the gate refused a requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Server administrator who hasn't given themselves the maintainer role.
    MissingRole,
    /// Anyone else.
    NotPermitted,
}

impl Denial {
    /// Text shown to the refused requester.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingRole => "please assign yourself the Github Keeper role and try again",
            Self::NotPermitted => "why do you think you can do this?",
        }
    }
}

/// A proposed manifest change waiting for a Confirm or Edit press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    /// Id of the status message carrying the Confirm/Edit buttons.
    pub prompt_id: u64,
    pub patch: ManifestPatch,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub target: PatchTarget,
    /// Revision the manifest is at after the write.
    pub revision: RevisionToken,
    pub message: String,
}
