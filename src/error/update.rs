use reqwest::StatusCode;
use thiserror::Error;

use crate::model::update::Denial;

/// Failures of the mod update workflow.
///
/// Every variant is shown verbatim to the requester on the status prompt or as a
/// reply, so the messages are written for Discord users rather than operators.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The requester may not use the update workflow at all.
    #[error("{}", .0.message())]
    Unauthorized(Denial),

    /// The manifest endpoint answered without usable content.
    #[error("invalid github response")]
    UpstreamUnavailable,

    /// The artifact URL answered with a non-success status.
    #[error("download failed with {status}")]
    DownloadFailed {
        /// HTTP status of the artifact response
        status: StatusCode,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// A restricted requester tried to update a mod they don't own.
    #[error("you are not the owner of this mod. You can not update it.")]
    OwnershipMismatch {
        /// The identifier the requester is restricted to
        expected: String,
        /// The identifier the artifact resolved to, if any
        found: Option<String>,
    },

    /// The confirm/edit button belongs to an update that was already consumed or expired.
    #[error("this update was already pushed or has expired, run the command again")]
    NotPending,

    /// The download URL has no file name to record.
    #[error("that url doesn't point at a file")]
    MissingFileName,

    /// The update has no identifier to match or insert with.
    #[error("this update has no mod id, edit it before pushing")]
    MissingIdentifier,

    /// Applying the update would not change the manifest.
    #[error("Identical files")]
    NoOpUpdate,

    /// The manifest changed between fetch and write.
    #[error("the mods file changed while this update was being pushed, run the command again")]
    Conflict,

    /// The manifest write was refused for a reason other than a stale revision.
    #[error("github rejected the update: {status}")]
    WriteRejected {
        /// HTTP status of the rejected write
        status: StatusCode,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The downloaded artifact is not a readable zip archive.
    #[error("that file is not a valid jar: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    /// The supplied download URL could not be parsed.
    #[error("that is not a valid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The manifest content could not be decoded or parsed.
    #[error("the mods file is malformed: {0}")]
    MalformedManifest(String),

    /// Network failure talking to GitHub or the artifact host.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl From<serde_json::Error> for UpdateError {
    fn from(err: serde_json::Error) -> Self {
        UpdateError::MalformedManifest(err.to_string())
    }
}

impl From<base64::DecodeError> for UpdateError {
    fn from(err: base64::DecodeError) -> Self {
        UpdateError::MalformedManifest(err.to_string())
    }
}
