//! Remote manifest storage.
//!
//! The manifest lives in a GitHub repository and is read and written through the
//! contents API. Every read returns the blob sha alongside the parsed manifest, and
//! every write hands that sha back so GitHub refuses the write if someone else
//! changed the file in between.

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{header::ACCEPT, StatusCode};
use serde::{Deserialize, Serialize};
use serenity::async_trait;

use crate::{
    error::update::UpdateError,
    model::manifest::{Manifest, RevisionToken},
};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Storage holding the manifest with revision-checked writes.
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Reads the current manifest together with the revision it was read at.
    ///
    /// # Returns
    /// - `Ok((Manifest, RevisionToken))` - Parsed manifest and its revision
    /// - `Err(UpdateError::UpstreamUnavailable)` - Store answered without usable content
    /// - `Err(UpdateError::MalformedManifest)` - Content isn't a valid manifest
    /// - `Err(UpdateError::Transport)` - Network failure
    async fn fetch(&self) -> Result<(Manifest, RevisionToken), UpdateError>;

    /// Replaces the manifest contents if the store is still at `revision`.
    ///
    /// # Arguments
    /// - `content` - Full serialized manifest
    /// - `message` - Commit message
    /// - `revision` - Revision obtained from the `fetch` this write is based on
    ///
    /// # Returns
    /// - `Ok(RevisionToken)` - Revision after the write
    /// - `Err(UpdateError::Conflict)` - The store moved past `revision`; nothing was written
    /// - `Err(UpdateError::WriteRejected)` - Write refused for another reason
    async fn write(
        &self,
        content: &str,
        message: &str,
        revision: &RevisionToken,
    ) -> Result<RevisionToken, UpdateError>;
}

#[derive(Deserialize)]
struct ContentResponse {
    content: Option<String>,
    sha: Option<String>,
}

#[derive(Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
}

#[derive(Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Deserialize)]
struct WrittenContent {
    sha: String,
}

/// Manifest store backed by a file in a GitHub repository.
#[derive(Clone)]
pub struct GithubManifestStore {
    client: reqwest::Client,
    /// Full contents API URL of the manifest file.
    endpoint: String,
    token: String,
}

impl GithubManifestStore {
    /// Creates a new GithubManifestStore.
    ///
    /// # Arguments
    /// - `client` - Shared HTTP client (must send a User-Agent, GitHub requires one)
    /// - `endpoint` - `https://api.github.com/repos/<owner>/<repo>/contents/<path>`
    /// - `token` - Token with contents write access to the repository
    pub fn new(client: reqwest::Client, endpoint: String, token: String) -> Self {
        Self {
            client,
            endpoint,
            token,
        }
    }
}

#[async_trait]
impl ManifestStore for GithubManifestStore {
    async fn fetch(&self) -> Result<(Manifest, RevisionToken), UpdateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("invalid github response ({}): {}", status, body);
            return Err(UpdateError::UpstreamUnavailable);
        }

        let file = match serde_json::from_str::<ContentResponse>(&body) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("invalid github response ({}): {}", e, body);
                return Err(UpdateError::UpstreamUnavailable);
            }
        };

        let (Some(content), Some(sha)) = (file.content, file.sha) else {
            tracing::error!("invalid github response, missing content or sha: {}", body);
            return Err(UpdateError::UpstreamUnavailable);
        };

        // Files over 1 MB come back with an empty `content` and have to be fetched
        // through the blob API instead
        if content.trim().is_empty() {
            tracing::error!("github returned no content for the manifest at {}", sha);
            return Err(UpdateError::UpstreamUnavailable);
        }

        let manifest = Manifest::from_json(&decode_content(&content)?)?;

        tracing::debug!(
            "Fetched manifest with {} entries at revision {}",
            manifest.entries.len(),
            sha
        );

        Ok((manifest, RevisionToken::new(sha)))
    }

    async fn write(
        &self,
        content: &str,
        message: &str,
        revision: &RevisionToken,
    ) -> Result<RevisionToken, UpdateError> {
        let request = WriteRequest {
            message,
            content: STANDARD.encode(content),
            sha: revision.as_str(),
        };

        let response = self
            .client
            .put(&self.endpoint)
            .header(ACCEPT, GITHUB_ACCEPT)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let written: WriteResponse = response.json().await?;
            return Ok(RevisionToken::new(written.content.sha));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("github rejected manifest write ({}): {}", status, body);

        // GitHub answers 409 when `sha` no longer names the current blob
        if status == StatusCode::CONFLICT {
            Err(UpdateError::Conflict)
        } else {
            Err(UpdateError::WriteRejected { status, body })
        }
    }
}

/// Decodes the contents API base64 payload, which GitHub wraps at 60 columns.
pub fn decode_content(content: &str) -> Result<Vec<u8>, UpdateError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}
