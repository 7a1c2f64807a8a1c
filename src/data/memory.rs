//! In-memory `ManifestStore` used by service tests.
//!
//! Behaves like the GitHub contents API: every successful write bumps the revision,
//! and a write against any revision other than the current one is refused.

use std::sync::Mutex;

use serde_json::Value;
use serenity::async_trait;

use crate::{
    data::manifest::ManifestStore,
    error::update::UpdateError,
    model::manifest::{Manifest, RevisionToken},
};

struct StoredFile {
    content: String,
    revision: u64,
    /// Content another writer commits right after the next fetch.
    interleaved: Option<String>,
    unavailable: bool,
    writes: Vec<String>,
}

pub struct InMemoryManifestStore {
    file: Mutex<StoredFile>,
}

impl InMemoryManifestStore {
    /// Creates a store holding `manifest` at revision 1.
    pub fn new(manifest: Value) -> Self {
        Self {
            file: Mutex::new(StoredFile {
                content: manifest.to_string(),
                revision: 1,
                interleaved: None,
                unavailable: false,
                writes: Vec::new(),
            }),
        }
    }

    fn token(revision: u64) -> RevisionToken {
        RevisionToken::new(format!("rev-{}", revision))
    }

    /// Raw stored content.
    pub fn content(&self) -> String {
        self.file.lock().unwrap().content.clone()
    }

    /// Stored content parsed back into JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.content()).unwrap()
    }

    pub fn current_revision(&self) -> RevisionToken {
        Self::token(self.file.lock().unwrap().revision)
    }

    /// Commit messages of every accepted write, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.file.lock().unwrap().writes.clone()
    }

    /// Simulates another writer committing `manifest` between our fetch and write.
    pub fn interleave_write(&self, manifest: Value) {
        self.file.lock().unwrap().interleaved = Some(manifest.to_string());
    }

    /// Makes every fetch answer without content.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.file.lock().unwrap().unavailable = unavailable;
    }
}

#[async_trait]
impl ManifestStore for InMemoryManifestStore {
    async fn fetch(&self) -> Result<(Manifest, RevisionToken), UpdateError> {
        let mut file = self.file.lock().unwrap();

        if file.unavailable {
            return Err(UpdateError::UpstreamUnavailable);
        }

        let manifest = Manifest::from_json(file.content.as_bytes())?;
        let token = Self::token(file.revision);

        if let Some(content) = file.interleaved.take() {
            file.content = content;
            file.revision += 1;
        }

        Ok((manifest, token))
    }

    async fn write(
        &self,
        content: &str,
        message: &str,
        revision: &RevisionToken,
    ) -> Result<RevisionToken, UpdateError> {
        let mut file = self.file.lock().unwrap();

        if *revision != Self::token(file.revision) {
            return Err(UpdateError::Conflict);
        }

        file.content = content.to_string();
        file.revision += 1;
        file.writes.push(message.to_string());

        Ok(Self::token(file.revision))
    }
}
