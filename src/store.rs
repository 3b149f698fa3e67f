use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{Document, RawVideo};

/// Top-level shape of the published index file.
#[derive(Debug, Deserialize)]
struct Payload {
    docs: Vec<RawVideo>,
}

/// The loaded collection, in feed order. Never mutated after construction.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn new(raw: Vec<RawVideo>) -> Self {
        Self {
            docs: raw.into_iter().map(Document::new).collect(),
        }
    }

    /// Parse a whole `{ "docs": [...] }` payload. Any structural error
    /// rejects the payload entirely; there is no partial store.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: Payload =
            serde_json::from_str(json).context("Malformed search index payload")?;
        Ok(Self::new(payload.docs))
    }

    /// Read and parse the index file once. No retry.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read search index {}", path.display()))?;
        let store = Self::from_json(&json)?;
        tracing::info!("Loaded {} documents from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Lifecycle of the store for one session.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Ready(Arc<DocumentStore>),
    Failed(String),
}

impl LoadState {
    /// The store, if loading succeeded.
    pub fn store(&self) -> Option<&Arc<DocumentStore>> {
        match self {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::Unloaded => LoadPhase::Unloaded,
            LoadState::Loading => LoadPhase::Loading,
            LoadState::Ready(_) => LoadPhase::Ready,
            LoadState::Failed(_) => LoadPhase::Failed,
        }
    }
}

/// Serializable tag of a [`LoadState`], reported to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    Unloaded,
    Loading,
    Ready,
    Failed,
}
