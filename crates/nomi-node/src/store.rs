//! In-memory score store with JSON export.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use nomi_core::error::StorageError;
use nomi_core::traits::ScoreStore;
use nomi_core::types::{Release, Score, ScoreMetadata};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Everything the store holds, in export form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreContents {
    pub latest_release: Option<Release>,
    pub metadata: Option<ScoreMetadata>,
    /// Latest score per stash.
    pub scores: BTreeMap<String, Score>,
}

/// [`ScoreStore`] holding the most recent metadata and one score per stash.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    inner: RwLock<StoreContents>,
}

impl MemoryScoreStore {
    pub fn new(latest_release: Option<Release>) -> Self {
        Self {
            inner: RwLock::new(StoreContents {
                latest_release,
                ..StoreContents::default()
            }),
        }
    }

    pub fn contents(&self) -> StoreContents {
        self.inner.read().clone()
    }

    pub fn score(&self, stash: &str) -> Option<Score> {
        self.inner.read().scores.get(stash).cloned()
    }

    /// Write the current contents to `path` as pretty-printed JSON.
    pub fn export(&self, path: &Path) -> Result<(), NodeError> {
        let json = serde_json::to_vec_pretty(&self.contents())?;
        std::fs::write(path, json).map_err(|e| NodeError::io(path, e))
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn latest_release(&self) -> Result<Option<Release>, StorageError> {
        Ok(self.inner.read().latest_release.clone())
    }

    async fn set_score_metadata(&self, metadata: &ScoreMetadata) -> Result<(), StorageError> {
        self.inner.write().metadata = Some(metadata.clone());
        Ok(())
    }

    async fn set_validator_score(&self, score: &Score) -> Result<(), StorageError> {
        self.inner
            .write()
            .scores
            .insert(score.stash.clone(), score.clone());
        Ok(())
    }
}
