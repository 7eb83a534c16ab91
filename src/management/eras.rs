use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{config, error::EraError, types::Detection};

/// The last detection run, as written by `eras detect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDetection {
    pub strategy: String,
    pub detected_at: DateTime<Utc>,
    pub detection: Detection,
}

pub struct EraManager {
    path: PathBuf,
}

impl EraManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_path() -> Self {
        Self::new(config::data_dir().join("cache").join("eras.json"))
    }

    pub async fn persist(&self, saved: &SavedDetection) -> Result<(), EraError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(saved)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns `None` when no detection has been saved yet.
    pub async fn load(&self) -> Result<Option<SavedDetection>, EraError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
