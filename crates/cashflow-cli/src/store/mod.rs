//! Local statement store: one JSON record per owner.

mod file_io;

use std::path::{Path, PathBuf};

use cashflow_core::FinancialData;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use file_io::{read_json_optional, write_json_atomic};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid owner id '{0}': must contain a letter or digit")]
    InvalidOwner(String),

    #[error("Could not determine a default store directory; pass --store-dir")]
    NoDefaultDir,
}

/// A company's statement as kept on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredStatement {
    pub owner: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub fiscal_year: String,
    #[serde(default)]
    pub financial_data: FinancialData,
    pub updated_at: DateTime<Utc>,
}

impl StoredStatement {
    /// A fresh record with every field entered as zero.
    pub fn new(owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            company_name: String::new(),
            fiscal_year: String::new(),
            financial_data: FinancialData::cleared(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatementStore {
    dir: PathBuf,
}

impl StatementStore {
    /// Open the store at `dir`, or at the platform data directory.
    pub fn open(dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let dir = match dir {
            Some(dir) => dir,
            None => default_dir()?,
        };
        debug!(dir = %dir.display(), "opened statement store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, owner: &str) -> Result<PathBuf, StoreError> {
        Ok(self.dir.join(format!("{}.json", sanitize_owner(owner)?)))
    }

    pub fn load(&self, owner: &str) -> Result<Option<StoredStatement>, StoreError> {
        read_json_optional(self.path_for(owner)?)
    }

    /// Load the owner's record, inserting an all-zero one when none exists.
    /// The flag is true when the record was created.
    pub fn load_or_create(&self, owner: &str) -> Result<(StoredStatement, bool), StoreError> {
        if let Some(record) = self.load(owner)? {
            return Ok((record, false));
        }

        let mut record = StoredStatement::new(owner);
        self.save(&mut record)?;
        info!(owner, "created statement");
        Ok((record, true))
    }

    /// Stamp `updated_at` and write the record.
    pub fn save(&self, record: &mut StoredStatement) -> Result<(), StoreError> {
        record.updated_at = Utc::now();
        let path = self.path_for(&record.owner)?;
        write_json_atomic(&path, record)?;
        debug!(path = %path.display(), "saved statement");
        Ok(())
    }
}

fn default_dir() -> Result<PathBuf, StoreError> {
    ProjectDirs::from("", "", "cfs")
        .map(|dirs| dirs.data_dir().join("statements"))
        .ok_or(StoreError::NoDefaultDir)
}

/// Map an owner id to a file stem: letters, digits, `-` and `_` are kept,
/// anything else becomes `_`.
pub fn sanitize_owner(owner: &str) -> Result<String, StoreError> {
    let trimmed = owner.trim();
    if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(StoreError::InvalidOwner(owner.to_string()));
    }

    Ok(trimmed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect())
}
