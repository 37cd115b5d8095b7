//! Persistence for dictionary entries and saved results.
//!
//! Handlers only see the [`DictionaryStore`] trait; [`SeaOrmStore`] is the
//! SQLite/Postgres implementation used by `serve`.

pub mod entities;
pub mod migration;
mod sea_orm_store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use sea_orm_store::SeaOrmStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub id: i32,
    pub original_term: String,
    pub simplified_term: String,
}

impl DictionaryEntry {
    pub fn new(id: i32, original_term: &str, simplified_term: &str) -> Self {
        Self {
            id,
            original_term: original_term.to_string(),
            simplified_term: simplified_term.to_string(),
        }
    }
}

impl From<entities::dictionary_entry::Model> for DictionaryEntry {
    fn from(m: entities::dictionary_entry::Model) -> Self {
        Self {
            id: m.id,
            original_term: m.original_term,
            simplified_term: m.simplified_term,
        }
    }
}

/// Insert payload. Fields are optional so that a missing field is reported
/// by the store as a validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDictionaryEntry {
    pub original_term: Option<String>,
    pub simplified_term: Option<String>,
}

/// Partial update: only the fields present are changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryPatch {
    pub original_term: Option<String>,
    pub simplified_term: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResult {
    pub id: i32,
    pub original_text: String,
    pub simplified_text: String,
    pub target_audience: String,
    pub output_format: String,
    pub created_at: DateTime<Utc>,
}

impl From<entities::saved_result::Model> for SavedResult {
    fn from(m: entities::saved_result::Model) -> Self {
        Self {
            id: m.id,
            original_text: m.original_text,
            simplified_text: m.simplified_text,
            target_audience: m.target_audience,
            output_format: m.output_format,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewSavedResult {
    pub original_text: String,
    pub simplified_text: String,
    pub target_audience: String,
    pub output_format: String,
    /// Defaults to the insert time
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("A dictionary entry for '{0}' already exists")]
    Duplicate(String),

    #[error("Dictionary entry {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// All entries, ordered by id.
    async fn list(&self) -> Result<Vec<DictionaryEntry>, StoreError>;

    async fn insert(&self, entry: NewDictionaryEntry) -> Result<DictionaryEntry, StoreError>;

    async fn update(&self, id: i32, patch: DictionaryPatch) -> Result<DictionaryEntry, StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

/// Dictionary context for a prompt. A failing store is logged and treated as empty.
pub async fn load_dictionary(store: &dyn DictionaryStore) -> Vec<DictionaryEntry> {
    match store.list().await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Dictionary lookup failed, continuing without it: {}", e);
            Vec::new()
        }
    }
}

/// Present and non-empty, or a `MissingField` error.
pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, StoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(StoreError::MissingField(field))
}
