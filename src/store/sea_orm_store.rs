use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{self, NotSet};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, SqlErr,
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use super::entities::dictionary_entry::{self, Column as DictCol, Entity as Dictionary};
use super::entities::saved_result;
use super::migration::Migrator;
use super::{
    required, DictionaryEntry, DictionaryPatch, DictionaryStore, NewDictionaryEntry,
    NewSavedResult, SavedResult, StoreError,
};

/// SeaORM-backed store (SQLite or Postgres, picked by the connection URL).
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let db = Database::connect(url).await?;
        Ok(Self { db })
    }

    /// Bring the schema up to date.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        Migrator::up(&self.db, None).await?;
        info!("database schema is up to date");
        Ok(())
    }

    /// Persist a finished rewrite. No route calls this yet.
    pub async fn save_result(&self, new: NewSavedResult) -> Result<SavedResult, StoreError> {
        let row = saved_result::ActiveModel {
            id: NotSet,
            original_text: Set(required("originalText", Some(new.original_text))?),
            simplified_text: Set(required("simplifiedText", Some(new.simplified_text))?),
            target_audience: Set(required("targetAudience", Some(new.target_audience))?),
            output_format: Set(required("outputFormat", Some(new.output_format))?),
            created_at: Set(new.created_at.unwrap_or_else(Utc::now)),
        };
        Ok(row.insert(&self.db).await?.into())
    }

    async fn find_by_term(&self, term: &str) -> Result<Option<dictionary_entry::Model>, StoreError> {
        Ok(Dictionary::find()
            .filter(DictCol::OriginalTerm.eq(term))
            .one(&self.db)
            .await?)
    }
}

// the unique index can still fire if two inserts race past the lookup
fn unique_violation(err: DbErr, term: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate(term.to_string()),
        _ => StoreError::Database(err),
    }
}

// term a pending write would store
fn written_term(am: &dictionary_entry::ActiveModel, current: &str) -> String {
    match &am.original_term {
        ActiveValue::Set(term) => term.clone(),
        _ => current.to_string(),
    }
}

#[async_trait]
impl DictionaryStore for SeaOrmStore {
    async fn list(&self) -> Result<Vec<DictionaryEntry>, StoreError> {
        let rows = Dictionary::find()
            .order_by_asc(DictCol::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, entry: NewDictionaryEntry) -> Result<DictionaryEntry, StoreError> {
        let original_term = required("originalTerm", entry.original_term)?;
        let simplified_term = required("simplifiedTerm", entry.simplified_term)?;

        if self.find_by_term(&original_term).await?.is_some() {
            return Err(StoreError::Duplicate(original_term));
        }

        let created = dictionary_entry::ActiveModel {
            id: NotSet,
            original_term: Set(original_term.clone()),
            simplified_term: Set(simplified_term),
        }
        .insert(&self.db)
        .await
        .map_err(|e| unique_violation(e, &original_term))?;

        debug!(id = created.id, term = %created.original_term, "dictionary entry created");
        Ok(created.into())
    }

    async fn update(&self, id: i32, patch: DictionaryPatch) -> Result<DictionaryEntry, StoreError> {
        let Some(found) = Dictionary::find_by_id(id).one(&self.db).await? else {
            return Err(StoreError::NotFound(id));
        };

        let mut am = found.clone().into_active_model();
        let mut changed = false;

        if let Some(term) = patch.original_term {
            let term = required("originalTerm", Some(term))?;
            if term != found.original_term && self.find_by_term(&term).await?.is_some() {
                return Err(StoreError::Duplicate(term));
            }
            am.original_term = Set(term);
            changed = true;
        }
        if let Some(simplified) = patch.simplified_term {
            am.simplified_term = Set(required("simplifiedTerm", Some(simplified))?);
            changed = true;
        }

        if !changed {
            return Ok(found.into());
        }

        let term = written_term(&am, &found.original_term);
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| unique_violation(e, &term))?;
        debug!(id, "dictionary entry updated");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let res = Dictionary::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "dictionary entry deleted");
        Ok(())
    }
}
