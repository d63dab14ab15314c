use page_builder_core::document::validate_document;
use page_builder_core::{MemoryPageStore, PageDocument, PageId, PageStore, SaveError};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::{ApiError, ApiResult};

/// Pages persisted as JSONB rows keyed by page id, with unique slugs.
#[derive(Debug, Clone)]
pub struct PgPageStore {
    pool: PgPool,
}

impl PgPageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn load(&self, slug: &str) -> Result<Option<PageDocument>, sqlx::Error> {
        let row: Option<(Json<PageDocument>,)> =
            sqlx::query_as("SELECT document FROM pages WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(Json(doc),)| doc))
    }
}

impl PageStore for PgPageStore {
    async fn save(&self, page: &PageDocument) -> Result<PageId, SaveError> {
        let id = if page.id.is_unsaved() {
            PageId::generate()
        } else {
            page.id.clone()
        };
        let mut stored = page.clone();
        stored.id = id.clone();

        sqlx::query(
            "INSERT INTO pages (page_id, slug, title, status, document, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now()) \
             ON CONFLICT (page_id) DO UPDATE SET \
               slug = EXCLUDED.slug, \
               title = EXCLUDED.title, \
               status = EXCLUDED.status, \
               document = EXCLUDED.document, \
               updated_at = now()",
        )
        .bind(id.as_str())
        .bind(&stored.slug)
        .bind(&stored.title)
        .bind(stored.status.as_str())
        .bind(Json(&stored))
        .execute(&self.pool)
        .await
        .map_err(|e| save_error(e, &stored.slug))?;
        Ok(id)
    }
}

/// A unique violation can only come from the slug column: page ids either
/// match the row being updated or are freshly minted.
fn save_error(err: sqlx::Error, slug: &str) -> SaveError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => SaveError::slug_taken(slug),
        _ => SaveError::Unavailable(err.to_string()),
    }
}

/// The persistence collaborator selected at startup.
#[derive(Debug)]
pub enum AppStore {
    Postgres(PgPageStore),
    Memory(MemoryPageStore),
}

impl AppStore {
    /// Fetch a saved page for hydration.
    pub async fn load(&self, slug: &str) -> ApiResult<Option<PageDocument>> {
        let page = match self {
            AppStore::Postgres(store) => store.load(slug).await?,
            AppStore::Memory(store) => store.load(slug).await,
        };
        if let Some(page) = &page {
            validate_document(page).map_err(|e| {
                ApiError::Internal(format!("stored page {slug} is invalid: {e}"))
            })?;
        }
        Ok(page)
    }

    pub fn backend(&self) -> &'static str {
        match self {
            AppStore::Postgres(_) => "postgres",
            AppStore::Memory(_) => "memory",
        }
    }

    /// Verify the backend is reachable.
    pub async fn ping(&self) -> ApiResult<()> {
        if let AppStore::Postgres(store) = self {
            sqlx::query("SELECT 1").execute(store.pool()).await?;
        }
        Ok(())
    }
}

impl PageStore for AppStore {
    async fn save(&self, page: &PageDocument) -> Result<PageId, SaveError> {
        match self {
            AppStore::Postgres(store) => store.save(page).await,
            AppStore::Memory(store) => store.save(page).await,
        }
    }
}
