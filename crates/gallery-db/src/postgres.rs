use async_trait::async_trait;
use gallery_core::{AppError, ImageId, ImageRecord, ListFilter, PublishOutcome};
use sqlx::{PgPool, Postgres};
use std::time::Duration;

use crate::store::MetadataStore;
use crate::timeout::with_timeout;

const RECORD_COLUMNS: &str = "id, first_name, last_name, email, address, city, state, zip, \
                              filename, width, height, published, created_at, updated_at";

/// Repository for image records in PostgreSQL
#[derive(Clone)]
pub struct PgImageRecordRepository {
    pool: PgPool,
    operation_timeout: Duration,
}

impl PgImageRecordRepository {
    pub fn new(pool: PgPool, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }
}

fn map_insert_error(err: sqlx::Error, id: ImageId) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Internal(format!("Image record {} already exists", id));
        }
    }
    err.into()
}

#[async_trait]
impl MetadataStore for PgImageRecordRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "image_records", db.operation = "insert", db.record_id = %record.id))]
    async fn insert(&self, record: &ImageRecord) -> Result<ImageRecord, AppError> {
        let query = format!(
            r#"
            INSERT INTO image_records ({RECORD_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {RECORD_COLUMNS}
            "#
        );

        with_timeout("metadata insert", self.operation_timeout, async {
            sqlx::query_as::<Postgres, ImageRecord>(&query)
                .bind(record.id)
                .bind(&record.submitter.first_name)
                .bind(&record.submitter.last_name)
                .bind(&record.submitter.email)
                .bind(&record.submitter.address)
                .bind(&record.submitter.city)
                .bind(&record.submitter.state)
                .bind(&record.submitter.zip)
                .bind(&record.filename)
                .bind(record.width)
                .bind(record.height)
                .bind(record.published)
                .bind(record.created_at)
                .bind(record.updated_at)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_insert_error(e, record.id))
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(db.table = "image_records", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: ImageId) -> Result<Option<ImageRecord>, AppError> {
        let query = format!("SELECT {RECORD_COLUMNS} FROM image_records WHERE id = $1");

        with_timeout("metadata get", self.operation_timeout, async {
            let record = sqlx::query_as::<Postgres, ImageRecord>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok::<_, AppError>(record)
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(db.table = "image_records", db.operation = "update", db.record_id = %id))]
    async fn mark_published(&self, id: ImageId) -> Result<PublishOutcome, AppError> {
        with_timeout("metadata publish", self.operation_timeout, async {
            let updated = sqlx::query_scalar::<Postgres, ImageId>(
                r#"
                UPDATE image_records
                SET published = TRUE, updated_at = NOW()
                WHERE id = $1 AND published = FALSE
                RETURNING id
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            if updated.is_some() {
                return Ok(PublishOutcome::Published);
            }

            let exists = sqlx::query_scalar::<Postgres, bool>(
                "SELECT EXISTS(SELECT 1 FROM image_records WHERE id = $1)",
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

            if exists {
                Ok(PublishOutcome::AlreadyPublished)
            } else {
                Err(AppError::NotFound(format!("Image {} not found", id)))
            }
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(db.table = "image_records", db.operation = "select"))]
    async fn list_filenames(&self, filter: ListFilter) -> Result<Vec<String>, AppError> {
        with_timeout("metadata list", self.operation_timeout, async {
            let filenames = match filter.published() {
                None => {
                    sqlx::query_scalar::<Postgres, String>(
                        "SELECT filename FROM image_records ORDER BY created_at ASC",
                    )
                    .fetch_all(&self.pool)
                    .await?
                }
                Some(published) => {
                    sqlx::query_scalar::<Postgres, String>(
                        "SELECT filename FROM image_records WHERE published = $1 ORDER BY created_at ASC",
                    )
                    .bind(published)
                    .fetch_all(&self.pool)
                    .await?
                }
            };
            Ok::<_, AppError>(filenames)
        })
        .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        with_timeout("metadata ping", self.operation_timeout, async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok::<_, AppError>(())
        })
        .await
    }
}
