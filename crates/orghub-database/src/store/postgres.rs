//! PostgreSQL document store backed by a single `jsonb` table.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use orghub_core::result::AppResult;
use orghub_core::traits::DocumentStore;
use orghub_core::types::{
    Document, FilterField, FilterOp, FilterValue, ID_FIELD, Predicate, ResourceKind,
};

use crate::connection::{DatabasePool, map_sqlx_error};

/// Document store persisting every collection in the `documents` table.
///
/// Each trait method issues exactly one statement (plus an existence probe
/// when a set update touches no rows), so single-document writes are atomic
/// and nothing else is.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store on top of an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a store sharing the connection pool of `db`.
    pub fn from_database(db: &DatabasePool) -> Self {
        Self::new(db.pool().clone())
    }

    async fn exists(&self, kind: ResourceKind, id: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM documents WHERE collection = $1 AND id = $2)",
        )
        .bind(kind.collection())
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to probe document", e))
    }
}

/// Append one predicate condition to a query under construction.
fn push_condition(qb: &mut QueryBuilder<'_, Postgres>, condition: &FilterField) {
    let field = condition.field.clone();
    match (condition.op, &condition.value) {
        (FilterOp::IsNull, _) | (FilterOp::Eq, FilterValue::Null) => {
            qb.push("COALESCE(body -> ");
            qb.push_bind(field);
            qb.push(", 'null'::jsonb) = 'null'::jsonb");
        }
        (FilterOp::Eq, value) => {
            qb.push("(body -> ");
            qb.push_bind(field);
            qb.push(") = ");
            qb.push_bind(Json(value.to_json()));
        }
        (FilterOp::Ne, value) => {
            qb.push("(body -> ");
            qb.push_bind(field);
            qb.push(") IS DISTINCT FROM ");
            qb.push_bind(Json(value.to_json()));
        }
        (FilterOp::IEq, FilterValue::String(value)) => {
            qb.push("lower(body ->> ");
            qb.push_bind(field);
            qb.push(") = lower(");
            qb.push_bind(value.clone());
            qb.push(")");
        }
        // A case-insensitive match against a non-string never matches.
        (FilterOp::IEq, _) => {
            qb.push("FALSE");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(|e| map_sqlx_error("Document store health check failed", e))
    }

    async fn find_many(
        &self,
        kind: ResourceKind,
        predicate: &Predicate,
    ) -> AppResult<Vec<Document>> {
        if predicate.is_deny_all() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT body FROM documents WHERE collection = ");
        qb.push_bind(kind.collection());
        for condition in predicate.conditions() {
            qb.push(" AND ");
            push_condition(&mut qb, condition);
        }
        qb.push(" ORDER BY created_at ASC, id ASC");

        let rows: Vec<(Json<Document>,)> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to query documents", e))?;

        debug!(collection = kind.collection(), matched = rows.len(), "find_many");
        Ok(rows.into_iter().map(|(Json(doc),)| doc).collect())
    }

    async fn find_one(&self, kind: ResourceKind, id: &str) -> AppResult<Option<Document>> {
        let row: Option<(Json<Document>,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(kind.collection())
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("Failed to find document", e))?;
        Ok(row.map(|(Json(doc),)| doc))
    }

    async fn insert(&self, kind: ResourceKind, id: &str, mut doc: Document) -> AppResult<()> {
        doc.insert(ID_FIELD.to_string(), serde_json::Value::String(id.to_string()));
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(kind.collection())
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&format!("Failed to insert {kind} {id}"), e))?;
        Ok(())
    }

    async fn update_fields(
        &self,
        kind: ResourceKind,
        id: &str,
        mut partial: Document,
    ) -> AppResult<bool> {
        partial.remove(ID_FIELD);
        let result = sqlx::query(
            "UPDATE documents SET body = body || $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(kind.collection())
        .bind(id)
        .bind(Json(partial))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update document", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, kind: ResourceKind, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(kind.collection())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete document", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_to_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET body = jsonb_set(
                 body,
                 ARRAY[$3::text],
                 COALESCE(
                     CASE WHEN jsonb_typeof(body -> $3::text) = 'array' THEN body -> $3::text END,
                     '[]'::jsonb
                 ) || jsonb_build_array($4::text),
                 true
             ),
             updated_at = NOW()
             WHERE collection = $1 AND id = $2
               AND NOT COALESCE((body -> $3::text) @> jsonb_build_array($4::text), false)",
        )
        .bind(kind.collection())
        .bind(id)
        .bind(field)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add set member", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        // Either the member was already present or the document is missing.
        self.exists(kind, id).await
    }

    async fn remove_from_set(
        &self,
        kind: ResourceKind,
        id: &str,
        field: &str,
        value: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET body = jsonb_set(
                 body,
                 ARRAY[$3::text],
                 COALESCE(
                     (SELECT jsonb_agg(member)
                        FROM jsonb_array_elements(body -> $3::text) AS member
                       WHERE member <> to_jsonb($4::text)),
                     '[]'::jsonb
                 )
             ),
             updated_at = NOW()
             WHERE collection = $1 AND id = $2
               AND jsonb_typeof(body -> $3::text) = 'array'",
        )
        .bind(kind.collection())
        .bind(id)
        .bind(field)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to remove set member", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        self.exists(kind, id).await
    }
}
