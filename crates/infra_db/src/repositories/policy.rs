//! Policy repository implementation
//!
//! This module holds the SQL for the `policies` table. Rows are returned as
//! `PolicyRow`, with the policy type as its stored name; conversion to
//! domain types happens in the adapter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use domain_policy::{PolicyQuery, SortBy};

use crate::error::DatabaseError;

const POLICY_COLUMNS: &str = "id, policy_number, holder_name, policy_type, \
     start_date, end_date, premium, created_at, updated_at";

/// Repository for the `policies` table
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::repositories::PolicyRepository;
///
/// let repo = PolicyRepository::new(pool);
/// let row = repo.get(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the rows matching a listing query, in the query's order
    ///
    /// Search uses `strpos` on lowercased columns, so `%` and `_` in the
    /// search text are matched literally.
    pub async fn list(&self, query: &PolicyQuery) -> Result<Vec<PolicyRow>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {POLICY_COLUMNS} FROM policies"));
        let mut has_where = false;

        if let Some(search) = query.search() {
            builder
                .push(" WHERE (strpos(lower(policy_number), ")
                .push_bind(search.to_string())
                .push(") > 0 OR strpos(lower(holder_name), ")
                .push_bind(search.to_string())
                .push(") > 0)");
            has_where = true;
        }

        if let Some(policy_type) = query.policy_type() {
            builder
                .push(if has_where { " AND " } else { " WHERE " })
                .push("policy_type = ")
                .push_bind(policy_type.as_str());
        }

        builder.push(order_by(query.sort_by()));

        let rows = builder
            .build_query_as::<PolicyRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Retrieves a row by id
    pub async fn get(&self, id: i64) -> Result<Option<PolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves the row holding a policy number
    pub async fn find_by_policy_number(
        &self,
        policy_number: &str,
    ) -> Result<Option<PolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE policy_number = $1"
        ))
        .bind(policy_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a row and returns it with its generated id
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the policy number is taken
    pub async fn insert(&self, policy: NewPolicyRow) -> Result<PolicyRow, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            r#"
            INSERT INTO policies (
                policy_number,
                holder_name,
                policy_type,
                start_date,
                end_date,
                premium,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {POLICY_COLUMNS}
            "#
        ))
        .bind(&policy.policy_number)
        .bind(&policy.holder_name)
        .bind(&policy.policy_type)
        .bind(policy.start_date)
        .bind(policy.end_date)
        .bind(policy.premium)
        .bind(policy.created_at)
        .bind(policy.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Writes the mutable columns of an existing row
    ///
    /// `policy_number` and `created_at` are never part of the update.
    /// Returns `None` if no row has the id.
    pub async fn update(&self, policy: &PolicyRow) -> Result<Option<PolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            r#"
            UPDATE policies
            SET holder_name = $2,
                policy_type = $3,
                start_date = $4,
                end_date = $5,
                premium = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING {POLICY_COLUMNS}
            "#
        ))
        .bind(policy.id)
        .bind(&policy.holder_name)
        .bind(&policy.policy_type)
        .bind(policy.start_date)
        .bind(policy.end_date)
        .bind(policy.premium)
        .bind(policy.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Deletes a row, returning whether one was removed
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// ORDER BY clause for a sort key
///
/// Holder names sort bytewise (`COLLATE "C"`), matching in-memory ordering.
/// The id breaks ties so listings are deterministic.
fn order_by(sort_by: SortBy) -> &'static str {
    match sort_by {
        SortBy::StartDateDesc => " ORDER BY start_date DESC, id DESC",
        SortBy::PremiumDesc => " ORDER BY premium DESC, id DESC",
        SortBy::HolderNameAsc => r#" ORDER BY holder_name COLLATE "C" ASC, id DESC"#,
        SortBy::CreatedAtDesc => " ORDER BY created_at DESC, id DESC",
    }
}

/// Database row representation of a policy
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PolicyRow {
    pub id: i64,
    pub policy_number: String,
    pub holder_name: String,
    pub policy_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub premium: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a new policy row
#[derive(Debug, Clone)]
pub struct NewPolicyRow {
    pub policy_number: String,
    pub holder_name: String,
    pub policy_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub premium: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
