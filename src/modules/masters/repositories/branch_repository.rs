use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::masters::models::{Branch, NewBranch};

/// Repository for bank branch records.
pub struct BranchRepository {
    pool: SqlitePool,
}

impl BranchRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a branch. (bank_name, branch_name) is the identity; a
    /// duplicate pair is rejected as a validation failure.
    pub async fn create(&self, branch: &NewBranch) -> Result<i64> {
        if branch.branch_name.trim().is_empty() || branch.bank_name.trim().is_empty() {
            return Err(AppError::validation(
                "Bank name and branch name are required",
            ));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO branches (branch_name, city, bank_name, ifsc_code, account_number)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&branch.branch_name)
        .bind(&branch.city)
        .bind(&branch.bank_name)
        .bind(&branch.ifsc_code)
        .bind(&branch.account_number)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_sqlx(
                e,
                format!(
                    "Branch '{}' of bank '{}' already exists",
                    branch.branch_name, branch.bank_name
                ),
            )
        })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Branch>> {
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, branch_name, city, bank_name, ifsc_code, account_number, created_at
            FROM branches
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BranchRow::into_branch))
    }

    pub async fn list(&self) -> Result<Vec<Branch>> {
        let rows = sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, branch_name, city, bank_name, ifsc_code, account_number, created_at
            FROM branches
            ORDER BY bank_name, branch_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BranchRow::into_branch).collect())
    }

    /// Distinct bank names, for selection lists.
    pub async fn list_banks(&self) -> Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT bank_name FROM branches ORDER BY bank_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Distinct cities, for selection lists.
    pub async fn list_cities(&self) -> Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT city FROM branches ORDER BY city",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BranchRow {
    id: i64,
    branch_name: String,
    city: String,
    bank_name: String,
    ifsc_code: String,
    account_number: String,
    created_at: Option<NaiveDateTime>,
}

impl BranchRow {
    fn into_branch(self) -> Branch {
        Branch {
            id: self.id,
            branch_name: self.branch_name,
            city: self.city,
            bank_name: self.bank_name,
            ifsc_code: self.ifsc_code,
            account_number: self.account_number,
            created_at: self.created_at,
        }
    }
}
