use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::masters::models::{NewOffice, Office, OfficeStatus};

/// Repository for office master records.
pub struct OfficeRepository {
    pool: SqlitePool,
}

impl OfficeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, office: &NewOffice) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO offices (firm_name, address, gstin, pan, email, is_active)
            VALUES (?, ?, ?, ?, ?, 1)
            "#,
        )
        .bind(&office.firm_name)
        .bind(&office.address)
        .bind(&office.gstin)
        .bind(&office.pan)
        .bind(&office.email)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Office>> {
        let row = sqlx::query_as::<_, OfficeRow>(
            r#"
            SELECT id, firm_name, address, gstin, pan, email, is_active
            FROM offices
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OfficeRow::into_office))
    }

    /// Offices offered for selection; archived ones stay out.
    pub async fn list_active(&self) -> Result<Vec<Office>> {
        let rows = sqlx::query_as::<_, OfficeRow>(
            r#"
            SELECT id, firm_name, address, gstin, pan, email, is_active
            FROM offices
            WHERE is_active = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OfficeRow::into_office).collect())
    }

    pub async fn update(&self, id: i64, office: &NewOffice) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE offices
            SET firm_name = ?, address = ?, gstin = ?, pan = ?, email = ?
            WHERE id = ?
            "#,
        )
        .bind(&office.firm_name)
        .bind(&office.address)
        .bind(&office.gstin)
        .bind(&office.pan)
        .bind(&office.email)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Office with id {} not found", id)));
        }

        Ok(())
    }

    /// Soft delete. Invoices keep their office reference.
    pub async fn archive(&self, id: i64) -> Result<()> {
        let result = sqlx::query("UPDATE offices SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Office with id {} not found", id)));
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OfficeRow {
    id: i64,
    firm_name: String,
    address: String,
    gstin: String,
    pan: String,
    email: Option<String>,
    is_active: i64,
}

impl OfficeRow {
    fn into_office(self) -> Office {
        Office {
            id: self.id,
            firm_name: self.firm_name,
            address: self.address,
            gstin: self.gstin,
            pan: self.pan,
            email: self.email,
            status: OfficeStatus::from_flag(self.is_active),
        }
    }
}
