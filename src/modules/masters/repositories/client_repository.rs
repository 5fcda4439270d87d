use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::masters::models::{Client, ClientUpdate, Gstin};

/// Repository for client master records, keyed by GSTIN.
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a client. The GSTIN is validated here; a duplicate key is a
    /// validation failure, never a silent overwrite of another client.
    pub async fn create(&self, gstin: &Gstin, details: &ClientUpdate) -> Result<()> {
        if details.client_name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        sqlx::query(
            r#"
            INSERT INTO clients (gstin, client_name, address, email, phone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(gstin.as_str())
        .bind(&details.client_name)
        .bind(&details.address)
        .bind(&details.email)
        .bind(&details.phone)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_sqlx(e, format!("Client with GSTIN '{}' already exists", gstin))
        })?;

        Ok(())
    }

    pub async fn find_by_gstin(&self, gstin: &str) -> Result<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT gstin, client_name, address, email, phone, created_at
            FROM clients
            WHERE gstin = ?
            "#,
        )
        .bind(gstin)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ClientRow::into_client))
    }

    pub async fn list(&self) -> Result<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT gstin, client_name, address, email, phone, created_at
            FROM clients
            ORDER BY client_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ClientRow::into_client).collect())
    }

    /// Update the mutable attributes. The GSTIN key itself never changes.
    pub async fn update(&self, gstin: &str, details: &ClientUpdate) -> Result<()> {
        if details.client_name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET client_name = ?, address = ?, email = ?, phone = ?
            WHERE gstin = ?
            "#,
        )
        .bind(&details.client_name)
        .bind(&details.address)
        .bind(&details.email)
        .bind(&details.phone)
        .bind(gstin)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Client with GSTIN '{}' not found",
                gstin
            )));
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    gstin: String,
    client_name: String,
    address: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    created_at: Option<NaiveDateTime>,
}

impl ClientRow {
    fn into_client(self) -> Client {
        Client {
            gstin: self.gstin,
            client_name: self.client_name,
            address: self.address,
            email: self.email,
            phone: self.phone,
            created_at: self.created_at,
        }
    }
}
