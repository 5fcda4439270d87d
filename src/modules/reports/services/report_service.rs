use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Result;
use crate::modules::reports::models::{GstSummary, PendingFilter, PendingPayment, ReceivedPayment};
use crate::modules::reports::repositories::{ReportRepository, SqliteReportRepository};

/// Read-only reporting facade over the aggregation queries.
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: Arc::new(SqliteReportRepository::new(pool)),
        }
    }

    pub fn with_repository(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn gst_summary(
        &self,
        financial_year: &str,
        month: Option<&str>,
    ) -> Result<GstSummary> {
        self.repository.gst_summary(financial_year, month).await
    }

    pub async fn pending_payments(&self, filter: &PendingFilter) -> Result<Vec<PendingPayment>> {
        self.repository.pending_payments(filter).await
    }

    pub async fn received_payments(
        &self,
        month: Option<&str>,
        financial_year: Option<&str>,
    ) -> Result<Vec<ReceivedPayment>> {
        self.repository.received_payments(month, financial_year).await
    }
}
