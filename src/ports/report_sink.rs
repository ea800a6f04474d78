//! Report Sink Port - destination for finished candidate reports.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::screening::CandidateReport;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportSinkError {
    #[error("Failed to serialize report: {0}")]
    Serialization(String),

    #[error("Failed to deliver report: {0}")]
    Delivery(String),
}

/// Receives the report once, when an interview ends with a profile on record.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn publish(
        &self,
        session_id: SessionId,
        report: &CandidateReport,
    ) -> Result<(), ReportSinkError>;
}
