//! Report sinks that keep the report in-process.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::screening::CandidateReport;
use crate::ports::{ReportSink, ReportSinkError};

/// Emits each report as one structured `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReportSink;

#[async_trait]
impl ReportSink for TracingReportSink {
    async fn publish(
        &self,
        session_id: SessionId,
        report: &CandidateReport,
    ) -> Result<(), ReportSinkError> {
        let json = serde_json::to_string(report)
            .map_err(|e| ReportSinkError::Serialization(e.to_string()))?;

        tracing::info!(
            session_id = %session_id,
            candidate = %report.name,
            questions = report.questions.len(),
            correct = report.correct_count(),
            ended_by_candidate = report.ended_by_candidate,
            report = %json,
            "candidate report"
        );
        Ok(())
    }
}

/// Keeps published reports in memory for inspection.
#[derive(Debug, Clone, Default)]
pub struct CollectingReportSink {
    reports: Arc<Mutex<Vec<(SessionId, CandidateReport)>>>,
}

impl CollectingReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reports(&self) -> Vec<(SessionId, CandidateReport)> {
        self.reports.lock().await.clone()
    }

    pub async fn report_for(&self, session_id: SessionId) -> Option<CandidateReport> {
        self.reports
            .lock()
            .await
            .iter()
            .find(|(id, _)| *id == session_id)
            .map(|(_, report)| report.clone())
    }
}

#[async_trait]
impl ReportSink for CollectingReportSink {
    async fn publish(
        &self,
        session_id: SessionId,
        report: &CandidateReport,
    ) -> Result<(), ReportSinkError> {
        self.reports.lock().await.push((session_id, report.clone()));
        Ok(())
    }
}
