//! Candidate report sinks.

mod tracing_report_sink;

pub use tracing_report_sink::{CollectingReportSink, TracingReportSink};
