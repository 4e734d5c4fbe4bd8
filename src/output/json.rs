use crate::error::Result;
use crate::report::{HistoryReport, StatusReport};

use super::ReportFormatter;

/// Pretty-printed JSON of the report structs, newline terminated.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_status(&self, report: &StatusReport) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(report)?))
    }

    fn format_history(&self, report: &HistoryReport) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(report)?))
    }
}
