use super::{Formatter, iso8601_timestamp};
use crate::analysis::ResponseSummary;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, source: &str, summary: &ResponseSummary) -> String {
        format!(
            "{},{},{},{:.6},{:.3},{:.6e},{:.1},{}",
            iso8601_timestamp(),
            source,
            summary.peak.lag,
            summary.peak.value,
            summary.peak.time_ms,
            summary.noise_floor_rms,
            summary.peak_to_noise_db,
            summary.lags
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,source,peak_lag,peak_value,peak_ms,noise_rms,peak_to_noise_db,lags")
    }
}
