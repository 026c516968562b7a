use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::analysis::ResponseSummary;

pub struct JsonFormatter;

#[derive(Serialize)]
struct Record<'a> {
    ts: String,
    source: &'a str,
    #[serde(flatten)]
    summary: &'a ResponseSummary,
}

impl Formatter for JsonFormatter {
    fn format(&self, source: &str, summary: &ResponseSummary) -> String {
        let record = Record {
            ts: iso8601_timestamp(),
            source,
            summary,
        };
        // Plain numbers and strings only, serialization cannot fail
        serde_json::to_string(&record).unwrap_or_default()
    }
}
