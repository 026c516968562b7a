mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::analysis::ResponseSummary;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub trait Formatter: Send {
    /// Render the summary of the response estimated from `source`
    fn format(&self, source: &str, summary: &ResponseSummary) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::analysis::ResponseSummary;

    pub fn summary() -> ResponseSummary {
        let resp = [2.0, 0.4, 0.0, 0.0, -0.01, 0.0, 0.0, 0.0];
        ResponseSummary::from_response(&resp, 1000, 2).unwrap()
    }
}
