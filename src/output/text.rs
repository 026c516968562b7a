use super::Formatter;
use crate::analysis::ResponseSummary;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, source: &str, summary: &ResponseSummary) -> String {
        let mut out = format!(
            "{}: peak {:>+9.5} at lag {} ({:.3} ms), noise {:.2e} rms, PNR {:.1} dB",
            source,
            summary.peak.value,
            summary.peak.lag,
            summary.peak.time_ms,
            summary.noise_floor_rms,
            summary.peak_to_noise_db
        );
        if self.verbose {
            for tap in &summary.taps {
                out.push_str(&format!(
                    "\n  lag {:>7} ({:>9.3} ms): {:>+10.6}",
                    tap.lag, tap.time_ms, tap.value
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::summary;

    #[test]
    fn test_verbose_lists_taps() {
        let brief = TextFormatter::new(false).format("x", &summary());
        let verbose = TextFormatter::new(true).format("x", &summary());
        assert_eq!(brief.lines().count(), 1);
        assert_eq!(verbose.lines().count(), 3);
        assert!(brief.contains("at lag 0"));
    }
}
