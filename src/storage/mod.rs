pub mod csv;
pub mod tables;
pub mod wav;

use std::path::Path;

use crate::error::Result;

pub use tables::{MLS_FILE, STIMULUS_FILE, TAG_L_FILE, TAG_S_FILE, load_tables, save_tables};
pub use wav::{WavCapture, read_wav_channel, save_wav};

/// Load a capture from a `.wav` file (one channel) or a CSV buffer
pub fn load_capture<P: AsRef<Path>>(path: P, channel: u16) -> Result<Vec<f64>> {
    let path = path.as_ref();
    if is_wav(path) {
        let capture = read_wav_channel(path, channel)?;
        log::debug!(
            "Loaded {} samples at {} Hz from {}",
            capture.samples.len(),
            capture.sample_rate,
            path.display()
        );
        Ok(capture.samples)
    } else {
        let samples = csv::load_samples(path)?;
        log::debug!("Loaded {} samples from {}", samples.len(), path.display());
        Ok(samples)
    }
}

/// Save a buffer as `.wav` (mono float) or CSV, chosen by extension
pub fn save_buffer<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    if is_wav(path) {
        save_wav(path, samples, sample_rate)
    } else {
        csv::save_samples(path, samples)
    }
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}
