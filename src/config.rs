//! Configuration for MLS measurements.
//!
//! Every section has sensible defaults, and a TOML file may override any
//! subset of fields:
//!
//! ```toml
//! [sequence]
//! order = 16
//!
//! [capture]
//! gate_threshold = 0.002
//! offset = 4800
//! ```
//!
//! Set `gate = false` under `[capture]` to analyse captures untrimmed.

use std::path::Path;

use serde::Deserialize;

use crate::constants::{DEFAULT_GATE_THRESHOLD, DEFAULT_SAMPLE_RATE, DEFAULT_SUMMARY_TAPS};
use crate::error::{MlsError, Result};
use crate::mls::MlsOrder;

/// System-wide measurement configuration
///
/// # Example
/// ```
/// use mlsdeconv::config::MeasurementConfig;
///
/// let config = MeasurementConfig::from_toml_str("[sequence]\norder = 12\n").unwrap();
/// assert_eq!(config.sequence.order.period(), 4095);
/// assert_eq!(config.audio.sample_rate, 96000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeasurementConfig {
    /// Excitation sequence configuration
    pub sequence: SequenceConfig,
    /// Sample format of stimulus and captures
    pub audio: AudioConfig,
    /// Capture conditioning before deconvolution
    pub capture: CaptureConfig,
    /// Response summary configuration
    pub analysis: AnalysisConfig,
}

/// Excitation sequence configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    /// LFSR order N; the sequence has 2^N - 1 samples
    pub order: MlsOrder,
    /// Peak amplitude of the stimulus written for playback (0-1 range)
    pub amplitude: f64,
}

/// Sample format of stimulus and captures
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel of a multi-channel WAV capture that holds the response
    pub capture_channel: u16,
}

/// Capture conditioning before deconvolution
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Trim silent lead-in and tail before aligning
    pub gate: bool,
    /// Magnitude at or below which leading and trailing samples count as
    /// silence
    pub gate_threshold: f64,
    /// Samples to skip (after gating) before the analysed period begins
    pub offset: usize,
}

/// Response summary configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of strongest taps to report
    pub taps: usize,
}

impl MeasurementConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| MlsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges that the types alone do not enforce
    pub fn validate(&self) -> Result<()> {
        let amplitude = self.sequence.amplitude;
        if amplitude.is_nan() || amplitude <= 0.0 || amplitude > 1.0 {
            return Err(MlsError::Config(format!(
                "sequence.amplitude must be in (0, 1], got {}",
                amplitude
            )));
        }
        if self.audio.sample_rate == 0 {
            return Err(MlsError::Config("audio.sample_rate must be positive".to_string()));
        }
        let threshold = self.capture.gate_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(MlsError::Config(format!(
                "capture.gate_threshold must be non-negative, got {}",
                threshold
            )));
        }
        Ok(())
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            order: MlsOrder::default(),
            amplitude: 0.5,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            capture_channel: 0,
        }
    }
}

impl CaptureConfig {
    /// Threshold to gate with, or `None` when gating is switched off
    pub fn active_gate(&self) -> Option<f64> {
        self.gate.then_some(self.gate_threshold)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            gate: true,
            gate_threshold: DEFAULT_GATE_THRESHOLD,
            offset: 0,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            taps: DEFAULT_SUMMARY_TAPS,
        }
    }
}
