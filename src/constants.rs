//! Numeric constants for sequence generation and measurement
//!
//! These constants bound the supported LFSR orders and provide the
//! defaults used by the configuration layer and the binaries.

/// Smallest LFSR order with an entry in the tap table.
pub const MIN_ORDER: u32 = 3;

/// Largest LFSR order with an entry in the tap table.
pub const MAX_ORDER: u32 = 18;

/// Number of supported orders (one tap table row each).
pub const ORDER_COUNT: usize = (MAX_ORDER - MIN_ORDER + 1) as usize;

/// Default order: P = 262143 samples, about 2.7 s at 96 kHz.
pub const DEFAULT_ORDER: u32 = 18;

/// Default capture sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 96_000;

/// Default magnitude below which capture samples are treated as silence.
pub const DEFAULT_GATE_THRESHOLD: f64 = 0.001;

/// Default number of strongest taps reported by the response summary.
pub const DEFAULT_SUMMARY_TAPS: usize = 5;

/// Floor for noise power in dB calculations, avoids log of zero.
pub const MIN_NOISE_POWER: f64 = 1e-30;
