mod noise;
mod system;

pub use noise::{AdditiveNoiseConfig, ImpulseNoiseConfig, NoiseConfig, apply_noise, signal_power};
pub use system::{LinearSystem, REFERENCE_TAPS};
