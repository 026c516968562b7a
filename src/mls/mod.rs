pub mod generator;
pub mod order;
pub mod stimulus;
pub mod taps;

pub use generator::{MaximumLengthSequence, generate_mls};
pub use order::MlsOrder;
pub use stimulus::{repeat_periods, to_bipolar, to_bipolar_scaled};
pub use taps::TapPattern;
