pub mod deconvolver;
pub mod hadamard;
mod permute;
pub mod tags;

pub use deconvolver::{Deconvolver, estimate_impulse_response};
pub use hadamard::fast_hadamard_transform;
pub(crate) use permute::{permute_response, permute_signal};
pub use tags::{TagTables, build_tag_tables};
