pub mod analysis;
pub mod cache;
pub mod capture;
pub mod config;
pub mod constants;
pub mod deconvolution;
pub mod error;
pub mod mls;
pub mod output;
pub mod storage;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use analysis::ResponseSummary;
pub use cache::{MlsTables, TableCache};
pub use config::MeasurementConfig;
pub use deconvolution::{Deconvolver, TagTables, build_tag_tables, estimate_impulse_response};
pub use error::{MlsError, Result};
pub use mls::{MaximumLengthSequence, MlsOrder, generate_mls, to_bipolar};
