use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MlsError {
    #[error("Unsupported MLS order {0}: must be between {min} and {max}", min = crate::constants::MIN_ORDER, max = crate::constants::MAX_ORDER)]
    InvalidOrder(u32),

    #[error("Length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{table} is not a permutation of 1..={period}: {detail}")]
    NonBijectivePermutation {
        table: &'static str,
        period: usize,
        detail: String,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MlsError {
    fn from(err: std::io::Error) -> Self {
        MlsError::Io(err.to_string())
    }
}

impl From<hound::Error> for MlsError {
    fn from(err: hound::Error) -> Self {
        MlsError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MlsError>;
