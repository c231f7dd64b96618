use thiserror::Error;

/// Errors returned by the ad copy optimizer.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// A request field could not be interpreted, e.g. an unknown copy kind.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// More units were submitted than a single batch may hold.
    #[error("batch of {size} units exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },
}

impl From<sas_core::CoreError> for OptimizerError {
    fn from(err: sas_core::CoreError) -> Self {
        OptimizerError::InvalidInput(err.to_string())
    }
}
