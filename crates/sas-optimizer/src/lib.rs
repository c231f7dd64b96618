//! Character-budget optimizer for ad copy.
//!
//! Fits headlines, descriptions and display URLs inside their platform
//! character limits by trimming at word boundaries, keeping keywords where it
//! can, and scoring how well the result uses the budget.

pub mod error;
pub mod input;
pub mod keywords;
pub mod optimize;

pub use error::OptimizerError;
pub use input::AdCopyUnitInput;
pub use keywords::KeywordMatcher;
pub use optimize::{batch_optimize, fit_to_limit, optimize, optimize_with, MAX_BATCH_SIZE};
