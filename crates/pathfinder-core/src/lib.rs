pub mod error;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "tco")]
pub mod tco;

#[cfg(feature = "value_realization")]
pub mod value_realization;

#[cfg(feature = "risk_roi")]
pub mod risk_roi;

#[cfg(feature = "growth")]
pub mod growth;

#[cfg(feature = "business_case")]
pub mod business_case;

pub use error::PathfinderError;
pub use types::*;

/// Standard result type for all pathfinder operations
pub type PathfinderResult<T> = Result<T, PathfinderError>;
