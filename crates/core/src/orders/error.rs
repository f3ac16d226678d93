//! Order error types.

use clinicdash_shared::AppError;
use clinicdash_shared::types::ClinicId;
use thiserror::Error;

/// Errors raised while reading or looking up orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Status string outside the four known values.
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Clinic not found.
    #[error("Clinic not found: {0}")]
    ClinicNotFound(ClinicId),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::UnknownStatus(_) => Self::Validation(err.to_string()),
            OrderError::ClinicNotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
