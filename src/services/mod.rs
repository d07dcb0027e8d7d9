//! Services building the demo pages from loaded rows.

use thiserror::Error;

use crate::errors::DataViewError;

pub mod main;

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    DataView(#[from] DataViewError),
}

/// Convenient alias for service results.
pub type ServiceResult<T> = Result<T, ServiceError>;
