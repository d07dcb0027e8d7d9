use thiserror::Error;

/// Errors raised while configuring a widget.
///
/// Every variant is produced before any markup is generated, so a failed
/// `run` never returns partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataViewError {
    #[error("The \"dataReader\" property must be set.")]
    MissingDataReader,

    #[error("The \"paginator\" property must be set.")]
    MissingPaginator,

    #[error("The \"{0}\" property must be set.")]
    MissingProperty(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type DataViewResult<T> = Result<T, DataViewError>;
