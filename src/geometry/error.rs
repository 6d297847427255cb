use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
