use thiserror::Error as ThisError;

pub type OpaqueError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("invalid network address: {0}")]
    InvalidNetwork(#[from] ipnet::AddrParseError),
    #[error("concurrency bound must be at least 1")]
    InvalidConcurrency,
    #[error("{0}")]
    Opaque(#[from] OpaqueError),
}

pub type Result<T> = std::result::Result<T, Error>;
