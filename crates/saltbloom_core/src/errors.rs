use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Digest name not recognised when building a hash family.
    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A custom serializer could not turn an element into bytes.
    #[error("serialize element: {0}")]
    Serialization(Box<dyn std::error::Error + Send + Sync>),
}

impl FilterError {
    pub fn serialization(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Serialization(err.into())
    }

    /// True for errors raised while assembling a family or filter.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::UnknownAlgorithm(_) | Self::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
