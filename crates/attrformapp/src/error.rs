use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Malformed attribute set: {0}")]
    MalformedAttributeSet(String),

    #[error("Unknown field: {section}.{key}")]
    UnknownField { section: String, key: String },

    #[error("Host bridge is not available")]
    MissingHostBridge,

    #[error("Bridge error: {0}")]
    Bridge(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
