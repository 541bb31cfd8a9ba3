use gqlsh_introspect::IntrospectionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FederationError>;

#[derive(Debug, Error)]
pub enum FederationError {
    #[error("Failed to execute _service query: {0}")]
    Transport(#[from] IntrospectionError),

    #[error("_service query error: {0}")]
    GraphQL(String),

    #[error("_service response did not contain an SDL string")]
    MissingSdl,
}
