use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

/// Failures of the transport layer and of decoding introspection payloads.
///
/// GraphQL-level errors in an ordinary operation response are *not* represented
/// here; they travel inside [`crate::GraphQLResponse::errors`]. The only exception
/// is the introspection request itself, which cannot produce a usable schema once
/// the server reports an error.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid introspection response: {0}")]
    Invalid(String),

    #[error("Introspection error: {0}")]
    GraphQL(String),
}
