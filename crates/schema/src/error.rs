use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The SDL could not be parsed or assembled into a schema.
    #[error("Failed to parse schema: {0}")]
    Parse(String),

    #[error("Root {operation} type '{name}' is not defined in the schema")]
    MissingRootType {
        operation: &'static str,
        name: String,
    },
}
