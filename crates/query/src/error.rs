use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Selection is nested deeper than {max} levels")]
    DepthExceeded { max: usize },

    #[error("Invalid selection: {0}")]
    Syntax(String),

    #[error("Field not found: {type_name}.{field}")]
    UnknownField { type_name: String, field: String },

    #[error("Field {type_name}.{field} is a leaf and takes no sub-selection")]
    UnexpectedSubselection { type_name: String, field: String },

    #[error("Field {type_name}.{field} needs a sub-selection")]
    MissingSubselection { type_name: String, field: String },
}
