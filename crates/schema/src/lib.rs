//! The schema catalog consumed by the query builder and the shell.
//!
//! ```
//! use gqlsh_schema::{OperationType, SchemaCatalog};
//!
//! let catalog = SchemaCatalog::from_sdl("type Query { hello(name: String!): String }").unwrap();
//! let (operation, field) = catalog.find_operation_field("hello").unwrap();
//! assert_eq!(operation, OperationType::Query);
//! assert!(field.arguments[0].is_required());
//! ```

mod catalog;
mod error;
mod types;

pub use catalog::{type_ref_from_ast, SchemaCatalog};
pub use error::{Result, SchemaError};
pub use types::{
    AppliedDirective, ArgumentSpec, CatalogType, EnumValueSpec, FieldSpec, OperationType,
    TypeKind,
};
