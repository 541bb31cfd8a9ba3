//! GraphQL introspection, SDL reconstruction and HTTP transport.
//!
//! This crate fetches a schema from a remote endpoint with the standard
//! introspection query, decodes it into [`IntrospectionSchema`] (whose type
//! references are [`TypeRef`] values) and turns it back into SDL text that any
//! standards-compliant parser accepts.
//!
//! # Examples
//!
//! ## One-step introspection to SDL
//!
//! ```no_run
//! use gqlsh_introspect::{introspect_sdl, GraphQLClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GraphQLClient::new("https://api.example.com/graphql");
//!     let sdl = introspect_sdl(&client).await?;
//!     println!("{sdl}");
//!     Ok(())
//! }
//! ```
//!
//! ## Step-by-step usage
//!
//! ```no_run
//! use gqlsh_introspect::{introspection_to_sdl, GraphQLClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GraphQLClient::new("https://api.example.com/graphql")
//!         .with_header("Authorization", "Bearer my-token");
//!
//!     let schema = client.introspect().await?;
//!     println!("{}", introspection_to_sdl(&schema));
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod sdl;
mod type_ref;
mod types;

pub use client::{
    GraphQLClient, GraphQLError, GraphQLRequest, GraphQLResponse, DEFAULT_TIMEOUT_SECS,
};
pub use error::{IntrospectionError, Result};
pub use query::INTROSPECTION_QUERY;
pub use sdl::{
    directive_to_sdl, escape_string, field_to_sdl, format_description, introspection_to_sdl,
    is_builtin_directive, is_builtin_scalar, type_to_sdl,
};
pub use type_ref::{unwrap_type_name, TypeRef};
pub use types::*;

/// Introspects the client's endpoint and converts the result to SDL.
///
/// # Errors
///
/// Returns an error if the network request fails, the server returns an HTTP
/// or GraphQL error, or the response is not an introspection result.
#[tracing::instrument(skip(client), fields(endpoint = client.endpoint()))]
pub async fn introspect_sdl(client: &GraphQLClient) -> Result<String> {
    let schema = client.introspect().await?;
    tracing::debug!("Converting introspection to SDL");
    let sdl = introspection_to_sdl(&schema);
    tracing::info!(sdl_length = sdl.len(), "Introspection complete");
    Ok(sdl)
}
