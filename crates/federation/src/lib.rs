//! Optional federation metadata for the shell.
//!
//! A [`Registry`] holds [`Provider`]s in registration order; the first one
//! whose [`Provider::detect`] accepts the schema produces an [`Info`].

mod apollo;
mod error;
mod provider;
mod registry;

pub use apollo::ApolloProvider;
pub use error::{FederationError, Result};
pub use provider::{Info, Provider};
pub use registry::Registry;
