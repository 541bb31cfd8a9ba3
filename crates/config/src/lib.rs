//! Endpoint configuration for gqlsh.
//!
//! A config file holds either a single endpoint or named profiles:
//!
//! ```yaml
//! default: staging
//! profiles:
//!   staging:
//!     url: https://staging.example.com/graphql
//!     headers:
//!       Authorization: Bearer dev-token
//!   prod:
//!     url: https://api.example.com/graphql
//!     timeout: 60
//! ```

mod config;
mod error;
mod loader;

pub use config::{EndpointConfig, GqlshConfig, DEFAULT_PROFILE};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
