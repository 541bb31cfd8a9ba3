//! Shared test fixtures and assertions for the gqlsh crates.

pub mod assertions;
pub mod fixtures;
