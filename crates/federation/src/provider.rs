use crate::Result;
use gqlsh_introspect::GraphQLClient;
use gqlsh_schema::SchemaCatalog;
use std::fmt;
use std::sync::Arc;

/// One federation implementation the shell knows how to recognize.
///
/// Providers only add display information; nothing they return changes how
/// operations are built or sent.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable name, e.g. `Apollo Federation`.
    fn name(&self) -> &'static str;

    /// Whether the schema looks like a subgraph of this implementation.
    fn detect(&self, catalog: &SchemaCatalog) -> bool;

    /// Fetches the subgraph's own SDL from the service.
    async fn service_sdl(&self, client: &GraphQLClient) -> Result<String>;

    /// Federation directive names the schema declares it uses, without `@`.
    fn federation_directives(&self, catalog: &SchemaCatalog) -> Vec<String>;

    /// Names of the entity types the subgraph contributes.
    fn entities(&self, catalog: &SchemaCatalog) -> Vec<String>;

    /// Multi-line entity summary for display.
    fn format_entity_info(&self, catalog: &SchemaCatalog) -> String;
}

/// What detection found.
#[derive(Clone)]
pub struct Info {
    pub provider_name: String,
    pub is_subgraph: bool,
    pub entities: Vec<String>,
    provider: Arc<dyn Provider>,
}

impl Info {
    pub(crate) fn new(provider: Arc<dyn Provider>, catalog: &SchemaCatalog) -> Self {
        Self {
            provider_name: provider.name().to_string(),
            is_subgraph: true,
            entities: provider.entities(catalog),
            provider,
        }
    }

    /// The provider that matched.
    #[must_use]
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}

impl fmt::Debug for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Info")
            .field("provider_name", &self.provider_name)
            .field("is_subgraph", &self.is_subgraph)
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}
