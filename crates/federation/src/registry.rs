use crate::apollo::ApolloProvider;
use crate::{Info, Provider};
use gqlsh_schema::SchemaCatalog;
use std::sync::Arc;

/// Ordered set of providers. Detection returns the first match in
/// registration order.
#[derive(Clone, Default)]
pub struct Registry {
    providers: Vec<Arc<dyn Provider>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in provider.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ApolloProvider);
        registry
    }

    pub fn register(&mut self, provider: impl Provider + 'static) {
        self.providers.push(Arc::new(provider));
    }

    /// Provider names in registration order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    #[must_use]
    #[tracing::instrument(skip_all)]
    pub fn detect(&self, catalog: &SchemaCatalog) -> Option<Info> {
        let provider = self.providers.iter().find(|p| p.detect(catalog))?;
        let info = Info::new(Arc::clone(provider), catalog);
        tracing::info!(
            provider = %info.provider_name,
            entities = info.entities.len(),
            "Federation detected"
        );
        Some(info)
    }
}
