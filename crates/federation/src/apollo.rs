//! Apollo Federation subgraphs.
//!
//! A subgraph is recognized either by the `_service` field federation adds to
//! the query root, or by a schema-level `@link` whose URL points at a
//! federation spec. Entities are object types carrying `@key`. Introspection
//! does not report applied directives, so for an introspected schema the
//! members of the generated `_Entity` union are used instead.

use crate::{FederationError, Provider, Result};
use gqlsh_introspect::{GraphQLClient, GraphQLRequest};
use gqlsh_schema::{CatalogType, SchemaCatalog, TypeKind};

const SERVICE_SDL_QUERY: &str = "query { _service { sdl } }";

#[derive(Debug, Clone, Copy, Default)]
pub struct ApolloProvider;

#[async_trait::async_trait]
impl Provider for ApolloProvider {
    fn name(&self) -> &'static str {
        "Apollo Federation"
    }

    fn detect(&self, catalog: &SchemaCatalog) -> bool {
        let has_service_field = catalog
            .query_type()
            .is_some_and(|query| query.field("_service").is_some());
        has_service_field || federation_link(catalog).is_some()
    }

    #[tracing::instrument(skip_all, fields(endpoint = client.endpoint()))]
    async fn service_sdl(&self, client: &GraphQLClient) -> Result<String> {
        let response = client.execute(&GraphQLRequest::new(SERVICE_SDL_QUERY)).await?;

        if let Some(first) = response.errors().first() {
            return Err(FederationError::GraphQL(first.message.clone()));
        }

        response
            .data
            .as_ref()
            .and_then(|data| data.get("_service"))
            .and_then(|service| service.get("sdl"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or(FederationError::MissingSdl)
    }

    fn federation_directives(&self, catalog: &SchemaCatalog) -> Vec<String> {
        federation_link(catalog)
            .and_then(|link| link.argument("import"))
            .map(|imports| {
                quoted_strings(imports)
                    .into_iter()
                    .filter_map(|name| name.strip_prefix('@').map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entities(&self, catalog: &SchemaCatalog) -> Vec<String> {
        let keyed: Vec<String> = keyed_types(catalog).map(|ty| ty.name.clone()).collect();
        if !keyed.is_empty() {
            return keyed;
        }

        catalog
            .get_type("_Entity")
            .filter(|ty| ty.kind == TypeKind::Union)
            .map(|ty| ty.members.clone())
            .unwrap_or_default()
    }

    fn format_entity_info(&self, catalog: &SchemaCatalog) -> String {
        let mut out = String::from("Entities:\n");

        let mut any_keyed = false;
        for ty in keyed_types(catalog) {
            any_keyed = true;
            let keys: Vec<&str> = ty
                .directives_named("key")
                .filter_map(|key| key.argument("fields"))
                .collect();
            out.push_str(&format!("  {} @key(fields: {})\n", ty.name, keys.join(", ")));
        }

        if !any_keyed {
            for name in self.entities(catalog) {
                out.push_str(&format!("  {name}\n"));
            }
        }
        out
    }
}

fn keyed_types(catalog: &SchemaCatalog) -> impl Iterator<Item = &CatalogType> {
    catalog
        .types()
        .iter()
        .filter(|ty| ty.kind == TypeKind::Object && ty.has_directive("key"))
}

fn federation_link(catalog: &SchemaCatalog) -> Option<&gqlsh_schema::AppliedDirective> {
    catalog.schema_directives().iter().find(|directive| {
        directive.name == "link"
            && directive
                .argument("url")
                .is_some_and(|url| url.contains("federation"))
    })
}

/// Contents of every double-quoted string in a GraphQL literal.
fn quoted_strings(literal: &str) -> Vec<String> {
    let mut strings = Vec::new();
    let mut chars = literal.chars();

    while let Some(c) = chars.next() {
        if c != '"' {
            continue;
        }
        let mut current = String::new();
        while let Some(c) = chars.next() {
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                other => current.push(other),
            }
        }
        strings.push(current);
    }
    strings
}
