//! SDL to [`SchemaCatalog`] conversion.
//!
//! The catalog is built once per session by parsing reconstructed SDL with
//! `apollo-compiler` and copying what the shell needs into plain owned
//! structures. It is immutable afterwards.

use crate::{
    AppliedDirective, ArgumentSpec, CatalogType, EnumValueSpec, FieldSpec, OperationType,
    Result, SchemaError, TypeKind,
};
use apollo_compiler::ast;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::Schema;
use gqlsh_introspect::{introspection_to_sdl, IntrospectionSchema, TypeRef};
use std::collections::HashMap;

/// Directives every schema has implicitly; they never count as custom.
const SPECIFIED_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// Name used for the in-memory SDL source in parser diagnostics.
const SDL_SOURCE_NAME: &str = "introspection.graphql";

/// The read-only schema the query builder and shell consume.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    sdl: String,
    types: Vec<CatalogType>,
    index: HashMap<String, usize>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    custom_directives: Vec<String>,
    schema_directives: Vec<AppliedDirective>,
}

impl SchemaCatalog {
    /// Reconstructs SDL from an introspection result and parses it.
    ///
    /// # Errors
    ///
    /// A parse failure here means the reconstructed SDL is malformed; the
    /// parser diagnostic is returned as [`SchemaError::Parse`].
    pub fn from_introspection(introspection: &IntrospectionSchema) -> Result<Self> {
        Self::from_sdl(&introspection_to_sdl(introspection))
    }

    /// Parses SDL text into a catalog.
    ///
    /// Build errors (syntax errors, duplicate definitions) are fatal. Semantic
    /// validation errors are logged and the partially valid schema is used,
    /// since the shell only needs the type structure.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if the SDL cannot be assembled and
    /// [`SchemaError::MissingRootType`] if a root operation names a type that
    /// does not exist.
    #[tracing::instrument(skip(sdl), fields(sdl_length = sdl.len()))]
    pub fn from_sdl(sdl: &str) -> Result<Self> {
        let schema = match Schema::builder().parse(sdl, SDL_SOURCE_NAME).build() {
            Ok(schema) => schema,
            Err(with_errors) => {
                tracing::error!(
                    error_count = with_errors.errors.len(),
                    "Failed to build schema from SDL"
                );
                return Err(SchemaError::Parse(with_errors.errors.to_string()));
            }
        };

        let schema = match schema.validate() {
            Ok(valid) => valid.into_inner(),
            Err(with_errors) => {
                tracing::warn!(
                    error_count = with_errors.errors.len(),
                    "Schema validation errors found (schema still usable)"
                );
                with_errors.partial
            }
        };

        let catalog = Self::from_schema(sdl.to_string(), &schema);
        catalog.check_roots()?;

        tracing::info!(
            types = catalog.types.len(),
            query = catalog.query_type.as_deref().unwrap_or(""),
            mutation = catalog.mutation_type.as_deref().unwrap_or(""),
            "Schema catalog loaded"
        );
        Ok(catalog)
    }

    fn from_schema(sdl: String, schema: &Schema) -> Self {
        let mut types = Vec::with_capacity(schema.types.len());
        let mut index = HashMap::with_capacity(schema.types.len());

        for (name, extended) in &schema.types {
            if name.starts_with("__") {
                continue;
            }
            index.insert(name.to_string(), types.len());
            types.push(catalog_type(name.as_str(), extended));
        }

        let root = |operation: ast::OperationType| {
            schema.root_operation(operation).map(ToString::to_string)
        };

        let custom_directives = schema
            .directive_definitions
            .keys()
            .filter(|name| !SPECIFIED_DIRECTIVES.contains(&name.as_str()))
            .map(ToString::to_string)
            .collect();

        let schema_directives = schema
            .schema_definition
            .directives
            .iter()
            .map(|directive| applied_directive(directive))
            .collect();

        Self {
            sdl,
            types,
            index,
            query_type: root(ast::OperationType::Query),
            mutation_type: root(ast::OperationType::Mutation),
            subscription_type: root(ast::OperationType::Subscription),
            custom_directives,
            schema_directives,
        }
    }

    fn check_roots(&self) -> Result<()> {
        for operation in [
            OperationType::Query,
            OperationType::Mutation,
            OperationType::Subscription,
        ] {
            if let Some(name) = self.root_type_name(operation) {
                if !self.index.contains_key(name) {
                    return Err(SchemaError::MissingRootType {
                        operation: operation.as_str(),
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The SDL this catalog was parsed from.
    #[must_use]
    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    /// All named types except introspection meta types, in definition order.
    #[must_use]
    pub fn types(&self) -> &[CatalogType] {
        &self.types
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&CatalogType> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    #[must_use]
    pub fn root_type_name(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => self.query_type.as_deref(),
            OperationType::Mutation => self.mutation_type.as_deref(),
            OperationType::Subscription => self.subscription_type.as_deref(),
        }
    }

    #[must_use]
    pub fn root_type(&self, operation: OperationType) -> Option<&CatalogType> {
        self.root_type_name(operation)
            .and_then(|name| self.get_type(name))
    }

    #[must_use]
    pub fn query_type(&self) -> Option<&CatalogType> {
        self.root_type(OperationType::Query)
    }

    #[must_use]
    pub fn mutation_type(&self) -> Option<&CatalogType> {
        self.root_type(OperationType::Mutation)
    }

    #[must_use]
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldSpec> {
        self.get_type(type_name)
            .and_then(|ty| ty.field(field_name))
    }

    /// Finds a root field by name, trying the query root before the mutation root.
    #[must_use]
    pub fn find_operation_field(&self, name: &str) -> Option<(OperationType, &FieldSpec)> {
        [OperationType::Query, OperationType::Mutation]
            .into_iter()
            .find_map(|operation| {
                self.root_type(operation)
                    .and_then(|root| root.field(name))
                    .map(|field| (operation, field))
            })
    }

    /// Whether a field of this named type is selected without a sub-selection.
    /// Unknown names count as leaves.
    #[must_use]
    pub fn is_leaf_type(&self, name: &str) -> bool {
        self.get_type(name).is_none_or(|ty| ty.kind.is_leaf())
    }

    /// Names of directive definitions beyond the specified ones.
    #[must_use]
    pub fn custom_directives(&self) -> &[String] {
        &self.custom_directives
    }

    /// Directives applied to the `schema` definition (e.g. `@link`).
    #[must_use]
    pub fn schema_directives(&self) -> &[AppliedDirective] {
        &self.schema_directives
    }
}

/// Converts a parsed type reference into a [`TypeRef`].
#[must_use]
pub fn type_ref_from_ast(ty: &ast::Type) -> TypeRef {
    match ty {
        ast::Type::Named(name) => TypeRef::named(name.as_str()),
        ast::Type::NonNullNamed(name) => TypeRef::non_null(TypeRef::named(name.as_str())),
        ast::Type::List(inner) => TypeRef::list(type_ref_from_ast(inner)),
        ast::Type::NonNullList(inner) => {
            TypeRef::non_null(TypeRef::list(type_ref_from_ast(inner)))
        }
    }
}

fn catalog_type(name: &str, extended: &ExtendedType) -> CatalogType {
    match extended {
        ExtendedType::Scalar(scalar) => {
            let mut ty = CatalogType::new(name, TypeKind::Scalar);
            ty.description = description(scalar.description.as_deref());
            ty.directives = scalar.directives.iter().map(|d| applied_directive(d)).collect();
            ty
        }
        ExtendedType::Object(object) => {
            let mut ty = CatalogType::new(name, TypeKind::Object);
            ty.description = description(object.description.as_deref());
            ty.directives = object.directives.iter().map(|d| applied_directive(d)).collect();
            ty.fields = object.fields.values().map(|f| field_spec(f)).collect();
            ty.interfaces = object
                .implements_interfaces
                .iter()
                .map(|i| i.name.to_string())
                .collect();
            ty
        }
        ExtendedType::Interface(interface) => {
            let mut ty = CatalogType::new(name, TypeKind::Interface);
            ty.description = description(interface.description.as_deref());
            ty.directives = interface
                .directives
                .iter()
                .map(|d| applied_directive(d))
                .collect();
            ty.fields = interface.fields.values().map(|f| field_spec(f)).collect();
            ty.interfaces = interface
                .implements_interfaces
                .iter()
                .map(|i| i.name.to_string())
                .collect();
            ty
        }
        ExtendedType::Union(union) => {
            let mut ty = CatalogType::new(name, TypeKind::Union);
            ty.description = description(union.description.as_deref());
            ty.directives = union.directives.iter().map(|d| applied_directive(d)).collect();
            ty.members = union.members.iter().map(|m| m.name.to_string()).collect();
            ty
        }
        ExtendedType::Enum(enum_type) => {
            let mut ty = CatalogType::new(name, TypeKind::Enum);
            ty.description = description(enum_type.description.as_deref());
            ty.directives = enum_type
                .directives
                .iter()
                .map(|d| applied_directive(d))
                .collect();
            ty.enum_values = enum_type
                .values
                .values()
                .map(|value| {
                    let (is_deprecated, deprecation_reason) = deprecation(&value.directives);
                    EnumValueSpec {
                        name: value.value.to_string(),
                        description: description(value.description.as_deref()),
                        is_deprecated,
                        deprecation_reason,
                    }
                })
                .collect();
            ty
        }
        ExtendedType::InputObject(input) => {
            let mut ty = CatalogType::new(name, TypeKind::InputObject);
            ty.description = description(input.description.as_deref());
            ty.directives = input.directives.iter().map(|d| applied_directive(d)).collect();
            ty.input_fields = input.fields.values().map(|f| argument_spec(f)).collect();
            ty
        }
    }
}

fn field_spec(field: &ast::FieldDefinition) -> FieldSpec {
    let (is_deprecated, deprecation_reason) = deprecation(&field.directives);
    FieldSpec {
        name: field.name.to_string(),
        description: description(field.description.as_deref()),
        arguments: field.arguments.iter().map(|a| argument_spec(a)).collect(),
        type_ref: type_ref_from_ast(&field.ty),
        is_deprecated,
        deprecation_reason,
    }
}

fn argument_spec(value: &ast::InputValueDefinition) -> ArgumentSpec {
    ArgumentSpec {
        name: value.name.to_string(),
        description: description(value.description.as_deref()),
        type_ref: type_ref_from_ast(&value.ty),
        default_value: value.default_value.as_deref().map(ToString::to_string),
    }
}

fn applied_directive(directive: &ast::Directive) -> AppliedDirective {
    AppliedDirective {
        name: directive.name.to_string(),
        arguments: directive
            .arguments
            .iter()
            .map(|arg| (arg.name.to_string(), arg.value.to_string()))
            .collect(),
    }
}

fn deprecation(directives: &ast::DirectiveList) -> (bool, Option<String>) {
    directives
        .iter()
        .find(|d| d.name.as_str() == "deprecated")
        .map_or((false, None), |d| {
            let reason = d
                .arguments
                .iter()
                .find(|arg| arg.name.as_str() == "reason")
                .and_then(|arg| arg.value.as_str())
                .map(str::to_string);
            (true, reason)
        })
}

fn description(text: Option<&str>) -> Option<String> {
    text.filter(|text| !text.is_empty()).map(str::to_string)
}
