use gqlsh_introspect::TypeRef;
use std::fmt;

/// The kind of a named type, spelled the way introspection spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
        }
    }

    /// Scalars and enums terminate a selection; everything else needs sub-fields
    /// or cannot be selected at all.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// The keyword that opens an operation of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive applied to a schema element, with arguments kept in their
/// GraphQL literal form (`fields: "id"` keeps the quotes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDirective {
    pub name: String,
    pub arguments: Vec<(String, String)>,
}

impl AppliedDirective {
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An argument of a field, or a field of an input object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub description: Option<String>,
    pub type_ref: TypeRef,
    /// Default value in serialized GraphQL literal form.
    pub default_value: Option<String>,
}

impl ArgumentSpec {
    /// Required means the outermost modifier is non-null and no default exists.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.type_ref.is_non_null() && self.default_value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<ArgumentSpec>,
    pub type_ref: TypeRef,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

impl FieldSpec {
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    #[must_use]
    pub fn has_required_arguments(&self) -> bool {
        self.arguments.iter().any(ArgumentSpec::is_required)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueSpec {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// One named type of the catalog. Only the children meaningful for `kind` are
/// populated; the rest stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogType {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub input_fields: Vec<ArgumentSpec>,
    pub interfaces: Vec<String>,
    pub members: Vec<String>,
    pub enum_values: Vec<EnumValueSpec>,
    pub directives: Vec<AppliedDirective>,
}

impl CatalogType {
    pub(crate) fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            interfaces: Vec::new(),
            members: Vec::new(),
            enum_values: Vec::new(),
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.iter().any(|directive| directive.name == name)
    }

    pub fn directives_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a AppliedDirective> + 'a {
        self.directives
            .iter()
            .filter(move |directive| directive.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(type_ref: TypeRef, default_value: Option<&str>) -> ArgumentSpec {
        ArgumentSpec {
            name: "first".to_string(),
            description: None,
            type_ref,
            default_value: default_value.map(str::to_string),
        }
    }

    #[test]
    fn test_required_needs_non_null_without_default() {
        assert!(arg(TypeRef::non_null(TypeRef::named("Int")), None).is_required());
        assert!(!arg(TypeRef::non_null(TypeRef::named("Int")), Some("10")).is_required());
        assert!(!arg(TypeRef::named("Int"), None).is_required());
        assert!(!arg(
            TypeRef::list(TypeRef::non_null(TypeRef::named("Int"))),
            None
        )
        .is_required());
    }

    #[test]
    fn test_applied_directive_argument_lookup() {
        let directive = AppliedDirective {
            name: "key".to_string(),
            arguments: vec![("fields".to_string(), "\"id\"".to_string())],
        };
        assert_eq!(directive.argument("fields"), Some("\"id\""));
        assert_eq!(directive.argument("resolvable"), None);
    }

    #[test]
    fn test_kind_spelling() {
        assert_eq!(TypeKind::InputObject.to_string(), "INPUT_OBJECT");
        assert!(TypeKind::Enum.is_leaf());
        assert!(!TypeKind::Union.is_leaf());
        assert_eq!(OperationType::Mutation.to_string(), "mutation");
    }
}
