//! Recursive type references.
//!
//! Introspection describes a field's type as a chain of `{ kind, name, ofType }`
//! objects, e.g. `NON_NULL -> LIST -> NON_NULL -> SCALAR String` for `[String!]!`.
//! [`TypeRef`] is the decoded form of that chain. The introspection query only
//! requests seven levels of `ofType`, so a wrapper may arrive without its inner
//! type; such a truncated wrapper decodes around an empty named leaf instead of
//! failing.

use serde::Deserialize;
use std::fmt;

/// A named type wrapped in any number of list and non-null modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawTypeRef")]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Returns the innermost named type, stripping every list and non-null layer.
    ///
    /// ```
    /// # use gqlsh_introspect::TypeRef;
    /// let ty = TypeRef::non_null(TypeRef::list(TypeRef::named("User")));
    /// assert_eq!(ty.named_type(), "User");
    /// ```
    #[must_use]
    pub fn named_type(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                Self::Named(name) => return name,
                Self::List(inner) | Self::NonNull(inner) => current = inner,
            }
        }
    }

    /// Whether the outermost modifier is non-null.
    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Whether a list modifier appears anywhere in the chain.
    #[must_use]
    pub fn is_list(&self) -> bool {
        match self {
            Self::Named(_) => false,
            Self::List(_) => true,
            Self::NonNull(inner) => inner.is_list(),
        }
    }

    /// Number of modifier layers around the named leaf.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::List(inner) | Self::NonNull(inner) = current {
            depth += 1;
            current = inner;
        }
        depth
    }
}

/// Unwraps an optional type reference to its named type, `""` when absent.
#[must_use]
pub fn unwrap_type_name(type_ref: Option<&TypeRef>) -> &str {
    type_ref.map_or("", TypeRef::named_type)
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Wire shape of the `TypeRef` fragment.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    of_type: Option<Box<RawTypeRef>>,
}

impl From<RawTypeRef> for TypeRef {
    fn from(raw: RawTypeRef) -> Self {
        let inner = || {
            raw.of_type
                .map_or_else(|| Self::Named(String::new()), |of_type| Self::from(*of_type))
        };

        match raw.kind.as_str() {
            "NON_NULL" => Self::NonNull(Box::new(inner())),
            "LIST" => Self::List(Box::new(inner())),
            _ => Self::Named(raw.name.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_named_type() {
        assert_eq!(TypeRef::named("String").to_string(), "String");
    }

    #[test]
    fn test_renders_non_null_after_inner() {
        let ty = TypeRef::non_null(TypeRef::named("String"));
        assert_eq!(ty.to_string(), "String!");
    }

    #[test]
    fn test_renders_list_brackets() {
        let ty = TypeRef::list(TypeRef::named("Int"));
        assert_eq!(ty.to_string(), "[Int]");
    }

    #[test]
    fn test_renders_non_null_list_of_non_null() {
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("String"))));
        assert_eq!(ty.to_string(), "[String!]!");
    }

    #[test]
    fn test_renders_nested_lists() {
        let ty = TypeRef::list(TypeRef::list(TypeRef::non_null(TypeRef::named("Int"))));
        assert_eq!(ty.to_string(), "[[Int!]]");
    }

    #[test]
    fn test_named_type_strips_every_layer() {
        let cases = [
            TypeRef::named("User"),
            TypeRef::non_null(TypeRef::named("User")),
            TypeRef::list(TypeRef::named("User")),
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("User")))),
            TypeRef::list(TypeRef::list(TypeRef::list(TypeRef::named("User")))),
        ];
        for ty in &cases {
            assert_eq!(ty.named_type(), "User", "unwrapping {ty}");
        }
    }

    #[test]
    fn test_unwrap_absent_reference_is_empty() {
        assert_eq!(unwrap_type_name(None), "");
        let ty = TypeRef::list(TypeRef::named("Post"));
        assert_eq!(unwrap_type_name(Some(&ty)), "Post");
    }

    #[test]
    fn test_non_null_only_looks_at_outermost_layer() {
        assert!(TypeRef::non_null(TypeRef::named("ID")).is_non_null());
        assert!(!TypeRef::list(TypeRef::non_null(TypeRef::named("ID"))).is_non_null());
    }

    #[test]
    fn test_depth_counts_modifiers() {
        assert_eq!(TypeRef::named("ID").depth(), 0);
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("ID"))));
        assert_eq!(ty.depth(), 3);
        assert!(ty.is_list());
    }

    #[test]
    fn test_decodes_introspection_chain() {
        let json = serde_json::json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": { "kind": "OBJECT", "name": "User", "ofType": null }
                }
            }
        });
        let ty: TypeRef = serde_json::from_value(json).unwrap();
        assert_eq!(ty.to_string(), "[User!]!");
    }

    #[test]
    fn test_tolerates_truncated_wrapper() {
        let json = serde_json::json!({ "kind": "LIST", "name": null });
        let ty: TypeRef = serde_json::from_value(json).unwrap();
        assert_eq!(ty, TypeRef::list(TypeRef::named("")));
        assert_eq!(ty.named_type(), "");
    }
}
