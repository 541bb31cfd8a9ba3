//! Operation text assembly.

use crate::{ArgValue, ArgumentValues};
use gqlsh_introspect::TypeRef;
use gqlsh_schema::{FieldSpec, OperationType};

/// Assembles `op {\n  field(args) selection\n}`.
///
/// Arguments appear in the field's declaration order; names absent from
/// `args` are left out. `selection` is inserted after a single space unless
/// it is empty.
///
/// ```
/// use gqlsh_introspect::TypeRef;
/// use gqlsh_query::{build_operation, ArgValue, ArgumentValues};
/// use gqlsh_schema::{ArgumentSpec, FieldSpec, OperationType};
///
/// let field = FieldSpec {
///     name: "user".to_string(),
///     description: None,
///     arguments: vec![ArgumentSpec {
///         name: "id".to_string(),
///         description: None,
///         type_ref: TypeRef::non_null(TypeRef::named("ID")),
///         default_value: None,
///     }],
///     type_ref: TypeRef::named("User"),
///     is_deprecated: false,
///     deprecation_reason: None,
/// };
/// let mut args = ArgumentValues::new();
/// args.insert("id".to_string(), ArgValue::String("42".to_string()));
///
/// assert_eq!(
///     build_operation(OperationType::Query, &field, &args, "{ id name }"),
///     "query {\n  user(id: \"42\") { id name }\n}"
/// );
/// ```
#[must_use]
pub fn build_operation(
    operation: OperationType,
    field: &FieldSpec,
    args: &ArgumentValues,
    selection: &str,
) -> String {
    let mut out = format!("{operation} {{\n  {}", field.name);

    let rendered: Vec<String> = field
        .arguments
        .iter()
        .filter_map(|spec| {
            args.get(&spec.name)
                .map(|value| format!("{}: {}", spec.name, format_argument(value, Some(&spec.type_ref))))
        })
        .collect();
    if !rendered.is_empty() {
        out.push('(');
        out.push_str(&rendered.join(", "));
        out.push(')');
    }

    if !selection.is_empty() {
        out.push(' ');
        out.push_str(selection);
    }

    out.push_str("\n}");
    tracing::debug!(field = %field.name, %operation, "Built operation");
    out
}

/// Renders one argument value as a GraphQL literal.
///
/// Text is double-quoted (with JSON escaping) when the argument's named type
/// is `ID` or `String`, or when the type is unknown; for any other type the
/// text is emitted bare, as an enum value would be.
#[must_use]
pub fn format_argument(value: &ArgValue, type_ref: Option<&TypeRef>) -> String {
    match value {
        ArgValue::String(text) => {
            let quoted = type_ref.is_none_or(|t| matches!(t.named_type(), "ID" | "String"));
            if quoted {
                serde_json::Value::String(text.clone()).to_string()
            } else {
                text.clone()
            }
        }
        other => other.to_string(),
    }
}
