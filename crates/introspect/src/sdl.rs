//! SDL (Schema Definition Language) reconstruction from introspection results.
//!
//! The output is meant to be fed back into an SDL parser, so it favours
//! parseability over faithful formatting: built-in scalars, built-in directives
//! and `__`-prefixed meta types are dropped, unknown kinds are skipped, and every
//! top-level definition is separated by one blank line.

use crate::types::{
    IntrospectionDirective, IntrospectionEnumValue, IntrospectionField, IntrospectionInputValue,
    IntrospectionSchema, IntrospectionType, NamedTypeRef,
};
use std::fmt::Write;

/// Built-in GraphQL scalar types that should not be included in generated SDL.
const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Directives every GraphQL server defines implicitly.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy"];

/// Converts an introspected schema to SDL.
///
/// Ordering is: the `schema { … }` block (only when at least one root operation
/// type is present), then types in introspection order, then custom directives
/// in introspection order.
///
/// ```
/// # use gqlsh_introspect::{introspection_to_sdl, IntrospectionSchema, NamedTypeRef};
/// let schema = IntrospectionSchema {
///     query_type: Some(NamedTypeRef::new("Query")),
///     ..Default::default()
/// };
/// assert_eq!(introspection_to_sdl(&schema), "schema {\n  query: Query\n}\n");
/// ```
#[must_use]
#[tracing::instrument(skip(schema), fields(
    types = schema.types.len(),
    directives = schema.directives.len()
))]
pub fn introspection_to_sdl(schema: &IntrospectionSchema) -> String {
    let mut units = Vec::new();

    if let Some(block) = schema_definition(schema) {
        units.push(block);
    }

    let types_before = units.len();
    units.extend(
        schema
            .types
            .iter()
            .filter(|t| !t.is_meta())
            .map(type_to_sdl)
            .filter(|sdl| !sdl.is_empty()),
    );
    let types_written = units.len() - types_before;

    units.extend(
        schema
            .directives
            .iter()
            .filter(|d| !is_builtin_directive(&d.name))
            .map(directive_to_sdl),
    );

    let mut sdl = units.join("\n\n");
    if !sdl.is_empty() {
        sdl.push('\n');
    }

    tracing::debug!(
        types_written,
        sdl_length = sdl.len(),
        "SDL generation complete"
    );
    sdl
}

fn schema_definition(schema: &IntrospectionSchema) -> Option<String> {
    let roots: String = [
        ("query", &schema.query_type),
        ("mutation", &schema.mutation_type),
        ("subscription", &schema.subscription_type),
    ]
    .into_iter()
    .filter_map(|(operation, root)| {
        root.as_ref()
            .map(|root| format!("  {operation}: {}\n", root.name))
    })
    .collect();

    (!roots.is_empty()).then(|| format!("schema {{\n{roots}}}"))
}

/// Renders a single type definition, or `""` for built-in scalars and unknown kinds.
#[must_use]
pub fn type_to_sdl(type_def: &IntrospectionType) -> String {
    match type_def {
        IntrospectionType::Scalar(t) => {
            if is_builtin_scalar(&t.name) {
                return String::new();
            }
            format!("{}scalar {}", description(t.description.as_deref(), ""), t.name)
        }
        IntrospectionType::Object(t) => format!(
            "{}type {}{} {{\n{}}}",
            description(t.description.as_deref(), ""),
            t.name,
            implements_clause(&t.interfaces),
            t.fields.iter().map(field_to_sdl).collect::<String>(),
        ),
        IntrospectionType::Interface(t) => format!(
            "{}interface {}{} {{\n{}}}",
            description(t.description.as_deref(), ""),
            t.name,
            implements_clause(&t.interfaces),
            t.fields.iter().map(field_to_sdl).collect::<String>(),
        ),
        IntrospectionType::Union(t) => format!(
            "{}union {} = {}",
            description(t.description.as_deref(), ""),
            t.name,
            t.possible_types
                .iter()
                .map(|member| member.name.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        ),
        IntrospectionType::Enum(t) => format!(
            "{}enum {} {{\n{}}}",
            description(t.description.as_deref(), ""),
            t.name,
            t.enum_values.iter().map(enum_value_to_sdl).collect::<String>(),
        ),
        IntrospectionType::InputObject(t) => format!(
            "{}input {} {{\n{}}}",
            description(t.description.as_deref(), ""),
            t.name,
            t.input_fields
                .iter()
                .map(|field| input_value_to_sdl(field, "  "))
                .collect::<String>(),
        ),
        IntrospectionType::Unknown => String::new(),
    }
}

fn implements_clause(interfaces: &[NamedTypeRef]) -> String {
    if interfaces.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
    format!(" implements {}", names.join(" & "))
}

/// Renders one field line (with trailing newline) at two-space indentation.
#[must_use]
pub fn field_to_sdl(field: &IntrospectionField) -> String {
    format!(
        "{}  {}{}: {}{}\n",
        description(field.description.as_deref(), "  "),
        field.name,
        arguments_to_sdl(&field.args),
        field.type_ref,
        deprecation(field.is_deprecated, field.deprecation_reason.as_deref()),
    )
}

fn enum_value_to_sdl(value: &IntrospectionEnumValue) -> String {
    format!(
        "{}  {}{}\n",
        description(value.description.as_deref(), "  "),
        value.name,
        deprecation(value.is_deprecated, value.deprecation_reason.as_deref()),
    )
}

fn input_value_to_sdl(value: &IntrospectionInputValue, indent: &str) -> String {
    format!(
        "{}{indent}{}\n",
        description(value.description.as_deref(), indent),
        argument_to_sdl(value),
    )
}

fn argument_to_sdl(arg: &IntrospectionInputValue) -> String {
    match &arg.default_value {
        Some(default) => format!("{}: {} = {default}", arg.name, arg.type_ref),
        None => format!("{}: {}", arg.name, arg.type_ref),
    }
}

fn arguments_to_sdl(args: &[IntrospectionInputValue]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = args.iter().map(argument_to_sdl).collect();
    format!("({})", rendered.join(", "))
}

fn deprecation(is_deprecated: bool, reason: Option<&str>) -> String {
    match (is_deprecated, reason) {
        (false, _) => String::new(),
        (true, Some(reason)) if !reason.is_empty() => {
            format!(" @deprecated(reason: \"{}\")", escape_string(reason))
        }
        (true, _) => " @deprecated".to_string(),
    }
}

/// Renders a custom directive definition.
#[must_use]
pub fn directive_to_sdl(directive: &IntrospectionDirective) -> String {
    format!(
        "{}directive @{}{} on {}",
        description(directive.description.as_deref(), ""),
        directive.name,
        arguments_to_sdl(&directive.args),
        directive.locations.join(" | "),
    )
}

fn description(desc: Option<&str>, indent: &str) -> String {
    desc.filter(|d| !d.is_empty())
        .map(|d| format_description(d, indent))
        .unwrap_or_default()
}

/// Formats a description line (or block) followed by a newline.
///
/// Multi-line text becomes a block string with the body inserted verbatim;
/// single-line text becomes an escaped quoted string.
#[must_use]
pub fn format_description(desc: &str, indent: &str) -> String {
    if desc.contains('\n') {
        let body = desc.replace("\"\"\"", "\\\"\"\"");
        format!("{indent}\"\"\"\n{indent}{body}\n{indent}\"\"\"\n")
    } else {
        format!("{indent}\"{}\"\n", escape_string(desc))
    }
}

/// Escapes a value for a single-line GraphQL string.
///
/// Line terminators and other control characters must never appear raw
/// inside a quoted string.
#[must_use]
pub fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{:04X}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

#[must_use]
pub fn is_builtin_directive(name: &str) -> bool {
    BUILTIN_DIRECTIVES.contains(&name)
}
