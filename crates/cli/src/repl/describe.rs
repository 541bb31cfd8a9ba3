//! `desc <Type>[.field]` and `desc <Type> <field>`.

use anyhow::{Context, Result};
use colored::Colorize;
use gqlsh_schema::{ArgumentSpec, CatalogType, FieldSpec, SchemaCatalog, TypeKind};
use std::io::{self, Write};

pub(super) fn describe(catalog: &SchemaCatalog, args: &[&str], out: &mut dyn Write) -> Result<()> {
    let (type_name, field_name) = target(args).context("usage: desc <type> [field]")?;

    let ty = catalog
        .get_type(type_name)
        .with_context(|| format!("type not found: {type_name}"))?;

    match field_name {
        Some(field_name) => describe_member(ty, field_name, out),
        None => Ok(describe_type(ty, out)?),
    }
}

/// Splits `Type.field`, `Type field` or `Type`.
fn target<'a>(args: &[&'a str]) -> Option<(&'a str, Option<&'a str>)> {
    let first = *args.first()?;
    if let Some((type_name, field_name)) = first.split_once('.') {
        return Some((type_name, Some(field_name)));
    }
    Some((first, args.get(1).copied()))
}

fn describe_type(ty: &CatalogType, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{} {}", ty.kind.as_str().cyan(), ty.name.yellow())?;
    if !ty.interfaces.is_empty() {
        writeln!(out, "  implements {}", ty.interfaces.join(" & "))?;
    }
    write_description(ty.description.as_deref(), out)?;

    match ty.kind {
        TypeKind::Object | TypeKind::Interface => {
            for field in ty.fields.iter().filter(|f| !f.name.starts_with("__")) {
                writeln!(
                    out,
                    "  {}: {}{}",
                    field.name.yellow(),
                    field.type_ref.to_string().green(),
                    deprecation(field.is_deprecated, field.deprecation_reason.as_deref())
                )?;
            }
        }
        TypeKind::InputObject => {
            for field in &ty.input_fields {
                writeln!(
                    out,
                    "  {}: {}",
                    field.name.yellow(),
                    field.type_ref.to_string().green()
                )?;
            }
        }
        TypeKind::Enum => {
            for value in &ty.enum_values {
                writeln!(
                    out,
                    "  {}{}",
                    value.name.yellow(),
                    deprecation(value.is_deprecated, value.deprecation_reason.as_deref())
                )?;
            }
        }
        TypeKind::Union => {
            for member in &ty.members {
                writeln!(out, "  {}", member.yellow())?;
            }
        }
        TypeKind::Scalar => {}
    }
    Ok(())
}

fn describe_member(ty: &CatalogType, field_name: &str, out: &mut dyn Write) -> Result<()> {
    if let Some(field) = ty.field(field_name) {
        describe_field(ty, field, out)?;
        return Ok(());
    }

    let input = ty
        .input_fields
        .iter()
        .find(|field| field.name == field_name)
        .with_context(|| format!("field not found: {}.{field_name}", ty.name))?;
    writeln!(
        out,
        "{}.{}: {}",
        ty.name.cyan(),
        input.name.yellow(),
        input.type_ref.to_string().green()
    )?;
    write_description(input.description.as_deref(), out)?;
    Ok(())
}

fn describe_field(ty: &CatalogType, field: &FieldSpec, out: &mut dyn Write) -> io::Result<()> {
    writeln!(
        out,
        "{}.{}: {}",
        ty.name.cyan(),
        field.name.yellow(),
        field.type_ref.to_string().green()
    )?;
    write_description(field.description.as_deref(), out)?;
    if field.is_deprecated {
        let note = format!("({})", deprecation_note(field.deprecation_reason.as_deref()));
        writeln!(out, "  {}", note.dimmed())?;
    }

    if !field.arguments.is_empty() {
        writeln!(out, "  Arguments:")?;
        for arg in &field.arguments {
            write_argument(arg, out)?;
        }
    }
    Ok(())
}

fn write_argument(arg: &ArgumentSpec, out: &mut dyn Write) -> io::Result<()> {
    let default = arg
        .default_value
        .as_deref()
        .map_or_else(String::new, |value| format!(" = {value}"));
    let required = if arg.type_ref.is_non_null() {
        " (required)".yellow().to_string()
    } else {
        String::new()
    };
    writeln!(out, "    {}: {}{default}{required}", arg.name, arg.type_ref)
}

fn write_description(description: Option<&str>, out: &mut dyn Write) -> io::Result<()> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(());
    };
    for line in description.lines() {
        writeln!(out, "  {}", line.trim().dimmed())?;
    }
    Ok(())
}

/// Suffix for deprecated fields and values, empty otherwise.
fn deprecation(is_deprecated: bool, reason: Option<&str>) -> String {
    if !is_deprecated {
        return String::new();
    }
    format!(" ({})", deprecation_note(reason))
        .dimmed()
        .to_string()
}

fn deprecation_note(reason: Option<&str>) -> String {
    match reason.filter(|r| !r.is_empty()) {
        Some(reason) => format!("deprecated: {reason}"),
        None => "deprecated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::tests::{blog_catalog, strip_ansi};

    fn run(args: &[&str]) -> Result<String> {
        let catalog = blog_catalog();
        let mut out = Vec::new();
        describe(&catalog, args, &mut out)?;
        Ok(strip_ansi(&String::from_utf8(out)?))
    }

    #[test]
    fn test_target_forms() {
        assert_eq!(target(&["User"]), Some(("User", None)));
        assert_eq!(target(&["User.email"]), Some(("User", Some("email"))));
        assert_eq!(target(&["User", "email"]), Some(("User", Some("email"))));
        assert_eq!(target(&[]), None);
    }

    #[test]
    fn test_describe_object() {
        let text = run(&["User"]).unwrap();
        assert!(text.starts_with("OBJECT User\n  implements Node\n  A registered account\n"));
        assert!(text.contains("  posts: [Post!]!\n"));
        assert!(text.contains("  username: String (deprecated"));
    }

    #[test]
    fn test_describe_enum_union_input() {
        let text = run(&["Role"]).unwrap();
        assert!(text.starts_with("ENUM Role\n  ADMIN\n  MEMBER\n  GUEST (deprecated: Use MEMBER)\n"));

        let text = run(&["SearchResult"]).unwrap();
        assert_eq!(text, "UNION SearchResult\n  User\n  Post\n");

        let text = run(&["CreateUserInput"]).unwrap();
        assert_eq!(
            text,
            "INPUT_OBJECT CreateUserInput\n  name: String!\n  email: String\n  role: Role\n"
        );
    }

    #[test]
    fn test_describe_field_with_arguments() {
        let text = run(&["Query", "users"]).unwrap();
        assert_eq!(
            text,
            "Query.users: [User!]!\n  List users\n  Arguments:\n    first: Int = 10\n    role: Role\n"
        );

        let text = run(&["Mutation.deleteUser"]).unwrap();
        assert!(text.ends_with("  Arguments:\n    id: ID! (required)\n"));
    }

    #[test]
    fn test_describe_multiline_description() {
        let text = run(&["User.email"]).unwrap();
        assert_eq!(
            text,
            "User.email: String\n  Primary contact address.\n  May be hidden by privacy settings.\n"
        );
    }

    #[test]
    fn test_describe_deprecated_field() {
        let text = run(&["User", "username"]).unwrap();
        assert!(text.starts_with("User.username: String\n  (deprecated"));
    }

    #[test]
    fn test_describe_input_field() {
        let text = run(&["CreateUserInput.role"]).unwrap();
        assert_eq!(text, "CreateUserInput.role: Role\n");
    }

    #[test]
    fn test_describe_errors() {
        assert_eq!(
            run(&[]).unwrap_err().to_string(),
            "usage: desc <type> [field]"
        );
        assert_eq!(
            run(&["Nope"]).unwrap_err().to_string(),
            "type not found: Nope"
        );
        assert_eq!(
            run(&["User.nope"]).unwrap_err().to_string(),
            "field not found: User.nope"
        );
    }
}
