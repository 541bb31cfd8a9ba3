//! `call <name> [selection]`: build an operation for a root field
//! interactively and send it.

use super::Repl;
use crate::output::print_response;
use anyhow::{Context, Result};
use colored::Colorize;
use gqlsh_introspect::GraphQLRequest;
use gqlsh_query::{build_operation, collect_arguments, selection_for_field, ArgumentValues};
use gqlsh_schema::CatalogType;
use std::io::{BufRead, Write};

impl Repl {
    pub(super) async fn call(
        &self,
        args: &[&str],
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<()> {
        let Some((name, selection)) = args.split_first() else {
            return Ok(self.list_callable(out)?);
        };

        let (operation, field) = self
            .catalog
            .find_operation_field(name)
            .with_context(|| format!("not found: {name}"))?;

        let selection =
            selection_for_field(&self.catalog, field, Some(selection.join(" ").as_str()))?;

        let values = if field.arguments.is_empty() {
            ArgumentValues::new()
        } else {
            writeln!(out, "{}", "Arguments:".cyan())?;
            match collect_arguments(&field.arguments, input, out)? {
                Some(values) => values,
                None => {
                    writeln!(out)?;
                    writeln!(out, "Canceled.")?;
                    return Ok(());
                }
            }
        };

        let query = build_operation(operation, field, &values, &selection);
        writeln!(out)?;
        writeln!(out, "{}", "Query:".cyan())?;
        writeln!(out, "{query}")?;
        writeln!(out)?;

        let response = self
            .client
            .execute(&GraphQLRequest::new(query))
            .await
            .context("execute")?;
        print_response(&response, out)?;
        Ok(())
    }

    fn list_callable(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}", "Available:".cyan())?;
        write_callable(self.catalog.query_type(), "query", out)?;
        write_callable(self.catalog.mutation_type(), "mutation", out)?;
        writeln!(out)?;
        writeln!(out, "Usage: call <name> [selection]")
    }
}

fn write_callable(
    root: Option<&CatalogType>,
    label: &str,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    for field in root
        .into_iter()
        .flat_map(|root| &root.fields)
        .filter(|field| !field.name.starts_with("__"))
    {
        writeln!(out, "  {} ({label})", field.name)?;
    }
    Ok(())
}
