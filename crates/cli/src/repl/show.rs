//! `help` and `show`.

use super::Repl;
use anyhow::{Context, Result};
use colored::Colorize;
use gqlsh_schema::CatalogType;
use std::io::Write;

const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "h, ?", "Show this help message"),
    ("show", "", "Show schema info (types, queries, mutations, federation)"),
    ("desc", "describe", "Describe a type or field"),
    ("call", "", "Call a query or mutation interactively"),
    ("sdl", "", "Print the reconstructed schema"),
    ("exit", "quit, q", "Exit the shell"),
];

pub(super) fn help(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", "Commands:".cyan())?;
    for (name, aliases, description) in COMMANDS {
        let aliases = if aliases.is_empty() {
            String::new()
        } else {
            format!(" ({aliases})")
        };
        writeln!(out, "  {}{} - {description}", name.cyan(), aliases.yellow())?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Tips:".cyan())?;
    writeln!(out, "  - call <name> [selection] picks fields, e.g. call users id posts {{ title }}")?;
    writeln!(out, "  - Type raw GraphQL starting with '{{', 'query' or 'mutation'")?;
    Ok(())
}

impl Repl {
    pub(super) async fn show(&self, args: &[&str], out: &mut dyn Write) -> Result<()> {
        let Some(what) = args.first() else {
            writeln!(out, "Usage: show [types|queries|mutations|federation]")?;
            return Ok(());
        };

        match *what {
            "types" => {
                writeln!(out, "{}", "Types:".cyan())?;
                for ty in self.catalog.types() {
                    writeln!(out, "  {} {}", ty.kind.as_str().yellow(), ty.name)?;
                }
            }
            "queries" => show_fields(&"Queries:".cyan(), self.catalog.query_type(), out)?,
            "mutations" => show_fields(&"Mutations:".cyan(), self.catalog.mutation_type(), out)?,
            "federation" => self.show_federation(out).await?,
            other => {
                anyhow::bail!("unknown: {other} (use: types, queries, mutations, federation)")
            }
        }
        Ok(())
    }

    async fn show_federation(&self, out: &mut dyn Write) -> Result<()> {
        let Some(info) = &self.federation else {
            writeln!(out, "Not a federated subgraph")?;
            return Ok(());
        };
        let provider = info.provider();

        writeln!(
            out,
            "{}: {} (subgraph)",
            "Federation".green(),
            info.provider_name
        )?;

        let directives = provider.federation_directives(&self.catalog);
        if !directives.is_empty() {
            let directives: Vec<String> = directives.iter().map(|d| format!("@{d}")).collect();
            writeln!(out, "Directives: {}", directives.join(", "))?;
        }

        write!(out, "{}", provider.format_entity_info(&self.catalog))?;

        let sdl = provider
            .service_sdl(&self.client)
            .await
            .context("fetch service SDL")?;
        writeln!(out)?;
        writeln!(out, "{}", "Service SDL:".cyan())?;
        writeln!(out, "{}", sdl.trim_end())?;
        Ok(())
    }
}

fn show_fields(
    title: &dyn std::fmt::Display,
    root: Option<&CatalogType>,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let Some(root) = root else {
        return writeln!(out, "Not defined");
    };

    writeln!(out, "{title}")?;
    for field in root.fields.iter().filter(|f| !f.name.starts_with("__")) {
        writeln!(out, "  {}: {}", field.name.yellow(), field.type_ref)?;
    }
    Ok(())
}
