//! The interactive shell.
//!
//! One line is one command. Lines starting with `{`, `query` or `mutation`
//! are sent to the endpoint as they are; everything else is dispatched by its
//! first word. Command errors are printed and the session continues.

mod call;
mod describe;
mod show;

use crate::output::print_response;
use anyhow::{Context, Result};
use colored::Colorize;
use gqlsh_federation::{Info, Registry};
use gqlsh_introspect::{GraphQLClient, GraphQLRequest};
use gqlsh_schema::SchemaCatalog;
use std::io::{BufRead, Write};

const PROMPT: &str = "gqlsh> ";

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// A shell session over one endpoint and its schema.
pub struct Repl {
    client: GraphQLClient,
    catalog: SchemaCatalog,
    federation: Option<Info>,
}

impl Repl {
    #[must_use]
    pub fn new(client: GraphQLClient, catalog: SchemaCatalog, registry: &Registry) -> Self {
        let federation = registry.detect(&catalog);
        Self {
            client,
            catalog,
            federation,
        }
    }

    /// Reads commands until `exit` or end of input.
    ///
    /// `input` is shared with argument prompts, so a `call` consumes the
    /// lines that follow it.
    pub async fn run(
        &self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        self.banner(out)?;

        loop {
            write!(out, "{}", PROMPT.green())?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            match self.execute(line.trim(), input, out).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "Command failed");
                    writeln!(err, "{} {e:#}", "Error:".red())?;
                }
            }
        }

        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    fn banner(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{} - GraphQL shell", "gqlsh".cyan())?;
        writeln!(out, "Type 'help' for commands.")?;
        if let Some(info) = &self.federation {
            writeln!(
                out,
                "{}: {} (subgraph)",
                "Federation".green(),
                info.provider_name
            )?;
        }
        writeln!(out)
    }

    async fn execute(
        &self,
        line: &str,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<Flow> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if is_operation(line) {
            self.execute_raw(line, out).await?;
            return Ok(Flow::Continue);
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = words.collect();
        tracing::debug!(command, args = args.len(), "Dispatching command");

        match command {
            "help" | "h" | "?" => show::help(out)?,
            "show" => self.show(&args, out).await?,
            "desc" | "describe" => describe::describe(&self.catalog, &args, out)?,
            "call" => self.call(&args, input, out).await?,
            "sdl" => write!(out, "{}", self.catalog.sdl())?,
            "exit" | "quit" | "q" => return Ok(Flow::Exit),
            other => anyhow::bail!("unknown: {other} (type 'help')"),
        }

        Ok(Flow::Continue)
    }

    async fn execute_raw(&self, query: &str, out: &mut dyn Write) -> Result<()> {
        let response = self
            .client
            .execute(&GraphQLRequest::new(query))
            .await
            .context("execute")?;
        print_response(&response, out)?;
        Ok(())
    }
}

/// Whether a line is an operation to send rather than a command.
fn is_operation(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('{') || line.starts_with("query") || line.starts_with("mutation")
}
