//! Rendering of operation responses.

use colored::Colorize;
use gqlsh_introspect::GraphQLResponse;
use std::io::{self, Write};

/// Prints a response for the shell: the errors first, then the data as
/// indented JSON.
pub fn print_response(response: &GraphQLResponse, out: &mut dyn Write) -> io::Result<()> {
    if response.has_errors() {
        writeln!(out, "{}", "Errors:".red())?;
        for error in response.errors() {
            writeln!(out, "  - {}", error.message)?;
        }
        writeln!(out)?;
    }

    if let Some(data) = &response.data {
        let pretty = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
        writeln!(out, "{pretty}")?;
    }

    Ok(())
}

/// The document printed in one-shot mode.
///
/// Without errors this is the `data` value on its own; with errors it is an
/// object carrying `errors` and, when the server sent any, `data`.
#[must_use]
pub fn one_shot_document(response: &GraphQLResponse) -> serde_json::Value {
    if !response.has_errors() {
        return response.data.clone().unwrap_or(serde_json::Value::Null);
    }

    let mut document = serde_json::Map::new();
    document.insert(
        "errors".to_string(),
        serde_json::Value::Array(
            response
                .errors()
                .iter()
                .map(|error| serde_json::json!({ "message": error.message }))
                .collect(),
        ),
    );
    if let Some(data) = &response.data {
        document.insert("data".to_string(), data.clone());
    }
    serde_json::Value::Object(document)
}
