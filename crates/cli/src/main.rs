mod exit_code;
mod output;
mod repl;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use exit_code::ExitCode;
use gqlsh_config::ConfigError;
use gqlsh_federation::Registry;
use gqlsh_introspect::{GraphQLClient, GraphQLRequest, IntrospectionError};
use gqlsh_schema::{SchemaCatalog, SchemaError};
use repl::Repl;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gqlsh")]
#[command(about = "Interactive shell for GraphQL endpoints")]
#[command(long_about = "Interactive shell for GraphQL endpoints.

Without a query, gqlsh introspects the endpoint and starts a shell for
exploring the schema and building operations. With -q, -f or a query piped
on stdin, it sends that one query and prints the response as JSON.

Examples:
  gqlsh -e https://api.example.com/graphql
  gqlsh -e https://api.example.com/graphql -q '{ users { id } }'
  gqlsh -e https://api.example.com/graphql -H 'Authorization: Bearer token'
  echo '{ users { id } }' | gqlsh -p staging")]
#[command(version)]
struct Cli {
    /// GraphQL endpoint URL (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// HTTP header to send with every request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    headers: Vec<String>,

    /// Execute this query and exit
    #[arg(short, long, conflicts_with = "file")]
    query: Option<String>,

    /// Read the query to execute from a file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Request timeout in seconds (overrides config file, default: 30)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Path to gqlsh config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Profile name (for multi-profile configs)
    #[arg(short, long)]
    profile: Option<String>,

    /// Force colored output even when not a TTY
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "Error:".red());
            exit_code_for(&err)
        }
    };

    tracing::debug!(code = code.code(), %code, "Exiting");
    if code != ExitCode::Success {
        code.exit();
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = settings::resolve_settings(
        cli.endpoint,
        cli.config,
        cli.profile.as_deref(),
        &cli.headers,
        cli.timeout,
    )?;
    tracing::info!(
        endpoint = %settings.url,
        headers = settings.headers.len(),
        timeout = settings.timeout,
        "Resolved settings"
    );
    let client = settings.client();

    if let Some(query) = read_query(cli.query, cli.file.as_deref())? {
        return run_query(&client, &query).await;
    }

    run_repl(client).await?;
    Ok(ExitCode::Success)
}

/// The one-shot query from `--query`, `--file` or piped stdin, if any.
fn read_query(query: Option<String>, file: Option<&Path>) -> Result<Option<String>> {
    if query.is_some() {
        return Ok(query);
    }

    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query from {}", path.display()))?;
        return Ok(Some(text));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("Failed to read query from stdin")?;
    Ok(Some(text).filter(|text| !text.trim().is_empty()))
}

#[tracing::instrument(skip_all, fields(endpoint = client.endpoint()))]
async fn run_query(client: &GraphQLClient, query: &str) -> Result<ExitCode> {
    let response = client
        .execute(&GraphQLRequest::new(query))
        .await
        .context("Failed to execute query")?;

    let document = output::one_shot_document(&response);
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(if response.has_errors() {
        ExitCode::QueryError
    } else {
        ExitCode::Success
    })
}

async fn run_repl(client: GraphQLClient) -> Result<()> {
    println!("Connecting to {}...", client.endpoint());

    let schema = client
        .introspect()
        .await
        .context("Introspection failed")?;
    let catalog = SchemaCatalog::from_introspection(&schema).context("Failed to load schema")?;
    println!("Loaded {} types.\n", catalog.types().len());

    let repl = Repl::new(client, catalog, &Registry::with_defaults());
    repl.run(
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr(),
    )
    .await
}

/// Maps the first recognized cause of a failure to its exit code.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return ExitCode::ConfigError;
        }
        if cause.is::<SchemaError>() {
            return ExitCode::SchemaError;
        }
        if let Some(introspection) = cause.downcast_ref::<IntrospectionError>() {
            return match introspection {
                IntrospectionError::Network(_)
                | IntrospectionError::Http(..)
                | IntrospectionError::Parse(_) => ExitCode::TransportError,
                IntrospectionError::Invalid(_) | IntrospectionError::GraphQL(_) => {
                    ExitCode::SchemaError
                }
            };
        }
        if cause.is::<std::io::Error>() {
            return ExitCode::IoError;
        }
    }
    // Flag and header mistakes surface as plain messages
    ExitCode::ConfigError
}

/// Initialize tracing; `RUST_LOG` selects what is logged (nothing by default).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "gqlsh",
            "-e",
            "http://localhost:4000/graphql",
            "-H",
            "Authorization: Bearer a",
            "--header",
            "X-Trace: 1",
            "--timeout",
            "5",
            "-q",
            "{ now }",
        ])
        .unwrap();

        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:4000/graphql"));
        assert_eq!(cli.headers, ["Authorization: Bearer a", "X-Trace: 1"]);
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.query.as_deref(), Some("{ now }"));
        assert!(!cli.color && !cli.no_color);
    }

    #[test]
    fn test_cli_conflicts() {
        assert!(Cli::try_parse_from(["gqlsh", "--color", "--no-color"]).is_err());
        assert!(Cli::try_parse_from(["gqlsh", "-q", "{ a }", "-f", "q.graphql"]).is_err());
    }

    #[test]
    fn test_read_query_prefers_flag_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.graphql");
        std::fs::write(&path, "{ users { id } }").unwrap();

        assert_eq!(
            read_query(Some("{ now }".to_string()), Some(path.as_path())).unwrap(),
            Some("{ now }".to_string())
        );
        assert_eq!(
            read_query(None, Some(path.as_path())).unwrap(),
            Some("{ users { id } }".to_string())
        );
    }

    #[test]
    fn test_read_query_missing_file_is_io_error() {
        let err = read_query(None, Some(Path::new("/nonexistent/query.graphql"))).unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::IoError);
    }

    #[test]
    fn test_exit_codes_follow_error_cause() {
        let transport = anyhow::Error::new(IntrospectionError::Http(502, String::new()))
            .context("Introspection failed");
        assert_eq!(exit_code_for(&transport), ExitCode::TransportError);

        let rejected = anyhow::Error::new(IntrospectionError::GraphQL("disabled".to_string()));
        assert_eq!(exit_code_for(&rejected), ExitCode::SchemaError);

        let schema = anyhow::Error::new(SchemaError::Parse("bad".to_string()));
        assert_eq!(exit_code_for(&schema), ExitCode::SchemaError);

        let config = anyhow::Error::new(ConfigError::NoDefaultProfile {
            available: "a, b".to_string(),
        });
        assert_eq!(exit_code_for(&config), ExitCode::ConfigError);

        let header = settings::parse_header("nonsense").unwrap_err();
        assert_eq!(exit_code_for(&header), ExitCode::ConfigError);
    }

    #[tokio::test]
    async fn test_run_query_reports_graphql_errors() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": null,
                "errors": [{ "message": "boom" }]
            })))
            .mount(&server)
            .await;

        let client = GraphQLClient::new(server.uri());
        let code = run_query(&client, "{ now }").await.unwrap();
        assert_eq!(code, ExitCode::QueryError);
    }

    #[tokio::test]
    async fn test_run_query_transport_failure() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = GraphQLClient::new(server.uri());
        let err = run_query(&client, "{ now }").await.unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::TransportError);
    }
}
