//! Endpoint settings resolved from command-line flags and the config file.

use anyhow::{Context, Result};
use gqlsh_config::{find_config, load_config, EndpointConfig};
use gqlsh_introspect::{GraphQLClient, DEFAULT_TIMEOUT_SECS};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where to send requests and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: u64,
}

impl Settings {
    #[must_use]
    pub fn client(&self) -> GraphQLClient {
        GraphQLClient::new(&self.url)
            .with_headers(self.headers.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Parses a header string in "Name: Value" format.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Resolve settings from flags, falling back to the config file.
///
/// An endpoint given on the command line without `--config` or `--profile`
/// is used with CLI settings only. Otherwise the config file is loaded
/// (discovered from the current directory unless `--config` names one) and
/// CLI flags override it: `--endpoint` replaces the URL, `--header` replaces
/// config headers of the same name (case-insensitive) and `--timeout`
/// replaces the configured timeout.
pub fn resolve_settings(
    endpoint: Option<String>,
    config_path: Option<PathBuf>,
    profile: Option<&str>,
    cli_headers: &[String],
    cli_timeout: Option<u64>,
) -> Result<Settings> {
    let cli_parsed = cli_headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;

    if cli_timeout == Some(0) {
        anyhow::bail!("--timeout must be a positive number of seconds");
    }

    if let (Some(url), None, None) = (&endpoint, &config_path, profile) {
        return Ok(Settings {
            url: url.clone(),
            headers: cli_parsed,
            timeout: cli_timeout.unwrap_or(DEFAULT_TIMEOUT_SECS),
        });
    }

    let config = load_from_config(config_path, profile)?;

    let mut headers: Vec<(String, String)> = config.headers.into_iter().collect();
    for (name, value) in cli_parsed {
        headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    Ok(Settings {
        url: endpoint.unwrap_or(config.url),
        headers,
        timeout: cli_timeout.unwrap_or(config.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Load the endpoint for `profile` from the given or discovered config file.
fn load_from_config(config_path: Option<PathBuf>, profile: Option<&str>) -> Result<EndpointConfig> {
    let config_path = if let Some(path) = config_path {
        path
    } else {
        let current_dir = std::env::current_dir()?;
        discover(&current_dir)?
    };

    tracing::debug!(path = %config_path.display(), profile, "Loading endpoint from config");
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let endpoint = config.endpoint(profile)?;
    Ok(endpoint.clone())
}

fn discover(start_dir: &Path) -> Result<PathBuf> {
    find_config(start_dir)
        .context("Failed to search for config")?
        .context(
            "No endpoint given and no config file found.\n\n\
            Usage:\n  \
            gqlsh --endpoint <URL>\n  \
            gqlsh --config <FILE> [--profile <NAME>]",
        )
}
