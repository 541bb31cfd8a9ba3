use crate::{ConfigError, GqlshConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".gqlshrc.yml",
    ".gqlshrc.yaml",
    ".gqlshrc.json",
    ".gqlshrc",
    "gqlsh.config.yml",
    "gqlsh.config.yaml",
    "gqlsh.config.json",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// The format is chosen from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GqlshConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        profiles = config.profile_count(),
        has_profiles = config.has_profiles(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GqlshConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        // .gqlshrc without extension: YAML is a superset of JSON
        "" if file_name == ".gqlshrc" => parse_yaml(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<GqlshConfig> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<GqlshConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &GqlshConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if config.profile_count() == 0 {
        return Err(invalid("'profiles' must define at least one profile".to_string()));
    }

    if let GqlshConfig::Profiles {
        profiles,
        default: Some(default),
    } = config
    {
        if !profiles.contains_key(default) {
            return Err(invalid(format!(
                "Default profile '{default}' is not defined"
            )));
        }
    }

    for (name, endpoint) in config.profiles() {
        tracing::trace!(profile = name, "Validating endpoint config");

        let url = endpoint.url.trim();
        if url.is_empty() {
            return Err(invalid(format!("Profile '{name}' has an empty url")));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(invalid(format!(
                "Profile '{name}' url must start with http:// or https://, got '{url}'"
            )));
        }
        if endpoint.timeout == Some(0) {
            return Err(invalid(format!("Profile '{name}' timeout must be positive")));
        }
        if endpoint.headers.keys().any(|header| header.trim().is_empty()) {
            return Err(invalid(format!("Profile '{name}' has an empty header name")));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
