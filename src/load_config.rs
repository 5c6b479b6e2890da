//! `load_config` module: turns a YAML file, CLI flags and environment secrets into a [`SyncRequest`].
//!
//! This module is the only place where untrusted YAML is parsed.
//!
//! # Responsibilities
//! - Parse the optional YAML config file
//! - Let CLI flags override file values key by key
//! - Fall back to the GitHub Actions inputs (`INPUT_DIR`, `INPUT_ORG`, ...)
//!   between flags and file
//! - Inject the API token from the environment (`GITBOOK_TOKEN`, or the GitHub
//!   Actions input `INPUT_TOKEN`); it never lives in the file
//! - Fail with a message naming every missing required option
//!
//! # Errors
//! All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::SyncRequest;

pub const TOKEN_ENV: &str = "GITBOOK_TOKEN";
pub const ACTIONS_TOKEN_ENV: &str = "INPUT_TOKEN";
pub const ACTIONS_DIR_ENV: &str = "INPUT_DIR";
pub const ACTIONS_ORG_ENV: &str = "INPUT_ORG";
pub const ACTIONS_SPACE_ENV: &str = "INPUT_SPACE";
pub const ACTIONS_GROUP_ENV: &str = "INPUT_GROUP";
pub const ACTIONS_ENDPOINT_ENV: &str = "INPUT_APIENDPOINT";

/// Keys accepted in the YAML config file. All optional; flags may supply them instead.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub dir: Option<PathBuf>,
    pub org: Option<String>,
    pub space: Option<String>,
    pub group: Option<String>,
    #[serde(alias = "apiEndpoint")]
    pub api_endpoint: Option<String>,
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub org: Option<String>,
    pub space: Option<String>,
    pub group: Option<String>,
    pub api_endpoint: Option<String>,
}

impl Overrides {
    /// Fill every unset key from `fallback`.
    pub fn or(self, fallback: Overrides) -> Overrides {
        Overrides {
            dir: self.dir.or(fallback.dir),
            org: self.org.or(fallback.org),
            space: self.space.or(fallback.space),
            group: self.group.or(fallback.group),
            api_endpoint: self.api_endpoint.or(fallback.api_endpoint),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Read the API token from the environment.
pub fn credential_from_env() -> Result<String> {
    [TOKEN_ENV, ACTIONS_TOKEN_ENV]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .ok_or_else(|| {
            error!("No API token found in environment");
            anyhow::anyhow!("{TOKEN_ENV} (or {ACTIONS_TOKEN_ENV}) environment variable not set")
        })
}

/// A GitHub Actions input; empty means unset.
fn actions_input(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Options supplied as GitHub Actions inputs.
pub fn overrides_from_env() -> Overrides {
    let overrides = Overrides {
        dir: actions_input(ACTIONS_DIR_ENV).map(PathBuf::from),
        org: actions_input(ACTIONS_ORG_ENV),
        space: actions_input(ACTIONS_SPACE_ENV),
        group: actions_input(ACTIONS_GROUP_ENV),
        api_endpoint: actions_input(ACTIONS_ENDPOINT_ENV),
    };
    debug!(?overrides, "Read Actions inputs from environment");
    overrides
}

/// Merge file values, flag overrides and the credential into a request.
pub fn build_request(
    file: FileConfig,
    overrides: Overrides,
    credential: String,
) -> Result<SyncRequest> {
    let dir = overrides.dir.or(file.dir);
    let org = overrides.org.or(file.org);
    let space = overrides.space.or(file.space);

    let missing: Vec<&str> = [
        ("dir", dir.is_none()),
        ("org", org.is_none()),
        ("space", space.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    let (Some(dir), Some(org), Some(space)) = (dir, org, space) else {
        error!(?missing, "Required options missing");
        anyhow::bail!("Missing required option(s): {}", missing.join(", "));
    };

    let request = SyncRequest::new(
        credential,
        dir,
        org,
        space,
        overrides.api_endpoint.or(file.api_endpoint),
        overrides.group.or(file.group),
    );
    request.trace_loaded();
    Ok(request)
}

/// Full load: flags win over Actions inputs, which win over the optional file.
/// The token always comes from the environment.
pub fn resolve_request(config_path: Option<&Path>, overrides: Overrides) -> Result<SyncRequest> {
    let file = match config_path {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let credential = credential_from_env()?;
    build_request(file, overrides.or(overrides_from_env()), credential)
}
