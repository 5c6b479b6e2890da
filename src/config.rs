//! The validated, immutable input of one synchronisation run.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::client::DEFAULT_API_ENDPOINT;

/// Everything one synchronisation run needs. Built once, never mutated.
#[derive(Clone)]
pub struct SyncRequest {
    pub credential: String,
    pub local_directory: PathBuf,
    pub organization_title: String,
    pub space_name: String,
    pub remote_endpoint: String,
    pub group_name: Option<String>,
}

impl SyncRequest {
    /// Build a request; empty endpoint or group inputs count as not given.
    pub fn new(
        credential: impl Into<String>,
        local_directory: impl Into<PathBuf>,
        organization_title: impl Into<String>,
        space_name: impl Into<String>,
        remote_endpoint: Option<String>,
        group_name: Option<String>,
    ) -> Self {
        SyncRequest {
            credential: credential.into(),
            local_directory: local_directory.into(),
            organization_title: organization_title.into(),
            space_name: space_name.into(),
            remote_endpoint: remote_endpoint
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            group_name: group_name.filter(|g| !g.is_empty()),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            dir = %self.local_directory.display(),
            org = %self.organization_title,
            space = %self.space_name,
            group = self.group_name.as_deref().unwrap_or("<none>"),
            endpoint = %self.remote_endpoint,
            "Loaded SyncRequest"
        );
        debug!(?self, "SyncRequest loaded (full debug)");
    }
}

impl std::fmt::Debug for SyncRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRequest")
            .field("credential", &"<redacted>")
            .field("local_directory", &self.local_directory)
            .field("organization_title", &self.organization_title)
            .field("space_name", &self.space_name)
            .field("remote_endpoint", &self.remote_endpoint)
            .field("group_name", &self.group_name)
            .finish()
    }
}
