//! High-level pipeline: resolve identity → ensure group → sync files.
//!
//! This module provides the top-level orchestration for one synchronisation
//! run. The stages are strictly sequential because each needs the result of
//! the previous one:
//!   - the organization and space are resolved by name ([`crate::identity`])
//!   - the optional group is found or created ([`crate::group`])
//!   - every local file is created or updated concurrently ([`crate::files`])
//!
//! # Error Handling
//! The first failing stage ends the run with its [`SyncError`]; nothing that
//! was already written is rolled back.
//!
//! # Callable From
//! Used by the CLI and by integration tests, which pass a `MockContentApi`.

use serde::Serialize;
use tracing::{error, info};

use crate::config::SyncRequest;
use crate::contract::ContentApi;
use crate::error::SyncError;
use crate::files::{sync_files, FileReport};
use crate::group::{ensure_group, GroupOutcome};
use crate::identity::{resolve_organization, resolve_space, Organization, Space};
use crate::progress::Progress;

/// What a successful run resolved and wrote.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub organization: Organization,
    pub space: Space,
    pub group: Option<GroupOutcome>,
    /// In sync (sorted filename) order.
    pub files: Vec<FileReport>,
}

pub async fn synchronise<A>(
    request: &SyncRequest,
    api: &A,
    progress: &dyn Progress,
) -> Result<SyncReport, SyncError>
where
    A: ContentApi + ?Sized,
{
    info!("[SYNC] Starting synchronisation");

    progress.start_group("Requesting organizations");
    let organization = resolve_organization(api, &request.organization_title, progress).await;
    progress.end_group();
    let organization = organization?;

    progress.start_group(&format!(
        "Requesting spaces for org {}",
        request.organization_title
    ));
    let space = resolve_space(api, &request.space_name, &organization, progress).await;
    progress.end_group();
    let space = space?;

    let placement = ensure_group(api, &space, request.group_name.as_deref(), progress).await?;

    progress.start_group(&format!(
        "Synchronizing files of dir {}",
        request.local_directory.display()
    ));
    let files = sync_files(api, &request.local_directory, &placement.prefix, progress).await;
    progress.end_group();
    let files = files.map_err(|e| {
        error!(error = %e, "[SYNC][ERROR] File synchronisation failed");
        e
    })?;

    info!(
        organization_id = %organization.id,
        space_id = %space.id,
        files = files.len(),
        "[SYNC] Synchronisation complete"
    );
    Ok(SyncReport {
        organization,
        space,
        group: placement.outcome,
        files,
    })
}
