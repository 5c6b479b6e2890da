//! Ensure the optional one-level group exists in a space.

use serde::Serialize;
use tracing::{error, info};

use crate::content_path::ContentPath;
use crate::contract::{ContentApi, Lookup, PageBatch};
use crate::error::SyncError;
use crate::identity::Space;
use crate::progress::Progress;

/// What happened to the requested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    pub slug: String,
    pub created: bool,
}

/// Where documents go, and what (if anything) was done to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlacement {
    pub prefix: ContentPath,
    pub outcome: Option<GroupOutcome>,
}

pub fn group_slug(group_name: &str) -> String {
    group_name.to_lowercase()
}

/// Check for the group under the space root and create it when absent.
///
/// Without a group name this returns the bare space root and makes no calls.
/// Creation is attempted at most once; its response payload is not inspected.
pub async fn ensure_group<A>(
    api: &A,
    space: &Space,
    group_name: Option<&str>,
    progress: &dyn Progress,
) -> Result<GroupPlacement, SyncError>
where
    A: ContentApi + ?Sized,
{
    let root = ContentPath::space_root(&space.id);
    let Some(name) = group_name else {
        return Ok(GroupPlacement {
            prefix: root,
            outcome: None,
        });
    };

    let slug = group_slug(name);
    let group_dir = root.child_dir(&slug);

    progress.start_group(&format!("Checking if group {name} exists"));
    let lookup = api.get(group_dir.as_str()).await;
    progress.end_group();

    let created = match lookup {
        Lookup::Found(_) => {
            info!(group = %name, path = %group_dir, "Group already exists");
            false
        }
        Lookup::Absent => {
            progress.start_group(&format!("Creating group {name}"));
            let written = api.put(root.as_str(), &PageBatch::group(&slug, name)).await;
            progress.end_group();
            if let Err(source) = written {
                error!(error = %source, group = %name, "[SYNC][ERROR] Group creation failed");
                return Err(SyncError::RemoteWrite {
                    path: root.as_str().to_string(),
                    source,
                });
            }
            info!(group = %name, path = %group_dir, "Group created");
            true
        }
        Lookup::Failed(source) => {
            error!(error = %source, group = %name, "[SYNC][ERROR] Group lookup failed");
            return Err(SyncError::RemoteLookup {
                path: group_dir.as_str().to_string(),
                source,
            });
        }
    };

    Ok(GroupPlacement {
        prefix: group_dir,
        outcome: Some(GroupOutcome { slug, created }),
    })
}
