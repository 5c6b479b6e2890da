//! Create or update one remote document per local file.
//!
//! Files are listed and sorted, then every file's read → lookup → write
//! sequence runs concurrently. All of them run to completion; the first
//! failure in sync order becomes the result.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::content_path::ContentPath;
use crate::contract::{ContentApi, Lookup, PageBatch};
use crate::error::{file_read_err, SyncError};
use crate::progress::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub slug: String,
    pub action: PageAction,
    pub revision: Option<String>,
}

/// The part of a filename before its first `.`.
pub fn derive_slug(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Slug with every hyphen turned into a space.
pub fn derive_title(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Regular files of `dir`, sorted by name.
async fn list_files(dir: &Path) -> Result<Vec<String>, SyncError> {
    let dir_err = |source| SyncError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(dir_err)?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(dir_err)? {
        let file_type = entry.file_type().await.map_err(dir_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !file_type.is_file() {
            debug!(entry = %name, "Skipping non-file entry");
            continue;
        }
        if derive_slug(&name).is_empty() {
            warn!(entry = %name, "Skipping file with empty slug");
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

async fn sync_file<A>(
    api: &A,
    dir: &Path,
    prefix: &ContentPath,
    file_name: &str,
    progress: &dyn Progress,
) -> Result<FileReport, SyncError>
where
    A: ContentApi + ?Sized,
{
    progress.info(&format!("start sync of file {file_name}"));
    let path: PathBuf = dir.join(file_name);
    let slug = derive_slug(file_name);
    let title = derive_title(slug);

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| file_read_err(&path, e))?;

    progress.info(&format!("checking if file {file_name} exists"));
    let page_path = prefix.page(slug);
    let lookup = api.get(&page_path).await;
    let exists = lookup.uid().is_some();
    let (target, action) = match lookup {
        Lookup::Failed(source) => {
            error!(error = %source, file = %file_name, "[SYNC][ERROR] Existence check failed");
            return Err(SyncError::RemoteLookup {
                path: page_path,
                source,
            });
        }
        _ if exists => {
            progress.info("file exist, updating it...");
            (page_path, PageAction::Updated)
        }
        // Absent, or found without a uid to update in place.
        _ => (prefix.as_str().to_string(), PageAction::Created),
    };

    progress.debug(&format!("creating / updating file at url {target}"));
    let body = PageBatch::document(slug, &title, content);
    let response = api.put(&target, &body).await.map_err(|source| {
        error!(error = %source, file = %file_name, path = %target, "[SYNC][ERROR] Page write failed");
        SyncError::RemoteWrite {
            path: target.clone(),
            source,
        }
    })?;

    let revision = response.get("revision").map(|r| match r {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    });
    info!(file = %file_name, ?action, revision = ?revision, "Page synchronised");
    Ok(FileReport {
        file_name: file_name.to_string(),
        slug: slug.to_string(),
        action,
        revision,
    })
}

/// Synchronise every file of `dir` into `prefix`.
pub async fn sync_files<A>(
    api: &A,
    dir: &Path,
    prefix: &ContentPath,
    progress: &dyn Progress,
) -> Result<Vec<FileReport>, SyncError>
where
    A: ContentApi + ?Sized,
{
    let names = list_files(dir).await?;
    info!(dir = %dir.display(), count = names.len(), "Listed files to synchronise");

    let outcomes = join_all(
        names
            .iter()
            .map(|name| sync_file(api, dir, prefix, name, progress)),
    )
    .await;

    outcomes.into_iter().collect()
}
