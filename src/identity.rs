//! Resolve human-readable organization and space names to their stable ids.
//!
//! Both lookups are fatal on failure: without an organization there is no
//! space, and without a space there is nothing to write to.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::contract::{ContentApi, Lookup};
use crate::error::SyncError;
use crate::progress::Progress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "uid")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    #[serde(rename = "uid")]
    pub id: String,
    pub name: String,
}

/// `{ "items": [...] }` as returned by the listing endpoints.
///
/// Items stay raw so that one entry of another shape (e.g. a user owner
/// without a `title`) does not poison the whole listing.
#[derive(Debug, Deserialize)]
struct Listing {
    items: Option<Vec<serde_json::Value>>,
}

/// Fetch a listing and return the items that parse as `T`, or why there are none.
async fn fetch_items<T, A>(api: &A, path: &str) -> Result<Vec<T>, String>
where
    T: DeserializeOwned,
    A: ContentApi + ?Sized,
{
    let payload = match api.get(path).await {
        Lookup::Found(value) => value,
        Lookup::Absent => return Err(format!("{path} returned not found")),
        Lookup::Failed(e) => return Err(e.to_string()),
    };
    let listing: Listing =
        serde_json::from_value(payload).map_err(|e| format!("malformed listing: {e}"))?;
    let raw = match listing.items {
        Some(items) if !items.is_empty() => items,
        Some(_) => return Err("listing is empty".to_string()),
        None => return Err("listing has no items".to_string()),
    };
    Ok(raw
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, path = %path, "Skipping listing item of unexpected shape");
                None
            }
        })
        .collect())
}

pub async fn resolve_organization<A>(
    api: &A,
    title: &str,
    progress: &dyn Progress,
) -> Result<Organization, SyncError>
where
    A: ContentApi + ?Sized,
{
    let organizations: Vec<Organization> = fetch_items(api, "orgs").await.map_err(|reason| {
        error!(%reason, "[SYNC][ERROR] Listing organizations failed");
        SyncError::OrganizationList { reason }
    })?;
    debug!(count = organizations.len(), "Organizations listed");

    let organization = organizations
        .into_iter()
        .find(|org| org.title == title)
        .ok_or_else(|| SyncError::OrganizationNotFound {
            title: title.to_string(),
        })?;

    info!(organization_id = %organization.id, "Organization resolved");
    progress.info(&format!("Organization with title {title} found."));
    Ok(organization)
}

pub async fn resolve_space<A>(
    api: &A,
    name: &str,
    organization: &Organization,
    progress: &dyn Progress,
) -> Result<Space, SyncError>
where
    A: ContentApi + ?Sized,
{
    let path = format!("owners/{}/spaces", organization.id);
    let spaces: Vec<Space> = fetch_items(api, &path).await.map_err(|reason| {
        error!(%reason, organization_id = %organization.id, "[SYNC][ERROR] Listing spaces failed");
        SyncError::SpaceList { reason }
    })?;
    debug!(count = spaces.len(), "Spaces listed");

    let space = spaces
        .into_iter()
        .find(|space| space.name == name)
        .ok_or_else(|| SyncError::SpaceNotFound {
            name: name.to_string(),
        })?;

    info!(space_id = %space.id, "Space resolved");
    progress.info(&format!("Space with name {name} found."));
    Ok(space)
}
