//! # contract: the seam between synchronisation logic and the content API
//!
//! This module defines the [`ContentApi`] trait and the wire types that flow
//! through it. The synchroniser only ever talks to a `ContentApi`; the real
//! implementation lives in [`crate::client`], and tests use the generated
//! `MockContentApi`.
//!
//! ## Outcomes
//! A lookup has three outcomes, modelled explicitly by [`Lookup`]:
//! - `Found(payload)`: the server returned a usable JSON payload
//! - `Absent`: the server said the resource does not exist (a 404, or a 404 error envelope)
//! - `Failed(err)`: anything else went wrong
//!
//! Writes collapse the same classification into a plain `Result`.
//!
//! ## Mocking & Testing
//! The trait is annotated for `mockall` so consumers can generate deterministic
//! mocks (enabled by the default `test-export-mocks` feature).

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Outcome of a GET against the content API.
#[derive(Debug)]
pub enum Lookup {
    Found(serde_json::Value),
    Absent,
    Failed(ApiError),
}

impl Lookup {
    /// Collapse into a `Result`, treating absence as [`ApiError::NotFound`].
    pub fn into_result(self) -> Result<serde_json::Value, ApiError> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::Absent => Err(ApiError::NotFound),
            Lookup::Failed(e) => Err(e),
        }
    }

    /// The `uid` of the found resource, if the payload carries one.
    pub fn uid(&self) -> Option<&str> {
        match self {
            Lookup::Found(value) => value.get("uid").and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

/// Markdown body of a document page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownDocument {
    pub markdown: String,
}

/// One page in a batch submission, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageDescriptor {
    Group {
        url: String,
        title: String,
    },
    Document {
        url: String,
        title: String,
        document: MarkdownDocument,
    },
}

/// Request body for every PUT: `{ "pages": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBatch {
    pub pages: Vec<PageDescriptor>,
}

impl PageBatch {
    pub fn group(slug: &str, title: &str) -> Self {
        PageBatch {
            pages: vec![PageDescriptor::Group {
                url: slug.to_string(),
                title: title.to_string(),
            }],
        }
    }

    pub fn document(slug: &str, title: &str, markdown: String) -> Self {
        PageBatch {
            pages: vec![PageDescriptor::Document {
                url: slug.to_string(),
                title: title.to_string(),
                document: MarkdownDocument { markdown },
            }],
        }
    }
}

/// Trait for reading and writing the remote content tree.
///
/// Paths are relative to the API endpoint the implementor was built with
/// (e.g. `orgs`, `spaces/{id}/content/v/master/url/`). Implementors attach the
/// credential themselves; callers never see it.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// GET a resource and classify the response.
    async fn get(&self, path: &str) -> Lookup;

    /// PUT a page batch to `path`, returning the response payload (usually `{ "revision": ... }`).
    async fn put(&self, path: &str, body: &PageBatch) -> Result<serde_json::Value, ApiError>;
}
