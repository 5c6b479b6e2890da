//! Error types for gitbook-sync.
//!
//! [`ApiError`] is what the remote client adapter produces; [`SyncError`] is the
//! terminal failure of a synchronisation run. None of them are retried.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single call against the content API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credential could not be encoded as an HTTP header value.
    #[error("credential is not a valid header value")]
    InvalidCredential,

    /// The request never produced a response (connect, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status other than 404.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The payload carried an `error` object that does not mean "not found".
    #[error("error envelope (status {status:?}): {message}")]
    Envelope { status: Option<u16>, message: String },

    /// A write was addressed to a path the server does not know.
    #[error("resource not found")]
    NotFound,
}

/// All errors that abort a synchronisation run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No organization found ({reason})")]
    OrganizationList { reason: String },

    #[error("No organization with title {title} found")]
    OrganizationNotFound { title: String },

    #[error("No spaces found ({reason})")]
    SpaceList { reason: String },

    #[error("No space with name {name} found")]
    SpaceNotFound { name: String },

    #[error("could not read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existence check failed for a reason other than absence.
    #[error("lookup of {path} failed: {source}")]
    RemoteLookup {
        path: String,
        #[source]
        source: ApiError,
    },

    #[error("write to {path} failed: {source}")]
    RemoteWrite {
        path: String,
        #[source]
        source: ApiError,
    },
}

/// Convenience constructor for [`SyncError::FileRead`].
pub(crate) fn file_read_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::FileRead {
        path: path.into(),
        source,
    }
}
