// ABOUTME: File-deploy transport seams for FTP and Git publishing.
// ABOUTME: Process-backed implementations shell out to curl and git.

mod ftp;
mod git;

pub use ftp::CurlFtp;
pub use git::GitCli;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::cloud::PublishingProfile;

/// Errors from deployment transports.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("publishing profile is missing a {0} endpoint")]
    InvalidProfile(&'static str),

    #[error("source directory not found: {0}")]
    SourceNotFound(String),

    #[error("{tool} failed: {stderr}")]
    CommandFailed { tool: &'static str, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Uploads a directory tree to an app's FTP endpoint.
#[async_trait]
pub trait FtpTransport: Send + Sync {
    /// Upload every file under `source` to `target` on the FTP endpoint.
    ///
    /// Returns the number of files uploaded.
    async fn upload_tree(
        &self,
        profile: &PublishingProfile,
        source: &Path,
        target: &str,
    ) -> Result<usize, TransportError>;
}

/// Pushes a directory tree to an app's Git endpoint.
#[async_trait]
pub trait GitTransport: Send + Sync {
    async fn push_tree(
        &self,
        profile: &PublishingProfile,
        source: &Path,
    ) -> Result<(), TransportError>;
}
