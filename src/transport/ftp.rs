// ABOUTME: FTP transport shelling out to curl.
// ABOUTME: Walks the source tree and uploads each file, creating remote dirs.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::{FtpTransport, TransportError};
use crate::cloud::PublishingProfile;

/// FTP transport backed by the curl binary.
pub struct CurlFtp;

impl CurlFtp {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurlFtp {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect relative paths of all regular files under `dir`.
fn collect_files(dir: &Path, base: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, base, out)?;
        } else if path.is_file() {
            let rel = path
                .strip_prefix(base)
                .expect("walked path is under its base");
            out.push(rel.to_path_buf());
        }
    }
    Ok(())
}

#[async_trait]
impl FtpTransport for CurlFtp {
    async fn upload_tree(
        &self,
        profile: &PublishingProfile,
        source: &Path,
        target: &str,
    ) -> Result<usize, TransportError> {
        if profile.ftp_url.is_empty() {
            return Err(TransportError::InvalidProfile("FTP"));
        }

        if !source.is_dir() {
            return Err(TransportError::SourceNotFound(
                source.display().to_string(),
            ));
        }

        let mut files = Vec::new();
        collect_files(source, source, &mut files)?;

        let base_url = profile.ftp_url.trim_end_matches('/');
        let target = target.trim_matches('/');

        for rel in &files {
            let rel_str = rel.to_string_lossy();
            let remote = if target.is_empty() {
                format!("{}/{}", base_url, rel_str)
            } else {
                format!("{}/{}/{}", base_url, target, rel_str)
            };

            tracing::debug!(file = %rel_str, "uploading");

            let output = Command::new("curl")
                .arg("--silent")
                .arg("--show-error")
                .arg("--fail")
                .arg("--ftp-create-dirs")
                .arg("--user")
                .arg(format!("{}:{}", profile.username, profile.password))
                .arg("--upload-file")
                .arg(source.join(rel))
                .arg(&remote)
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output()
                .await?;

            if !output.status.success() {
                return Err(TransportError::CommandFailed {
                    tool: "curl",
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                });
            }
        }

        Ok(files.len())
    }
}
