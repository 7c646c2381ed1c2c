// ABOUTME: Git transport shelling out to the git binary.
// ABOUTME: Stages the source tree in a scratch repo and force-pushes to the app.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::{GitTransport, TransportError};
use crate::cloud::PublishingProfile;

const COMMIT_AUTHOR: &str = "skafos";
const COMMIT_EMAIL: &str = "skafos@localhost";

/// Git transport backed by the git binary.
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    /// Embed the profile's credentials into the push URL.
    fn push_url(profile: &PublishingProfile) -> Result<String, TransportError> {
        let url = profile.git_url.trim();
        if url.is_empty() {
            return Err(TransportError::InvalidProfile("Git"));
        }

        let Some(rest) = url.strip_prefix("https://") else {
            // Non-HTTPS endpoints carry their own auth.
            return Ok(url.to_string());
        };

        // Azure SCM URLs often already embed the publishing user.
        let rest = rest.split_once('@').map(|(_, host)| host).unwrap_or(rest);

        Ok(format!(
            "https://{}:{}@{}",
            urlencoding::encode(&profile.username),
            urlencoding::encode(&profile.password),
            rest
        ))
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_git(dir: &Path, args: &[&str]) -> Result<(), TransportError> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(TransportError::CommandFailed {
            tool: "git",
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(())
}

/// Copy a directory tree, skipping any .git directory in the source.
fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        if name == ".git" {
            continue;
        }

        let target = dst.join(&name);
        if path.is_dir() {
            std::fs::create_dir_all(&target)?;
            copy_tree(&path, &target)?;
        } else if path.is_file() {
            std::fs::copy(&path, &target)?;
        }
    }
    Ok(())
}

#[async_trait]
impl GitTransport for GitCli {
    async fn push_tree(
        &self,
        profile: &PublishingProfile,
        source: &Path,
    ) -> Result<(), TransportError> {
        let url = Self::push_url(profile)?;

        if !source.is_dir() {
            return Err(TransportError::SourceNotFound(
                source.display().to_string(),
            ));
        }

        // Stage the tree in a scratch repository so the project's own git
        // history never leaks into the deployment.
        let scratch = tempfile::tempdir()?;
        copy_tree(source, scratch.path())?;

        run_git(scratch.path(), &["init", "--initial-branch=master"]).await?;
        run_git(scratch.path(), &["add", "-A"]).await?;
        run_git(
            scratch.path(),
            &[
                "-c",
                &format!("user.name={}", COMMIT_AUTHOR),
                "-c",
                &format!("user.email={}", COMMIT_EMAIL),
                "commit",
                "--message",
                "skafos deployment",
            ],
        )
        .await?;
        run_git(scratch.path(), &["push", "--force", &url, "HEAD:master"]).await?;

        Ok(())
    }
}
