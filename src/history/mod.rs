//! Version-history lookups for content files
//!
//! The resolver only ever needs the single most recent commit touching a
//! file, so that is the whole interface. Keeping it this narrow means the
//! resolver never learns which version-control system (if any) backs the
//! content directory.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::Path;
use tokio::process::Command;

/// Source of per-file commit timestamps
pub trait HistoryReader {
    /// Timestamp of the most recent commit touching `path`, or `None` when
    /// the path has no recorded history. Unavailable history is not an
    /// error: an uncommitted file, a missing `git` binary, or a directory
    /// outside any repository all resolve to `None`.
    fn most_recent_commit(
        &self,
        path: &Path,
    ) -> impl Future<Output = Option<DateTime<Utc>>> + Send;
}

/// Reads history by shelling out to `git log`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHistory;

impl HistoryReader for GitHistory {
    async fn most_recent_commit(&self, path: &Path) -> Option<DateTime<Utc>> {
        // git resolves pathspecs against its working directory, so the
        // path must be made absolute before moving into the parent:
        // a relative pathspec would be looked up relative to the parent
        // itself and quietly match nothing.
        let path = match tokio::fs::canonicalize(path).await {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("cannot resolve {:?}: {}", path, e);
                return None;
            }
        };
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        let output = Command::new("git")
            .args(["log", "-1", "--format=%cI", "--"])
            .arg(&path)
            .current_dir(dir)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("git unavailable for {:?}: {}", path, e);
                return None;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!("git log failed for {:?}: {}", path, stderr.trim());
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            return None;
        }

        match DateTime::parse_from_rfc3339(line) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                tracing::debug!("unparseable commit date {:?} for {:?}: {}", line, path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_path_outside_any_repository_has_no_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "hello").unwrap();

        // Not a git repository, so lookups quietly come back empty.
        assert_eq!(GitHistory.most_recent_commit(&path).await, None);
    }

    fn git(repo: &Path, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(repo)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Rewrite an absolute path relative to the test process's working
    /// directory, e.g. `../../tmp/xyz/blog/post.md`.
    fn relative_to_cwd(path: &Path) -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        let mut cwd_parts = cwd.components().peekable();
        let mut path_parts = path.components().peekable();
        while cwd_parts.peek().is_some() && cwd_parts.peek() == path_parts.peek() {
            cwd_parts.next();
            path_parts.next();
        }

        let mut relative = PathBuf::new();
        for _ in cwd_parts {
            relative.push("..");
        }
        for part in path_parts {
            relative.push(part);
        }
        relative
    }

    #[tokio::test]
    async fn test_relative_path_finds_the_same_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let blog = dir.path().join("blog");
        std::fs::create_dir(&blog).unwrap();
        let file = blog.join("post.md");
        std::fs::write(&file, "hello").unwrap();

        git(dir.path(), &["init", "-q"]);
        git(dir.path(), &["add", "."]);
        git(
            dir.path(),
            &[
                "-c",
                "user.email=test@example.com",
                "-c",
                "user.name=test",
                "commit",
                "-q",
                "-m",
                "add post",
            ],
        );

        let by_absolute_path = GitHistory.most_recent_commit(&file).await;
        assert!(by_absolute_path.is_some());

        let relative = relative_to_cwd(&file);
        assert!(relative.is_relative());
        assert_eq!(
            GitHistory.most_recent_commit(&relative).await,
            by_absolute_path
        );
    }
}
