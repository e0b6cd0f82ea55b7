use crate::error::{CivicError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Version-control sink for generated artifacts.
pub trait Publisher {
    /// Whether `dir` contains uncommitted changes.
    fn has_changes(&self, dir: &Path) -> Result<bool>;

    /// Stage `dir`, commit with `message`, and push.
    fn commit_and_push(&self, dir: &Path, message: &str) -> Result<()>;
}

/// Publishes by shelling out to `git` in a configured repository root.
#[derive(Debug)]
pub struct GitPublisher {
    repo_dir: PathBuf,
    remote: String,
    branch: String,
}

impl GitPublisher {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        GitPublisher {
            repo_dir: repo_dir.into(),
            remote: "origin".into(),
            branch: "main".into(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>, branch: impl Into<String>) -> Self {
        self.remote = remote.into();
        self.branch = branch.into();
        self
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| CivicError::Publish(format!("failed to run git {}: {e}", args.join(" "))))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CivicError::Publish(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| CivicError::Publish(format!("git output was not UTF-8: {e}")))
    }
}

impl Publisher for GitPublisher {
    fn has_changes(&self, dir: &Path) -> Result<bool> {
        let dir = dir.to_string_lossy();
        match self.run_git(&["status", "--porcelain", dir.as_ref()]) {
            Ok(status) => Ok(!status.trim().is_empty()),
            Err(e) => {
                // A broken status check means we cannot tell; report it
                // and let the run finish without publishing.
                log::warn!("Error checking git status: {e}");
                Ok(false)
            }
        }
    }

    fn commit_and_push(&self, dir: &Path, message: &str) -> Result<()> {
        let dir = dir.to_string_lossy();
        self.run_git(&["add", dir.as_ref()])?;
        self.run_git(&["commit", "-m", message])?;
        self.run_git(&["push", &self.remote, &self.branch])?;
        log::info!("Successfully pushed changes to repository");
        Ok(())
    }
}

/// Publisher that never sees changes and never commits. Used when a
/// run should generate artifacts without touching version control.
#[derive(Debug, Default)]
pub struct NoopPublisher;

impl Publisher for NoopPublisher {
    fn has_changes(&self, _dir: &Path) -> Result<bool> {
        Ok(false)
    }

    fn commit_and_push(&self, _dir: &Path, _message: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(status.status.success(), "git {args:?} failed");
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init", "-b", "main"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "user.name", "Test"]);
    }

    #[test]
    fn test_has_changes_detects_new_files() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        let out = repo.path().join("api");
        std::fs::create_dir_all(&out).unwrap();

        let publisher = GitPublisher::new(repo.path());
        assert!(!publisher.has_changes(&out).unwrap());

        std::fs::write(out.join("version.json"), "{}").unwrap();
        assert!(publisher.has_changes(&out).unwrap());
    }

    #[test]
    fn test_has_changes_outside_a_repo_is_false() {
        let dir = TempDir::new().unwrap();
        let publisher = GitPublisher::new(dir.path());
        assert!(!publisher.has_changes(dir.path()).unwrap());
    }

    #[test]
    fn test_commit_and_push_round_trip() {
        let remote = TempDir::new().unwrap();
        git(remote.path(), &["init", "--bare", "-b", "main"]);

        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        let remote_url = remote.path().to_string_lossy().to_string();
        git(repo.path(), &["remote", "add", "origin", &remote_url]);

        let out = repo.path().join("api");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("version.json"), "{}").unwrap();

        let publisher = GitPublisher::new(repo.path());
        assert!(publisher.has_changes(&out).unwrap());
        publisher
            .commit_and_push(&out, "Update political data: test")
            .unwrap();
        assert!(!publisher.has_changes(&out).unwrap());
    }

    #[test]
    fn test_commit_without_changes_fails_loudly() {
        let repo = TempDir::new().unwrap();
        init_repo(repo.path());
        let out = repo.path().join("api");
        std::fs::create_dir_all(&out).unwrap();

        let publisher = GitPublisher::new(repo.path());
        let err = publisher
            .commit_and_push(&out, "empty commit")
            .unwrap_err();
        assert!(matches!(err, CivicError::Publish(_)));
    }
}
