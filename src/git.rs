use crate::error::Result;
use gix::trace::debug;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Branch name plus the three change counts shown in the statusline.
/// An empty branch means "not a working tree" and suppresses the git segment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GitSummary {
  pub branch: String,
  pub staged: usize,
  pub modified: usize,
  pub untracked: usize,
}

impl GitSummary {
  /// Serialize as the pipe-delimited cache record. Outside a working tree
  /// all four fields stay empty.
  pub fn to_record(&self) -> String {
    if self.branch.is_empty() {
      return "|||".to_string();
    }

    format!(
      "{}|{}|{}|{}",
      self.branch, self.staged, self.modified, self.untracked
    )
  }

  /// Parse a cache record. Total: missing or garbled fields become
  /// empty/zero, so a torn concurrent write can never crash a reader.
  pub fn from_record(record: &str) -> GitSummary {
    let mut fields = record.trim().splitn(4, '|');
    let branch = fields.next().unwrap_or("").to_string();
    let count = |field: Option<&str>| field.and_then(|v| v.parse().ok()).unwrap_or(0);

    GitSummary {
      branch,
      staged: count(fields.next()),
      modified: count(fields.next()),
      untracked: count(fields.next()),
    }
  }
}

/// File-backed cache for [`GitSummary`] with a freshness window. Shared by
/// every invocation on the host; last writer wins, no locking.
pub struct GitCache {
  path: PathBuf,
  ttl: Duration,
}

impl GitCache {
  pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
    Self {
      path: path.into(),
      ttl,
    }
  }

  /// Fresh means the file exists and its mtime is within the TTL.
  pub fn is_fresh(&self) -> bool {
    fs::metadata(&self.path)
      .and_then(|meta| meta.modified())
      .ok()
      .and_then(|modified| modified.elapsed().ok())
      .map(|age| age < self.ttl)
      .unwrap_or(false)
  }

  pub fn read(&self) -> GitSummary {
    match fs::read_to_string(&self.path) {
      Ok(record) => GitSummary::from_record(&record),
      Err(_) => GitSummary::default(),
    }
  }

  pub fn write(&self, summary: &GitSummary) -> Result<()> {
    fs::write(&self.path, summary.to_record())?;
    Ok(())
  }

  /// Return the cached summary, recomputing it via `refresh` only when the
  /// record is stale. This bounds process-spawn cost when the host re-renders
  /// faster than the TTL.
  pub async fn refresh_with<F, Fut>(&self, refresh: F) -> GitSummary
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = GitSummary>,
  {
    if !self.is_fresh() {
      debug!("git cache stale, refreshing {:?}", self.path);
      let summary = refresh().await;
      if let Err(e) = self.write(&summary) {
        debug!("git cache write failed: {}", e);
      }
    }

    self.read()
  }
}

/// Compute the full summary for `dir`. Not a working tree, an unborn branch,
/// or a failing git call all degrade to empty/zero fields.
pub async fn summarize(dir: &Path) -> GitSummary {
  let Ok(repo) = gix::discover(dir) else {
    return GitSummary::default();
  };

  GitSummary {
    branch: branch_name(&repo),
    staged: count_lines(dir, &["diff", "--cached", "--name-only"]).await,
    modified: count_lines(dir, &["diff", "--name-only"]).await,
    untracked: count_lines(dir, &["ls-files", "--others", "--exclude-standard"]).await,
  }
}

/// Symbolic branch name, or the abbreviated head id when detached.
fn branch_name(repo: &gix::Repository) -> String {
  match repo.head_name() {
    Ok(Some(name)) => name.shorten().to_string(),
    Ok(None) => repo
      .head_id()
      .map(|id| id.shorten_or_id().to_string())
      .unwrap_or_default(),
    Err(_) => String::new(),
  }
}

/// `user.name` from the repository configuration of `dir` (includes inherited
/// global values). Empty when the directory is not inside a working tree.
pub fn user_name(dir: &Path) -> String {
  gix::discover(dir)
    .ok()
    .and_then(|repo| {
      repo
        .config_snapshot()
        .string("user.name")
        .map(|name| name.to_string())
    })
    .unwrap_or_default()
}

/// Count of non-empty output lines of a git query, 0 on any failure.
async fn count_lines(dir: &Path, args: &[&str]) -> usize {
  let output = Command::new("git").args(args).current_dir(dir).output().await;

  match output {
    Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
      .lines()
      .filter(|line| !line.trim().is_empty())
      .count(),
    _ => 0,
  }
}
