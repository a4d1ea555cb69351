use std::time::Duration;

use fast_statusline::git::{GitCache, GitSummary};
use fast_statusline::render;
use fast_statusline::snapshot::Snapshot;

fn snapshot(json: &str) -> Snapshot {
  Snapshot::from_reader(json.as_bytes()).unwrap()
}

#[test]
fn renders_a_full_session_end_to_end() {
  colored::control::set_override(false);

  let snapshot = snapshot(
    r#"{
      "model": {"display_name": "Opus"},
      "workspace": {"current_dir": "/tmp/demo", "project_dir": "/tmp/demo"},
      "context_window": {"used_percentage": 73.4},
      "cost": {
        "total_cost_usd": 0.88,
        "total_duration_ms": 3725000,
        "total_lines_added": 40,
        "total_lines_removed": 7
      },
      "version": "2.0.1"
    }"#,
  );
  let git = GitSummary {
    branch: "main".to_string(),
    staged: 2,
    modified: 0,
    untracked: 1,
  };

  let out = render::render(&snapshot, &git, "kai", None);
  let mut lines = out.lines();

  assert_eq!(
    lines.next().unwrap(),
    "@kai [Opus] v2.0.1  /tmp/demo | main +2 ?1"
  );
  assert_eq!(
    lines.next().unwrap(),
    "██████████░░░░░ 73% | $0.88 | 1h 2m | +40 -7"
  );
  assert_eq!(lines.next(), None);
  assert!(!out.ends_with('\n'));
}

#[test]
fn degraded_input_still_renders_two_lines() {
  colored::control::set_override(false);

  // Malformed stdin is the caller's cue to fall back to the default snapshot
  let snapshot = Snapshot::from_reader("{broken".as_bytes()).unwrap_or_default();
  let out = render::render(&snapshot, &GitSummary::default(), "", None);

  assert_eq!(out.lines().count(), 2);
  assert!(out.contains("[?]"));
  assert!(out.contains("0%"));
}

#[tokio::test]
async fn cache_survives_across_invocations() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("git.cache");

  // First invocation computes and persists
  let first = GitCache::new(&path, Duration::from_secs(60));
  let computed = first
    .refresh_with(|| async {
      GitSummary {
        branch: "main".to_string(),
        staged: 1,
        modified: 2,
        untracked: 0,
      }
    })
    .await;

  // A second invocation within the window reuses the record untouched
  let second = GitCache::new(&path, Duration::from_secs(60));
  let reused = second
    .refresh_with(|| async { unreachable!("cache was fresh") })
    .await;

  assert_eq!(computed, reused);
}
