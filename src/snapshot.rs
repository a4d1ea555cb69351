use crate::error::Result;
use serde::Deserialize;
use std::io::Read;

// The host may omit any field, and unknown fields are ignored, so the same
// struct keeps working across host versions.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
  pub model: Model,
  pub workspace: Workspace,
  pub context_window: ContextWindow,
  pub cost: Cost,
  pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Model {
  pub display_name: String,
}

impl Default for Model {
  fn default() -> Self {
    Self {
      display_name: "?".to_string(),
    }
  }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Workspace {
  pub current_dir: String,
  pub project_dir: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContextWindow {
  pub used_percentage: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Cost {
  pub total_cost_usd: f64,
  pub total_duration_ms: u64,
  pub total_lines_added: u64,
  pub total_lines_removed: u64,
}

impl Snapshot {
  /// Parse one JSON document from the reader. Reads at most 64 KiB so a
  /// misbehaving host cannot stall the renderer.
  pub fn from_reader(reader: impl Read) -> Result<Snapshot> {
    let mut buf = String::new();
    reader.take(65536).read_to_string(&mut buf)?;

    Ok(serde_json::from_str(&buf)?)
  }

  /// Used percentage truncated to an integer and clamped to 100.
  pub fn used_percent(&self) -> u32 {
    (self.context_window.used_percentage as u32).min(100)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_snapshot_parses() {
    let json = r#"{
      "model": {"display_name": "Opus"},
      "workspace": {"current_dir": "/home/kai/dev", "project_dir": "/home/kai/dev"},
      "context_window": {"used_percentage": 42.7},
      "cost": {
        "total_cost_usd": 1.5,
        "total_duration_ms": 125000,
        "total_lines_added": 12,
        "total_lines_removed": 3
      },
      "version": "2.0.1"
    }"#;

    let snapshot = Snapshot::from_reader(json.as_bytes()).unwrap();
    assert_eq!(snapshot.model.display_name, "Opus");
    assert_eq!(snapshot.workspace.current_dir, "/home/kai/dev");
    assert_eq!(snapshot.used_percent(), 42);
    assert_eq!(snapshot.cost.total_cost_usd, 1.5);
    assert_eq!(snapshot.cost.total_lines_removed, 3);
    assert_eq!(snapshot.version.as_deref(), Some("2.0.1"));
  }

  #[test]
  fn missing_fields_take_defaults() {
    let snapshot = Snapshot::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(snapshot.model.display_name, "?");
    assert_eq!(snapshot.workspace.current_dir, "");
    assert_eq!(snapshot.used_percent(), 0);
    assert_eq!(snapshot.cost.total_duration_ms, 0);
    assert!(snapshot.version.is_none());
  }

  #[test]
  fn partial_objects_take_defaults() {
    let snapshot = Snapshot::from_reader(r#"{"model": {}, "cost": {}}"#.as_bytes()).unwrap();
    assert_eq!(snapshot.model.display_name, "?");
    assert_eq!(snapshot.cost.total_cost_usd, 0.0);
  }

  #[test]
  fn unknown_fields_are_ignored() {
    let snapshot =
      Snapshot::from_reader(r#"{"session_id": "abc", "model": {"display_name": "S"}}"#.as_bytes())
        .unwrap();
    assert_eq!(snapshot.model.display_name, "S");
  }

  #[test]
  fn malformed_input_is_an_error_for_the_caller_to_default() {
    assert!(Snapshot::from_reader("not json".as_bytes()).is_err());
    assert!(Snapshot::from_reader("".as_bytes()).is_err());
    assert_eq!(Snapshot::default().model.display_name, "?");
  }

  #[test]
  fn percent_is_truncated_and_clamped() {
    let snapshot =
      Snapshot::from_reader(r#"{"context_window": {"used_percentage": 89.9}}"#.as_bytes()).unwrap();
    assert_eq!(snapshot.used_percent(), 89);

    let over =
      Snapshot::from_reader(r#"{"context_window": {"used_percentage": 140.0}}"#.as_bytes())
        .unwrap();
    assert_eq!(over.used_percent(), 100);
  }
}
