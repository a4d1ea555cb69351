use std::io::{self, Write};
use std::path::Path;

pub mod config;
pub mod error;
pub mod git;
pub mod render;
pub mod snapshot;
pub mod style;

use crate::config::Config;
use crate::error::Result;
use crate::snapshot::Snapshot;

pub async fn run() -> Result<()> {
  // The host pipes stdout, so color auto-detection must be overridden
  style::force_colors();

  // Загрузка конфигурации
  let config = Config::load();

  // One snapshot per invocation; malformed or empty input degrades to defaults
  let snapshot = Snapshot::from_reader(io::stdin().lock()).unwrap_or_default();

  let dir = snapshot.workspace.current_dir.clone();
  let user = git::user_name(Path::new(&dir));

  // Git status via the shared cache; without a working directory the cache is
  // read as-is (possibly empty) and never refreshed
  let cache = config.cache();
  let summary = if dir.is_empty() {
    cache.read()
  } else {
    cache.refresh_with(|| git::summarize(Path::new(&dir))).await
  };

  let home = dirs::home_dir();
  let home = home.as_deref().and_then(Path::to_str);

  // Two lines, second without a trailing newline
  let output = render::render(&snapshot, &summary, &user, home);
  print!("{}", output);
  io::stdout().flush()?;

  Ok(())
}
