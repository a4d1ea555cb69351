use crate::git::GitSummary;
use crate::snapshot::Snapshot;
use crate::style::Style;

const BAR_CELLS: u32 = 15;
const PATH_MAX_CHARS: usize = 30;

/// Render the full statusline: two lines, the second without a trailing
/// newline (the host appends nothing after it).
pub fn render(snapshot: &Snapshot, git: &GitSummary, user: &str, home: Option<&str>) -> String {
  format!(
    "{}\n{}",
    line_one(snapshot, git, user, home),
    line_two(snapshot)
  )
}

/// Who and where: `@user [Model] v1.2  ~/dev/project | main +2 ~1 ?3`.
fn line_one(snapshot: &Snapshot, git: &GitSummary, user: &str, home: Option<&str>) -> String {
  let mut line = String::new();

  if !user.is_empty() {
    line.push_str(&format!("{} ", Style::Dim.paint(&format!("@{}", user))));
  }

  let model = format!("[{}]", snapshot.model.display_name);
  line.push_str(&Style::Bold.paint(&model).to_string());

  if let Some(version) = &snapshot.version {
    line.push_str(&format!(" {}", Style::Dim.paint(&format!("v{}", version))));
  }

  line.push_str("  ");
  line.push_str(&shorten_path(&snapshot.workspace.current_dir, home));

  // Сегмент git целиком опускается вне рабочего дерева
  if !git.branch.is_empty() {
    line.push_str(&format!(" | {}", Style::Info.paint(&git.branch)));
    for (text, style) in change_indicators(git) {
      line.push_str(&format!(" {}", style.paint(&text)));
    }
  }

  line
}

/// Usage and spend: `███░░░░░░░░░░░░ 20% | $1.50 | 2m 5s | +12 -3`.
fn line_two(snapshot: &Snapshot) -> String {
  let pct = snapshot.used_percent();
  let (bar, bar_style) = context_bar(pct);

  let mut line = format!(
    "{} {}% | {} | {}",
    bar_style.paint(&bar),
    pct,
    Style::Warn.paint(&format_cost(snapshot.cost.total_cost_usd)),
    format_duration(snapshot.cost.total_duration_ms)
  );

  let added = snapshot.cost.total_lines_added;
  let removed = snapshot.cost.total_lines_removed;
  if added > 0 || removed > 0 {
    line.push_str(&format!(
      " | {} {}",
      Style::Info.paint(&format!("+{}", added)),
      Style::Danger.paint(&format!("-{}", removed))
    ));
  }

  line
}

/// Home prefix becomes `~`; anything still longer than 30 characters
/// collapses to its final segment.
pub fn shorten_path(dir: &str, home: Option<&str>) -> String {
  let path = match home {
    Some(home) if !home.is_empty() && dir.starts_with(home) => {
      format!("~{}", &dir[home.len()..])
    }
    _ => dir.to_string(),
  };

  if path.chars().count() <= PATH_MAX_CHARS {
    path
  } else {
    path.rsplit('/').next().unwrap_or(&path).to_string()
  }
}

/// Pending-change markers, one per nonzero count. Empty for a clean tree.
pub fn change_indicators(git: &GitSummary) -> Vec<(String, Style)> {
  let mut parts = Vec::new();

  if git.staged > 0 {
    parts.push((format!("+{}", git.staged), Style::Info));
  }
  if git.modified > 0 {
    parts.push((format!("~{}", git.modified), Style::Warn));
  }
  if git.untracked > 0 {
    parts.push((format!("?{}", git.untracked), Style::Danger));
  }

  parts
}

/// Fixed-width usage bar. Fill is integer-truncated; the style flips to Warn
/// at 70% and Danger at 90%.
pub fn context_bar(pct: u32) -> (String, Style) {
  let pct = pct.min(100);
  let filled = (pct * BAR_CELLS / 100) as usize;
  let bar = "█".repeat(filled) + &"░".repeat(BAR_CELLS as usize - filled);

  let style = if pct >= 90 {
    Style::Danger
  } else if pct >= 70 {
    Style::Warn
  } else {
    Style::Info
  };

  (bar, style)
}

pub fn format_cost(usd: f64) -> String {
  format!("${:.2}", usd)
}

/// Whole-second precision, dropping units that would read as noise.
pub fn format_duration(ms: u64) -> String {
  let secs = ms / 1000;

  if secs >= 3600 {
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
  } else if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else {
    format!("{}s", secs)
  }
}
