use colored::{ColoredString, Colorize};

/// Semantic styles used by the renderer. Escape sequences are chosen at
/// render time so composition logic stays free of raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
  Info,
  Warn,
  Danger,
  Dim,
  Bold,
}

impl Style {
  pub fn paint(self, text: &str) -> ColoredString {
    match self {
      Style::Info => text.green(),
      Style::Warn => text.yellow(),
      Style::Danger => text.red(),
      Style::Dim => text.dimmed(),
      Style::Bold => text.bold(),
    }
  }
}

/// The host pipes stdout (not a TTY), which would normally disable colors.
/// Force them on unless the user opted out via NO_COLOR.
pub fn force_colors() {
  if std::env::var_os("NO_COLOR").is_none() {
    colored::control::set_override(true);
  }
}
