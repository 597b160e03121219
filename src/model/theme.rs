use std::fmt;

/// The user's persisted theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    /// Defer to the host-reported scheme at read time
    #[default]
    System,
}

/// A concrete theme after resolving `System` against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ThemePreference {
    /// The literal token stored on disk
    pub fn token(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Parse a stored token into a preference
    pub fn from_token(s: &str) -> Option<ThemePreference> {
        match s {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }

    /// Resolve this preference against the host-reported theme.
    /// `System` takes the host theme, falling back to light when unknown;
    /// anything else is returned verbatim.
    pub fn resolve(self, system: Option<ResolvedTheme>) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System => system.unwrap_or(ResolvedTheme::Light),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl ResolvedTheme {
    pub fn token(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    /// The opposite theme (for the toggle action)
    pub fn flipped(self) -> ResolvedTheme {
        match self {
            ResolvedTheme::Light => ResolvedTheme::Dark,
            ResolvedTheme::Dark => ResolvedTheme::Light,
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Query the host terminal's color scheme.
///
/// Terminals expose no direct scheme API; several emulators set `COLORFGBG`
/// to "<fg>;<bg>" ANSI indices. Background 0-6 or 8 reads as dark, 7 or 15
/// as light, anything else as unknown.
pub fn detect_system_theme() -> Option<ResolvedTheme> {
    let value = std::env::var("COLORFGBG").ok()?;
    system_theme_from_colorfgbg(&value)
}

fn system_theme_from_colorfgbg(value: &str) -> Option<ResolvedTheme> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(ResolvedTheme::Dark),
        7 | 15 => Some(ResolvedTheme::Light),
        _ => None,
    }
}
