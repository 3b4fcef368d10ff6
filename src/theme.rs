use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn colors(self) -> &'static ThemeColors {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub header_bg: Color,
    pub header_text: Color,
    pub header_subtext: Color,
    pub bg_main: Color,
    pub bg_card: Color,
    pub bg_card_secondary: Color,
    pub text_main: Color,
    pub text_sub: Color,
    pub brand: Color,
    pub border: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

static LIGHT: ThemeColors = ThemeColors {
    header_bg: rgb(0x0077B5),
    header_text: rgb(0xFFFFFF),
    header_subtext: rgb(0xE6F1F8),
    bg_main: rgb(0xFFFFFF),
    bg_card: rgb(0xFFFFFF),
    bg_card_secondary: rgb(0xF8FAFC),
    text_main: rgb(0x1F2937),
    text_sub: rgb(0x6B7280),
    brand: rgb(0x0077B5),
    border: rgb(0xE5E7EB),
};

static DARK: ThemeColors = ThemeColors {
    header_bg: rgb(0x1A1F2E),
    header_text: rgb(0xFFFFFF),
    header_subtext: rgb(0xCCCCCC),
    bg_main: rgb(0x0F1419),
    bg_card: rgb(0x1A1F2E),
    bg_card_secondary: rgb(0x252D3D),
    text_main: rgb(0xF3F4F6),
    text_sub: rgb(0xD1D5DB),
    brand: rgb(0x60A5FA),
    border: rgb(0x374151),
};

pub const ERROR_FG: Color = rgb(0xCC3333);
pub const ERROR_BG: Color = rgb(0xFFEEEE);

// --- Persisted preference ---

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    theme: Option<Theme>,
}

/// The single persisted `theme` preference, kept as a small JSON file.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved theme; a missing or unreadable file counts as no preference.
    pub fn load(&self) -> Option<Theme> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read preferences");
                return None;
            }
        };

        match serde_json::from_str::<Preferences>(&contents) {
            Ok(prefs) => prefs.theme,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring invalid preferences");
                None
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
        }
        let prefs = Preferences { theme: Some(theme) };
        let json = serde_json::to_string_pretty(&prefs)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}
