use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::preferencestore::PreferenceStore;

pub const THEME_PREFERENCE_KEY: &'static str = "theme-pref";

/// Hours in `[AUTO_LIGHT_FROM_HOUR, AUTO_DARK_FROM_HOUR)` are light in auto mode.
pub const AUTO_LIGHT_FROM_HOUR: u32 = 6;
pub const AUTO_DARK_FROM_HOUR: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the host's colour-scheme preference.
    #[default]
    Default,
    /// Light by day, dark by night, in civil time.
    Auto,
    Light,
    Dark
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Default => "default",
            ThemePreference::Auto => "auto",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark"
        }
    }

    /// Reads the stored preference; anything missing or unrecognised is `Default`.
    pub fn load(store: &dyn PreferenceStore) -> ThemePreference {
        match store.get(THEME_PREFERENCE_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unknown theme preference; using default");
                ThemePreference::Default
            }),
            None => ThemePreference::Default
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemePreference(pub String);

impl fmt::Display for UnknownThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme preference '{}'", self.0)
    }
}

impl std::error::Error for UnknownThemePreference {}

impl FromStr for ThemePreference {
    type Err = UnknownThemePreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "default" => Ok(ThemePreference::Default),
            "auto" => Ok(ThemePreference::Auto),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(UnknownThemePreference(other.to_owned()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark"
        }
    }

    /// Page background applied together with the theme.
    pub fn background_color(&self) -> &'static str {
        match self {
            Theme::Light => "#f1f5f9",
            Theme::Dark => "#020617"
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[inline]
pub fn is_night(hour: u32) -> bool {
    hour < AUTO_LIGHT_FROM_HOUR || hour >= AUTO_DARK_FROM_HOUR
}

pub fn resolve_theme(preference: ThemePreference, hour: u32, system_prefers_dark: bool) -> Theme {
    let dark = match preference {
        ThemePreference::Light => false,
        ThemePreference::Dark => true,
        ThemePreference::Auto => is_night(hour),
        ThemePreference::Default => system_prefers_dark
    };
    if dark { Theme::Dark } else { Theme::Light }
}

/// Theme inputs read once at startup and handed to whoever needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSettings {
    preference: ThemePreference,
    system_prefers_dark: bool
}

impl ThemeSettings {
    pub fn new(preference: ThemePreference, system_prefers_dark: bool) -> ThemeSettings {
        ThemeSettings { preference, system_prefers_dark }
    }

    pub fn load(store: &dyn PreferenceStore, system_prefers_dark: bool) -> ThemeSettings {
        ThemeSettings::new(ThemePreference::load(store), system_prefers_dark)
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.system_prefers_dark
    }

    pub fn theme_at(&self, hour: u32) -> Theme {
        resolve_theme(self.preference, hour, self.system_prefers_dark)
    }
}
