use chrono::Timelike;

use crate::locale::ptbr::{long_date_label, time_label};
use crate::theme::theme::{Theme, ThemePreference, ThemeSettings};
use crate::time::timesource::{ClockError, TimeSource};

use super::displaysink::{DisplaySink, Region};

/// Hour used to pick a theme before any clock reading has succeeded.
const FALLBACK_THEME_HOUR: u32 = 12;

/// Time and date regions, plus the theme while in auto mode.
///
/// A failing time source leaves the regions untouched. The failure is logged
/// the first time it is seen and repeats of the same error stay silent.
pub struct ClockPanel {
    settings: ThemeSettings,
    theme: Option<Theme>,
    last_error: Option<ClockError>
}

impl ClockPanel {
    pub fn new(settings: ThemeSettings) -> ClockPanel {
        ClockPanel { settings, theme: None, last_error: None }
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn last_error(&self) -> Option<&ClockError> {
        self.last_error.as_ref()
    }

    pub fn refresh(&mut self, source: &dyn TimeSource, sink: &dyn DisplaySink) {
        let now = match source.now() {
            Ok(now) => now,
            Err(error) => {
                if self.last_error.as_ref() != Some(&error) {
                    tracing::error!(%error, "clock disabled");
                    self.last_error = Some(error);
                }
                if self.theme.is_none() {
                    self.apply_theme(self.settings.theme_at(FALLBACK_THEME_HOUR), sink);
                }
                return;
            }
        };

        if self.last_error.take().is_some() {
            tracing::info!("clock recovered");
        }

        sink.set_text(Region::Clock, &time_label(&now));
        sink.set_text(Region::Date, &long_date_label(&now));

        if self.theme.is_none() || self.settings.preference() == ThemePreference::Auto {
            self.apply_theme(self.settings.theme_at(now.hour()), sink);
        }
    }

    fn apply_theme(&mut self, theme: Theme, sink: &dyn DisplaySink) {
        if self.theme != Some(theme) {
            tracing::debug!(%theme, "theme applied");
            sink.set_theme(theme);
            self.theme = Some(theme);
        }
    }
}
