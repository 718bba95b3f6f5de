use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::display::dashboard::RefreshIntervals;
use crate::holiday::holidaycalculator::HolidayCalculator;
use crate::manager::manager::IManager;
use crate::manager::managererror::ManagerError;
use crate::theme::preferencestore::{
    JsonFilePreferenceStore,
    MemoryPreferenceStore,
    PreferenceError,
    PreferenceStore
};
use crate::theme::theme::ThemeSettings;
use crate::time::calendar::holidaycalendar::BRAZIL_NATIONAL;
use crate::time::calendar::holidaycalendarmanager::HolidayCalendarManager;
use crate::time::timesource::{CivilTimeSource, BRASILIA_TIMEZONE};

fn default_timezone() -> String {
    BRASILIA_TIMEZONE.to_owned()
}

fn default_calendar() -> String {
    BRAZIL_NATIONAL.to_owned()
}

fn default_clock_interval_secs() -> u64 {
    1
}

fn default_holiday_interval_secs() -> u64 {
    60
}

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default = "default_calendar")]
    calendar: String,
    #[serde(default)]
    holiday_calendar: Vec<serde_json::Value>,
    #[serde(default = "default_clock_interval_secs")]
    clock_interval_secs: u64,
    #[serde(default = "default_holiday_interval_secs")]
    holiday_interval_secs: u64,
    #[serde(default)]
    preference_file: Option<PathBuf>,
    #[serde(default)]
    system_prefers_dark: bool
}

pub struct Configuration {
    timezone: String,
    calendar: String,
    holiday_calendar_manager_cell: RefCell<HolidayCalendarManager>,
    refresh_intervals: RefreshIntervals,
    preference_file: Option<PathBuf>,
    system_prefers_dark: bool
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

impl Configuration {
    /// Brasília time, Brazilian national holidays, in-memory preferences.
    pub fn new() -> Configuration {
        Configuration {
            timezone: default_timezone(),
            calendar: default_calendar(),
            holiday_calendar_manager_cell: RefCell::new(HolidayCalendarManager::new()),
            refresh_intervals: RefreshIntervals::default(),
            preference_file: None,
            system_prefers_dark: false
        }
    }

    pub fn from_reader(file_path: &Path) -> Result<Configuration, ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        Configuration::from_json_prop(json_prop)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        Configuration::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ManagerError> {
        if json_prop.clock_interval_secs == 0 {
            return Err(ManagerError::NonPositiveIntervalError("clock_interval_secs"));
        }
        if json_prop.holiday_interval_secs == 0 {
            return Err(ManagerError::NonPositiveIntervalError("holiday_interval_secs"));
        }

        let holiday_calendar_manager = HolidayCalendarManager::new();
        holiday_calendar_manager.insert_obj_from_json_vec(&json_prop.holiday_calendar)?;
        // Fail at load time rather than on the first render
        holiday_calendar_manager.get(&json_prop.calendar)?;

        Ok(Configuration {
            timezone: json_prop.timezone,
            calendar: json_prop.calendar,
            holiday_calendar_manager_cell: RefCell::new(holiday_calendar_manager),
            refresh_intervals: RefreshIntervals::new(
                Duration::from_secs(json_prop.clock_interval_secs),
                Duration::from_secs(json_prop.holiday_interval_secs)
            ),
            preference_file: json_prop.preference_file,
            system_prefers_dark: json_prop.system_prefers_dark
        })
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn calendar(&self) -> &str {
        &self.calendar
    }

    pub fn holiday_calendar_manager(&self) -> RefMut<'_, HolidayCalendarManager> {
        self.holiday_calendar_manager_cell.borrow_mut()
    }

    pub fn refresh_intervals(&self) -> RefreshIntervals {
        self.refresh_intervals
    }

    pub fn preference_file(&self) -> Option<&Path> {
        self.preference_file.as_deref()
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.system_prefers_dark
    }

    /// An unknown zone still yields a source; its readings fail instead.
    pub fn time_source(&self) -> CivilTimeSource {
        CivilTimeSource::new(&self.timezone)
    }

    pub fn holiday_calculator(&self) -> Result<HolidayCalculator, ManagerError> {
        let calendar = self.holiday_calendar_manager().get(&self.calendar)?;
        Ok(HolidayCalculator::new(calendar))
    }

    pub fn preference_store(&self) -> Result<Box<dyn PreferenceStore>, PreferenceError> {
        match &self.preference_file {
            Some(path) => Ok(Box::new(JsonFilePreferenceStore::open(path)?)),
            None => Ok(Box::new(MemoryPreferenceStore::new()))
        }
    }

    pub fn theme_settings(&self, store: &dyn PreferenceStore) -> ThemeSettings {
        ThemeSettings::load(store, self.system_prefers_dark)
    }
}
