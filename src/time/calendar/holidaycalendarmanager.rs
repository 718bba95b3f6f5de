use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::manager::manager::IManager;
use crate::manager::managererror::{parse_json_value, ManagerError};
use crate::manager::namedobject::NamedJsonObject;
use crate::time::calendar::holidaycalendar::{HolidayCalendar, NamedHoliday};
use crate::time::recurringholiday::easterrelatedholiday::EasterRelatedHoliday;
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

#[derive(Deserialize)]
struct EasterRelatedHolidayJsonProp {
    shift_days: i64
}

fn easter_related_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: EasterRelatedHolidayJsonProp = parse_json_value(json)?;
    Ok(Arc::new(EasterRelatedHoliday::new(json_prop.shift_days)))
}

#[derive(Deserialize)]
struct FixedDateHolidayJsonProp {
    month: u32,
    day: u32
}

fn fixed_date_holiday_from_json(name: &str, json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: FixedDateHolidayJsonProp = parse_json_value(json)?;
    let holiday = FixedDateHoliday::new(json_prop.month, json_prop.day).ok_or_else(|| {
        ManagerError::invalid_holiday(name, format!("no such day {}/{}", json_prop.day, json_prop.month))
    })?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
enum HolidayType {
    EasterRelated,
    FixedDate
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    holiday_type: HolidayType
}

fn named_holiday_from_json(json: serde_json::Value) -> Result<NamedHoliday, ManagerError> {
    let named_obj: NamedJsonObject = parse_json_value(json.clone())?;
    let holiday_type_obj: HolidayTypedObject = parse_json_value(json.clone())?;
    let rule = match holiday_type_obj.holiday_type {
        HolidayType::EasterRelated => easter_related_holiday_from_json(json)?,
        HolidayType::FixedDate     => fixed_date_holiday_from_json(named_obj.name(), json)?
    };
    Ok(NamedHoliday::new(named_obj.name(), rule))
}

#[derive(Deserialize)]
struct HolidayCalendarJsonProp {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    holidays: Vec<serde_json::Value>
}

/// Named holiday calendars. `BrazilNational` is always present.
///
/// A calendar may `extend` another one, inheriting its holidays before its
/// own. Definitions can come in any order: `insert_obj_from_json_vec` retries
/// those whose base is not loaded yet until a round makes no progress.
pub struct HolidayCalendarManager {
    map_cell: RefCell<HashMap<String, Arc<HolidayCalendar>>>
}

impl HolidayCalendarManager {
    pub fn new() -> HolidayCalendarManager {
        let manager = HolidayCalendarManager { map_cell: RefCell::new(HashMap::new()) };
        let brazil = HolidayCalendar::brazil_national();
        manager.map().insert(brazil.name().to_owned(), Arc::new(brazil));
        manager
    }
}

impl Default for HolidayCalendarManager {
    fn default() -> Self {
        HolidayCalendarManager::new()
    }
}

impl IManager<Arc<HolidayCalendar>> for HolidayCalendarManager {
    fn map(&self) -> RefMut<'_, HashMap<String, Arc<HolidayCalendar>>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_obj: NamedJsonObject = parse_json_value(json_value.clone())?;
        let calendar_prop: HolidayCalendarJsonProp = parse_json_value(json_value)?;

        let mut holidays: Vec<NamedHoliday> = match &calendar_prop.extends {
            Some(base) => self.get(base)?.holidays().to_vec(),
            None => Vec::new()
        };
        for holiday_json in calendar_prop.holidays {
            holidays.push(named_holiday_from_json(holiday_json)?);
        }

        let calendar = HolidayCalendar::new(named_obj.name(), holidays);
        tracing::debug!(calendar = named_obj.name(), holidays = calendar.len(), "holiday calendar loaded");
        self.map().insert(named_obj.name().to_owned(), Arc::new(calendar));
        Ok(())
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        let mut remain_indices: Vec<usize> = (0..json_vec.len()).collect();
        let mut result: Result<(), ManagerError> = Ok(());

        loop {
            let mut new_remain_indices: Vec<usize> = Vec::new();

            for &index in remain_indices.iter() {
                result = self.insert_obj_from_json(json_vec[index].clone());
                if result.is_err() {
                    new_remain_indices.push(index);
                }
            }

            if new_remain_indices.is_empty() || remain_indices == new_remain_indices {
                return result;
            }

            remain_indices = new_remain_indices;
        }
    }
}
