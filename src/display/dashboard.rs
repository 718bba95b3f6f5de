use std::rc::Rc;
use std::time::Duration;

use crate::holiday::holidaycalculator::HolidayCalculator;
use crate::scheduler::scheduler::{Scheduler, SchedulerError, TaskHandle};
use crate::theme::theme::ThemeSettings;
use crate::time::timesource::TimeSource;

use super::clockpanel::ClockPanel;
use super::displaysink::DisplaySink;
use super::holidaypanel::HolidayPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshIntervals {
    clock: Duration,
    holiday: Duration
}

impl RefreshIntervals {
    pub fn new(clock: Duration, holiday: Duration) -> RefreshIntervals {
        RefreshIntervals { clock, holiday }
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn holiday(&self) -> Duration {
        self.holiday
    }
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        RefreshIntervals::new(Duration::from_secs(1), Duration::from_secs(60))
    }
}

/// The clock and holiday regions wired to a scheduler.
pub struct Dashboard {
    clock_task: TaskHandle,
    holiday_task: TaskHandle
}

impl Dashboard {
    /// Renders both regions immediately, then keeps them fresh on `scheduler`.
    pub fn install(
        scheduler: &mut Scheduler,
        source: Rc<dyn TimeSource>,
        sink: Rc<dyn DisplaySink>,
        calculator: HolidayCalculator,
        settings: ThemeSettings,
        intervals: RefreshIntervals
    ) -> Result<Dashboard, SchedulerError> {
        let mut clock_panel = ClockPanel::new(settings);
        let mut holiday_panel = HolidayPanel::new(calculator);
        clock_panel.refresh(source.as_ref(), sink.as_ref());
        holiday_panel.refresh(source.as_ref(), sink.as_ref());

        let (clock_source, clock_sink) = (source.clone(), sink.clone());
        let clock_task = scheduler.schedule_repeating(intervals.clock(), move || {
            clock_panel.refresh(clock_source.as_ref(), clock_sink.as_ref());
        })?;

        let holiday_task = scheduler.schedule_repeating(intervals.holiday(), move || {
            holiday_panel.refresh(source.as_ref(), sink.as_ref());
        });
        let holiday_task = match holiday_task {
            Ok(handle) => handle,
            Err(error) => {
                clock_task.cancel();
                return Err(error);
            }
        };

        tracing::info!(
            clock_ms = intervals.clock().as_millis() as u64,
            holiday_ms = intervals.holiday().as_millis() as u64,
            "dashboard installed"
        );
        Ok(Dashboard { clock_task, holiday_task })
    }

    pub fn is_running(&self) -> bool {
        !self.clock_task.is_cancelled() && !self.holiday_task.is_cancelled()
    }

    /// Stops both refresh tasks; nothing is written afterwards.
    pub fn teardown(&self) {
        self.clock_task.cancel();
        self.holiday_task.cancel();
    }
}
