use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("a repeating task needs a non-zero period")]
    ZeroPeriod
}

/// Cancellation handle of a scheduled task. Clones refer to the same task.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    id: u64,
    cancelled: Rc<Cell<bool>>
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        if !self.cancelled.replace(true) {
            tracing::debug!(task = self.id, "repeating task cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct RepeatingTask {
    id: u64,
    period: Duration,
    next_due: Duration,
    cancelled: Rc<Cell<bool>>,
    run: Box<dyn FnMut()>
}

/// Repeating tasks on a virtual clock moved forward by `advance`.
#[derive(Default)]
pub struct Scheduler {
    elapsed: Duration,
    next_id: u64,
    tasks: Vec<RepeatingTask>
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    /// Time advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Runs `run` every `period`, first one full period from now.
    pub fn schedule_repeating<F>(&mut self, period: Duration, run: F) -> Result<TaskHandle, SchedulerError>
        where F: FnMut() + 'static {
        if period.is_zero() {
            return Err(SchedulerError::ZeroPeriod);
        }

        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Rc::new(Cell::new(false));
        self.tasks.push(RepeatingTask {
            id,
            period,
            next_due: self.elapsed + period,
            cancelled: cancelled.clone(),
            run: Box::new(run)
        });
        Ok(TaskHandle { id, cancelled })
    }

    /// Number of tasks that have not been cancelled.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.cancelled.get()).count()
    }

    pub fn cancel_all(&mut self) {
        for task in self.tasks.iter() {
            task.cancelled.set(true);
        }
        self.tasks.clear();
    }

    /// Moves time forward by `by`, running every tick that falls due, in time
    /// order. Ticks due at the same moment run in scheduling order.
    ///
    /// Returns the number of task runs.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.elapsed + by;
        let mut runs = 0;

        loop {
            self.tasks.retain(|t| !t.cancelled.get());

            let due = self.tasks
                .iter_mut()
                .filter(|t| t.next_due <= target)
                .min_by_key(|t| (t.next_due, t.id));

            match due {
                Some(task) => {
                    self.elapsed = task.next_due;
                    task.next_due += task.period;
                    (task.run)();
                    runs += 1;
                },
                None => break
            }
        }

        self.elapsed = target;
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn zero_period_is_rejected() {
        let mut scheduler = Scheduler::new();
        assert_eq!(
            scheduler.schedule_repeating(Duration::ZERO, || {}).err(),
            Some(SchedulerError::ZeroPeriod)
        );
    }

    #[test]
    fn ticks_fire_once_per_period() {
        let mut scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        scheduler.schedule_repeating(Duration::from_secs(1), move || counter.set(counter.get() + 1)).unwrap();

        assert_eq!(scheduler.advance(Duration::from_millis(999)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(scheduler.advance(Duration::from_secs(10)), 10);
        assert_eq!(count.get(), 11);
        assert_eq!(scheduler.elapsed(), Duration::from_secs(11));
    }

    #[test]
    fn interleaves_tasks_in_time_order() {
        let mut scheduler = Scheduler::new();
        let log: Rc<RefCell<Vec<(&'static str, u64)>>> = Rc::new(RefCell::new(Vec::new()));
        let elapsed = Rc::new(Cell::new(0u64));

        let (fast_log, fast_elapsed) = (log.clone(), elapsed.clone());
        scheduler.schedule_repeating(Duration::from_secs(1), move || {
            fast_elapsed.set(fast_elapsed.get() + 1);
            fast_log.borrow_mut().push(("fast", fast_elapsed.get()));
        }).unwrap();
        let slow_log = log.clone();
        scheduler.schedule_repeating(Duration::from_secs(3), move || {
            slow_log.borrow_mut().push(("slow", 0));
        }).unwrap();

        scheduler.advance(Duration::from_secs(3));
        assert_eq!(*log.borrow(), vec![("fast", 1), ("fast", 2), ("fast", 3), ("slow", 0)]);
    }

    #[test]
    fn cancelled_task_never_runs_again() {
        let mut scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = scheduler
            .schedule_repeating(Duration::from_secs(1), move || counter.set(counter.get() + 1))
            .unwrap();

        scheduler.advance(Duration::from_secs(2));
        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(Duration::from_secs(60));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn a_task_can_cancel_another_mid_advance() {
        let mut scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let victim = scheduler
            .schedule_repeating(Duration::from_secs(2), move || counter.set(counter.get() + 1))
            .unwrap();
        let killer_handle = victim.clone();
        scheduler.schedule_repeating(Duration::from_secs(5), move || killer_handle.cancel()).unwrap();

        scheduler.advance(Duration::from_secs(20));
        // Victim ran at 2 and 4 before being cancelled at 5
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn cancel_all_clears_everything() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule_repeating(Duration::from_secs(1), || {}).unwrap();
        let b = scheduler.schedule_repeating(Duration::from_secs(1), || {}).unwrap();
        assert_ne!(a.id(), b.id());
        scheduler.cancel_all();
        assert!(a.is_cancelled() && b.is_cancelled());
        assert_eq!(scheduler.advance(Duration::from_secs(5)), 0);
    }
}
