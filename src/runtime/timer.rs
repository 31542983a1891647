use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

type Callback = Rc<RefCell<dyn FnMut(Duration)>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

struct TimerEntry {
    interval: Duration,
    next_fire: Duration,
    callback: Callback,
}

#[derive(Default)]
struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, TimerEntry>,
}

impl Scheduler {
    /// The earliest due timer, ties broken by scheduling order.
    fn next_due(&self, until: Duration) -> Option<TimerId> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.next_fire <= until)
            .min_by_key(|(id, entry)| (entry.next_fire, **id))
            .map(|(id, _)| *id)
    }
}

/// A single-threaded run loop driving recurring timers.
///
/// Time is supplied by the host through [`RunLoop::advance_to`]; callbacks run
/// synchronously on the calling thread. Clones share the same loop.
#[derive(Clone, Default)]
pub struct RunLoop {
    scheduler: Rc<RefCell<Scheduler>>,
}

impl RunLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// The time the loop was last advanced to.
    pub fn now(&self) -> Duration {
        self.scheduler.borrow().now
    }

    pub fn active_timers(&self) -> usize {
        self.scheduler.borrow().timers.len()
    }

    /// Schedules `callback` to run every `interval`, first firing one interval from now.
    ///
    /// The timer lives as long as the returned guard.
    pub fn schedule_repeating<F>(&self, interval: Duration, callback: F) -> Result<TimerGuard, TimerError>
    where
        F: FnMut(Duration) + 'static,
    {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval);
        }
        let mut scheduler = self.scheduler.borrow_mut();
        let id = TimerId(scheduler.next_id);
        scheduler.next_id += 1;
        let next_fire = scheduler.now + interval;
        scheduler.timers.insert(id, TimerEntry { interval, next_fire, callback: Rc::new(RefCell::new(callback)) });
        log::debug!("scheduled timer {id:?} every {interval:?}");
        Ok(TimerGuard { id, scheduler: Rc::downgrade(&self.scheduler) })
    }

    /// Fires every tick due up to `now`, in due-time order, passing each
    /// callback the time its tick was scheduled for. Returns the number of
    /// callbacks run.
    pub fn advance_to(&self, now: Duration) -> usize {
        let mut fired = 0;
        loop {
            let (fire_time, callback) = {
                let mut scheduler = self.scheduler.borrow_mut();
                let Some(id) = scheduler.next_due(now) else {
                    break;
                };
                let Some(entry) = scheduler.timers.get_mut(&id) else {
                    break;
                };
                let fire_time = entry.next_fire;
                entry.next_fire += entry.interval;
                let callback = Rc::clone(&entry.callback);
                scheduler.now = scheduler.now.max(fire_time);
                (fire_time, callback)
            };
            match callback.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(fire_time),
                Err(_) => log::warn!("skipping re-entrant timer tick at {fire_time:?}"),
            };
            fired += 1;
        }
        let mut scheduler = self.scheduler.borrow_mut();
        scheduler.now = scheduler.now.max(now);
        fired
    }
}

/// Keeps a timer scheduled; dropping it cancels the timer.
#[must_use = "the timer is cancelled as soon as the guard is dropped"]
pub struct TimerGuard {
    id: TimerId,
    scheduler: Weak<RefCell<Scheduler>>,
}

impl TimerGuard {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancels the timer now rather than when the guard goes out of scope.
    pub fn cancel(self) {}
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        let Some(scheduler) = self.scheduler.upgrade() else {
            return;
        };
        // The entry is dropped after the borrow ends, so a callback owning other
        // guards can release them.
        let removed = match scheduler.try_borrow_mut() {
            Ok(mut scheduler) => scheduler.timers.remove(&self.id),
            Err(_) => {
                log::warn!("could not cancel timer {:?}: run loop is busy", self.id);
                None
            }
        };
        if removed.is_some() {
            log::debug!("cancelled timer {:?}", self.id);
        }
    }
}

/// Errors that can occur when scheduling timers
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer interval must be greater than zero")]
    ZeroInterval,
}
