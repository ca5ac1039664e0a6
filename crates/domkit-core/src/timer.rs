//! Deferred tasks and clocks.
//!
//! Widgets never talk to `setTimeout` directly. They hold a [`TimerSlot`]
//! over an injected [`Scheduler`]; the browser host provides one backed by
//! the window timers and tests drive a [`ManualScheduler`] in virtual time.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// A one-shot task run by a scheduler.
pub type Task = Box<dyn FnOnce()>;

/// Something that can run a task after a delay.
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed. Returns `None` if the task could
    /// not be scheduled and will never run.
    fn schedule(&self, delay: Duration, task: Task) -> Option<TimerId>;

    /// Cancel a scheduled task. Cancelling a fired or unknown task does nothing.
    fn cancel(&self, id: TimerId);
}

/// Source of the current time, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

struct PendingTask {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    tasks: Vec<PendingTask>,
}

/// A deterministic scheduler driven by explicit calls to [`advance`](Self::advance).
///
/// Also acts as a [`Clock`] reporting the virtual time.
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<ManualInner>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("pending", &inner.tasks.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Move virtual time forward, running every task that falls due, in due order.
    ///
    /// Tasks scheduled by running tasks are honoured if they fall due within
    /// the same advance.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let earliest = inner
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id.0))
                    .map(|(i, _)| i);
                earliest.map(|i| {
                    let pending = inner.tasks.remove(i);
                    inner.now = pending.due;
                    pending
                })
            };
            match next {
                Some(pending) => {
                    log::trace!("manual scheduler: running timer {:?}", pending.id);
                    (pending.task)();
                }
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Option<TimerId> {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.tasks.push(PendingTask { id, due, task });
        Some(id)
    }

    fn cancel(&self, id: TimerId) {
        self.inner.borrow_mut().tasks.retain(|t| t.id != id);
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> Duration {
        self.inner.borrow().now
    }
}

/// Holds at most one pending task per owner.
///
/// Starting a new task cancels the one in flight, and dropping the slot
/// cancels whatever is still pending.
pub struct TimerSlot {
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl fmt::Debug for TimerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSlot")
            .field("pending", &self.pending.get())
            .finish()
    }
}

impl TimerSlot {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Schedule `task`, replacing any task still pending in this slot.
    /// Returns whether the task was scheduled.
    pub fn start(&self, delay: Duration, task: impl FnOnce() + 'static) -> bool {
        self.cancel();
        let pending = self.pending.clone();
        let id = self.scheduler.schedule(
            delay,
            Box::new(move || {
                pending.set(None);
                task();
            }),
        );
        match id {
            Some(id) => {
                log::trace!("timer {:?} scheduled in {:?}", id, delay);
                self.pending.set(Some(id));
                true
            }
            None => {
                log::warn!("could not schedule a task in {:?}", delay);
                false
            }
        }
    }

    /// Cancel the pending task, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            log::trace!("timer {:?} cancelled", id);
            self.scheduler.cancel(id);
        }
    }

    /// Whether a task is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |tag: &'static str| -> Task {
                let log = log.clone();
                Box::new(move || log.borrow_mut().push(tag))
            }
        };
        (log, make)
    }

    #[test]
    fn test_manual_scheduler_runs_in_due_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_millis(30), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("early"));
        scheduler.schedule(Duration::from_millis(10), task("early-second"));

        scheduler.advance(Duration::from_millis(9));
        assert!(log.borrow().is_empty());

        scheduler.advance(Duration::from_millis(25));
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(34));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        let id = scheduler.schedule(Duration::from_millis(5), task("never")).unwrap();
        scheduler.cancel(id);
        scheduler.advance(Duration::from_secs(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_task_scheduled_from_task_runs_in_same_advance() {
        let scheduler = Rc::new(ManualScheduler::new());
        let hit = Rc::new(Cell::new(Duration::ZERO));
        {
            let inner_scheduler = scheduler.clone();
            let hit = hit.clone();
            scheduler.schedule(
                Duration::from_millis(10),
                Box::new(move || {
                    let clock = inner_scheduler.clone();
                    inner_scheduler.schedule(
                        Duration::from_millis(10),
                        Box::new(move || hit.set(clock.now())),
                    );
                }),
            );
        }

        scheduler.advance(Duration::from_millis(50));
        assert_eq!(hit.get(), Duration::from_millis(20));
    }

    #[test]
    fn test_timer_slot_replaces_pending_task() {
        let scheduler = Rc::new(ManualScheduler::new());
        let slot = TimerSlot::new(scheduler.clone());
        let (log, task) = recorder();

        slot.start(Duration::from_millis(100), task("first"));
        scheduler.advance(Duration::from_millis(50));
        slot.start(Duration::from_millis(100), task("second"));
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_millis(60));
        assert!(log.borrow().is_empty());
        assert!(slot.is_pending());

        scheduler.advance(Duration::from_millis(40));
        assert_eq!(*log.borrow(), vec!["second"]);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_timer_slot_drop_cancels() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (log, task) = recorder();
        {
            let slot = TimerSlot::new(scheduler.clone());
            slot.start(Duration::from_millis(10), task("stale"));
        }
        scheduler.advance(Duration::from_millis(20));
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    struct RefusingScheduler;

    impl Scheduler for RefusingScheduler {
        fn schedule(&self, _delay: Duration, _task: Task) -> Option<TimerId> {
            None
        }

        fn cancel(&self, _id: TimerId) {}
    }

    #[test]
    fn test_timer_slot_stays_empty_when_scheduling_fails() {
        let slot = TimerSlot::new(Rc::new(RefusingScheduler));
        let (_log, task) = recorder();
        assert!(!slot.start(Duration::from_millis(10), task("lost")));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
