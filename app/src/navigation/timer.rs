//! Deferred execution used by soft navigation and transitions.
//!
//! [`BrowserTimer`] wraps `setTimeout`; [`ManualTimer`] runs tasks against a
//! virtual clock that only moves when told to, which keeps delay assertions
//! deterministic.

use core::{cell::RefCell, fmt, time::Duration};
use std::rc::Rc;

use leptos::prelude::{TimeoutHandle, set_timeout_with_handle};

use super::NavigationError;

/// A one-shot task scheduler.
pub trait Timer: Clone + 'static {
    type Handle: Copy + fmt::Debug + 'static;

    /// Runs `task` once, no earlier than `delay` from now.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Timer`] when the platform refuses the timeout.
    fn schedule(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, NavigationError>;

    /// Drops a task that has not run yet. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Handle = TimeoutHandle;

    fn schedule(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, NavigationError> {
        set_timeout_with_handle(task, delay).map_err(|err| NavigationError::Timer(format!("{err:?}")))
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManualHandle(u64);

struct Scheduled {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    queue: Vec<Scheduled>,
}

/// Virtual-clock timer. Clones share one clock.
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Rc<RefCell<Clock>>,
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("ManualTimer")
            .field("now", &clock.now)
            .field("pending", &clock.queue.len())
            .finish()
    }
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of tasks still waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Moves the clock forward by `by`, running every task that falls due in
    /// order of due time. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, scheduled)| scheduled.due <= target)
                    .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.id))
                    .map(|(index, _)| index);
                earliest.map(|index| {
                    let scheduled = clock.queue.remove(index);
                    clock.now = scheduled.due;
                    scheduled.task
                })
            };
            // The borrow is released so tasks may schedule follow-ups.
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
        ran
    }
}

impl Timer for ManualTimer {
    type Handle = ManualHandle;

    fn schedule(
        &self,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, NavigationError> {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.queue.push(Scheduled { id, due, task });
        Ok(ManualHandle(id))
    }

    fn cancel(&self, handle: Self::Handle) {
        self.clock
            .borrow_mut()
            .queue
            .retain(|scheduled| scheduled.id != handle.0);
    }
}
