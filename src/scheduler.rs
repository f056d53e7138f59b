use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// One-shot timer service. Every deferred step on the page goes through this,
/// so the browser uses real timeouts and tests drive a virtual clock.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&self, id: TimerId);
}

/// `setTimeout`-backed scheduler.
#[derive(Default)]
pub struct WebScheduler {
    next_id: Cell<u64>,
    pending: Rc<RefCell<HashMap<u64, Timeout>>>,
}

impl WebScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let pending = Rc::downgrade(&self.pending);
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(pending) = pending.upgrade() {
                // the running closure belongs to this Timeout, it must not be dropped here
                let own = pending.borrow_mut().remove(&id);
                if let Some(own) = own {
                    let _ = own.forget();
                }
            }
            task();
        });
        self.pending.borrow_mut().insert(id, timeout);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        // dropping a Timeout clears it
        let removed = self.pending.borrow_mut().remove(&id.0);
        drop(removed);
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use super::*;

    struct Entry {
        due: u64,
        id: u64,
        task: Box<dyn FnOnce()>,
    }

    /// Virtual clock. Nothing runs until `advance` is called.
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<u64>,
        next_id: Cell<u64>,
        queue: RefCell<Vec<Entry>>,
    }

    impl ManualScheduler {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn now(&self) -> u64 {
            self.now.get()
        }

        pub fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        /// Runs every task due within the next `ms` milliseconds, in due order,
        /// including tasks scheduled by the tasks themselves.
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    let index = queue
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due <= target)
                        .min_by_key(|(_, e)| (e.due, e.id))
                        .map(|(i, _)| i);
                    index.map(|i| queue.remove(i))
                };
                match next {
                    Some(entry) => {
                        self.now.set(entry.due);
                        (entry.task)();
                    }
                    None => break,
                }
            }
            self.now.set(target);
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.queue.borrow_mut().push(Entry {
                due: self.now.get() + u64::from(delay_ms),
                id,
                task,
            });
            TimerId(id)
        }

        fn cancel(&self, id: TimerId) {
            self.queue.borrow_mut().retain(|e| e.id != id.0);
        }
    }
}
