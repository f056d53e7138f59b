use std::cell::Cell;
use std::rc::Rc;

use crate::scheduler::{Scheduler, TimerId};

/// Leading-edge throttle: the first call runs immediately, calls during the
/// following `limit_ms` are dropped.
pub struct Throttle {
    limit_ms: u32,
    blocked: Rc<Cell<bool>>,
    scheduler: Rc<dyn Scheduler>,
}

impl Throttle {
    pub fn new(limit_ms: u32, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            limit_ms,
            blocked: Rc::new(Cell::new(false)),
            scheduler,
        }
    }

    pub fn call(&self, f: impl FnOnce()) {
        if self.blocked.get() {
            return;
        }
        f();
        self.blocked.set(true);
        let blocked = self.blocked.clone();
        self.scheduler
            .schedule(self.limit_ms, Box::new(move || blocked.set(false)));
    }
}

/// Trailing-edge debounce: only the last call of a burst runs, `wait_ms`
/// after the burst ends.
pub struct Debounce {
    wait_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
    scheduler: Rc<dyn Scheduler>,
}

impl Debounce {
    pub fn new(wait_ms: u32, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            wait_ms,
            pending: Rc::new(Cell::new(None)),
            scheduler,
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        let pending = self.pending.clone();
        let id = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || {
                pending.set(None);
                f();
            }),
        );
        self.pending.set(Some(id));
    }
}
