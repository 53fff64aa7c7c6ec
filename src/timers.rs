use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};

/// Deferred work, scheduled on the browser's event loop.
pub trait Timers {
    /// Runs `task` once after `millis`. Not cancellable.
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>);

    /// Runs `task` every `millis` until the returned handle is cancelled.
    fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> RepeatingTask;
}

/// Handle to a repeating schedule. Clones share the same schedule, so a tick
/// can hold one and cancel itself.
#[derive(Clone)]
pub struct RepeatingTask {
    cancel: Rc<RefCell<Option<Box<dyn FnOnce()>>>>,
}

impl RepeatingTask {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Rc::new(RefCell::new(Some(Box::new(cancel)))),
        }
    }

    pub fn cancel(&self) {
        let cancel = self.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.borrow().is_none()
    }
}

/// `setTimeout`/`setInterval` through gloo.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTimers;

impl Timers for GlooTimers {
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(millis, task).forget();
    }

    fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> RepeatingTask {
        let interval = Rc::new(RefCell::new(Some(Interval::new(millis, task))));
        RepeatingTask::new(move || {
            if let Some(interval) = interval.borrow_mut().take() {
                // The cancelling tick may still be running inside this closure,
                // so it is released on the next turn of the event loop.
                let closure = interval.cancel();
                Timeout::new(0, move || drop(closure)).forget();
            }
        })
    }
}
