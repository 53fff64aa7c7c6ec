//! Virtual clock standing in for the browser's timers in unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::timers::{RepeatingTask, Timers};

enum Job {
    Once(Box<dyn FnOnce()>),
    Every {
        period: u32,
        task: Box<dyn FnMut()>,
        cancelled: Rc<Cell<bool>>,
    },
}

struct Entry {
    due: u64,
    seq: u64,
    job: Job,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    fired: u64,
    queue: Vec<Entry>,
}

impl Clock {
    fn push(&mut self, due: u64, job: Job) {
        self.seq += 1;
        let seq = self.seq;
        self.queue.push(Entry { due, seq, job });
    }

    fn pop_due(&mut self, until: u64) -> Option<Entry> {
        let next = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(index, _)| index)?;
        let entry = self.queue.remove(next);
        self.now = entry.due;
        Some(entry)
    }
}

#[derive(Clone, Default)]
pub struct ManualTimers {
    clock: Rc<RefCell<Clock>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of callbacks that have run so far.
    pub fn fired(&self) -> u64 {
        self.clock.borrow().fired
    }

    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .queue
            .iter()
            .filter(|entry| match &entry.job {
                Job::Once(_) => true,
                Job::Every { cancelled, .. } => !cancelled.get(),
            })
            .count()
    }

    /// Moves the clock forward, running everything that falls due in order.
    pub fn advance(&self, millis: u64) {
        let until = self.now() + millis;
        loop {
            let entry = self.clock.borrow_mut().pop_due(until);
            let Some(entry) = entry else { break };
            match entry.job {
                Job::Once(task) => {
                    self.clock.borrow_mut().fired += 1;
                    task();
                }
                Job::Every {
                    period,
                    mut task,
                    cancelled,
                } => {
                    if cancelled.get() {
                        continue;
                    }
                    self.clock.borrow_mut().fired += 1;
                    task();
                    if !cancelled.get() {
                        let due = entry.due + u64::from(period);
                        self.clock.borrow_mut().push(
                            due,
                            Job::Every {
                                period,
                                task,
                                cancelled,
                            },
                        );
                    }
                }
            }
        }
        self.clock.borrow_mut().now = until;
    }
}

impl Timers for ManualTimers {
    fn after(&self, millis: u32, task: Box<dyn FnOnce()>) {
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + u64::from(millis);
        clock.push(due, Job::Once(task));
    }

    fn every(&self, millis: u32, task: Box<dyn FnMut()>) -> RepeatingTask {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + u64::from(millis);
        clock.push(
            due,
            Job::Every {
                period: millis,
                task,
                cancelled: Rc::clone(&cancelled),
            },
        );
        RepeatingTask::new(move || cancelled.set(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_jobs_in_due_order() {
        let timers = ManualTimers::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = Rc::clone(&log);
            timers.after(delay, Box::new(move || log.borrow_mut().push(name)));
        }

        timers.advance(15);
        assert_eq!(*log.borrow(), vec!["a"]);
        timers.advance(15);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(timers.now(), 30);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn repeating_task_stops_after_cancel() {
        let timers = ManualTimers::new();
        let count = Rc::new(Cell::new(0));
        let ticks = Rc::clone(&count);
        let task = timers.every(100, Box::new(move || ticks.set(ticks.get() + 1)));

        timers.advance(350);
        assert_eq!(count.get(), 3);

        task.cancel();
        assert!(task.is_cancelled());
        timers.advance(1000);
        assert_eq!(count.get(), 3);
        assert_eq!(timers.pending(), 0);
    }
}
