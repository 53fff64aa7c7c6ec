use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::timers::Timers;

/// Trailing-edge throttle.
///
/// The first call in a quiet period runs immediately and opens a window.
/// Calls made while the window is open are coalesced: only the latest argument
/// is kept and runs when the window closes, which opens a new window.
pub struct Throttle<A: 'static> {
    shared: Rc<Shared<A>>,
}

struct Shared<A> {
    window_ms: u32,
    timers: Rc<dyn Timers>,
    run: RefCell<Box<dyn FnMut(A)>>,
    cooling: Cell<bool>,
    pending: RefCell<Option<A>>,
}

impl<A: 'static> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A: 'static> Throttle<A> {
    pub fn new(window_ms: u32, timers: Rc<dyn Timers>, run: impl FnMut(A) + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                window_ms,
                timers,
                run: RefCell::new(Box::new(run)),
                cooling: Cell::new(false),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn call(&self, arg: A) {
        if self.shared.cooling.get() {
            *self.shared.pending.borrow_mut() = Some(arg);
            return;
        }
        Self::fire(&self.shared, arg);
    }

    fn fire(shared: &Rc<Shared<A>>, arg: A) {
        // Set first so a call made from inside `run` is queued, not re-entered.
        shared.cooling.set(true);
        (shared.run.borrow_mut())(arg);

        let next = Rc::clone(shared);
        shared.timers.after(
            shared.window_ms,
            Box::new(move || {
                let pending = next.pending.borrow_mut().take();
                match pending {
                    Some(arg) => Self::fire(&next, arg),
                    None => next.cooling.set(false),
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualTimers;
    use proptest::prelude::*;

    fn recorder(timers: &ManualTimers) -> (Throttle<u32>, Rc<RefCell<Vec<(u64, u32)>>>) {
        let runs = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&runs);
        let clock = timers.clone();
        let throttle = Throttle::new(100, Rc::new(timers.clone()), move |value| {
            log.borrow_mut().push((clock.now(), value));
        });
        (throttle, runs)
    }

    #[test]
    fn first_call_runs_immediately() {
        let timers = ManualTimers::new();
        let (throttle, runs) = recorder(&timers);

        throttle.call(1);
        assert_eq!(*runs.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn burst_collapses_to_latest_value_at_window_end() {
        let timers = ManualTimers::new();
        let (throttle, runs) = recorder(&timers);

        throttle.call(1);
        timers.advance(10);
        throttle.call(2);
        timers.advance(10);
        throttle.call(3);
        timers.advance(10);
        throttle.call(4);
        assert_eq!(runs.borrow().len(), 1);

        timers.advance(70);
        assert_eq!(*runs.borrow(), vec![(0, 1), (100, 4)]);
    }

    #[test]
    fn quiet_window_reopens_for_immediate_run() {
        let timers = ManualTimers::new();
        let (throttle, runs) = recorder(&timers);

        throttle.call(1);
        timers.advance(250);
        throttle.call(2);
        assert_eq!(*runs.borrow(), vec![(0, 1), (250, 2)]);
    }

    proptest! {
        #[test]
        fn runs_are_spaced_by_the_window_and_end_on_the_latest_value(
            gaps in proptest::collection::vec(0u64..250, 1..60)
        ) {
            let timers = ManualTimers::new();
            let (throttle, runs) = recorder(&timers);

            let mut first_at = None;
            for (value, gap) in gaps.iter().enumerate() {
                timers.advance(*gap);
                first_at.get_or_insert(timers.now());
                throttle.call(value as u32);
            }
            timers.advance(1000);

            let runs = runs.borrow();
            prop_assert_eq!(runs[0], (first_at.unwrap(), 0));
            for pair in runs.windows(2) {
                prop_assert!(pair[1].0 - pair[0].0 >= 100);
            }
            prop_assert_eq!(runs.last().unwrap().1, (gaps.len() - 1) as u32);
        }
    }
}
