use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::{MotionError, Result};
use crate::markers;
use crate::timers::Timers;
use crate::Page;

const TRANSITION_DELAY: &str = "transition-delay";

/// Remembers which elements have been revealed so each reveals exactly once.
#[derive(Debug)]
pub struct RevealTracker {
    threshold: f64,
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            revealed: vec![false; count],
        }
    }

    /// Returns true when this observation is the one that reveals `index`.
    pub fn observe(&mut self, index: usize, is_intersecting: bool, ratio: f64) -> bool {
        if !is_intersecting || ratio < self.threshold {
            return false;
        }
        match self.revealed.get_mut(index) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|seen| **seen).count()
    }
}

pub fn stagger_delay(index: usize, step_ms: u32, max_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(step_ms)
        .min(max_ms)
}

/// Position of every element within its reveal group, in document order.
pub fn group_positions<S: AsRef<str>>(groups: &[S]) -> Vec<usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    groups
        .iter()
        .map(|group| {
            let next = seen.entry(group.as_ref()).or_insert(0);
            let position = *next;
            *next += 1;
            position
        })
        .collect()
}

pub trait RevealView {
    fn show(&self);
    fn clear_delay(&self);
}

/// Shows the element now. The stagger only applies to the entrance, so it
/// is removed once it has elapsed and later transitions start on time.
pub fn reveal(view: Rc<dyn RevealView>, delay_ms: u32, timers: &dyn Timers) {
    view.show();
    if delay_ms > 0 {
        timers.after(delay_ms, Box::new(move || view.clear_delay()));
    }
}

struct RevealElement(Element);

impl RevealView for RevealElement {
    fn show(&self) {
        dom::logged("reveal is-visible", self.0.class_list().add_1(markers::VISIBLE));
    }

    fn clear_delay(&self) {
        dom::logged("reveal delay", dom::set_style(&self.0, TRANSITION_DELAY, ""));
    }
}

pub fn install(page: &Page) -> Result<()> {
    let elements = dom::query_all(&page.document, markers::REVEAL)?;
    if elements.is_empty() {
        return Err(MotionError::MissingTarget(markers::REVEAL));
    }

    if page.motion.is_reduced() {
        for element in &elements {
            element
                .class_list()
                .add_2(markers::REVEAL_HIDDEN, markers::VISIBLE)?;
        }
        return Ok(());
    }

    let groups: Vec<String> = elements
        .iter()
        .map(|element| element.get_attribute(markers::REVEAL_ATTR).unwrap_or_default())
        .collect();
    let mut delays = Vec::with_capacity(elements.len());
    for (element, position) in elements.iter().zip(group_positions(&groups)) {
        element.class_list().add_1(markers::REVEAL_HIDDEN)?;
        let delay = stagger_delay(
            position,
            page.config.reveal_stagger_ms,
            page.config.reveal_max_delay_ms,
        );
        if delay > 0 {
            dom::set_style(element, TRANSITION_DELAY, &format!("{}ms", delay))?;
        }
        delays.push(delay);
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new(
        elements.len(),
        page.config.reveal_threshold,
    )));
    let targets = elements.clone();
    let timers = Rc::clone(&page.timers);
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(index) = targets.iter().position(|element| *element == target) else {
                continue;
            };
            let should_reveal = tracker.borrow_mut().observe(
                index,
                entry.is_intersecting(),
                entry.intersection_ratio(),
            );
            if should_reveal {
                observer.unobserve(&target);
                let view: Rc<dyn RevealView> = Rc::new(RevealElement(target));
                reveal(view, delays.get(index).copied().unwrap_or(0), &*timers);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(page.config.reveal_threshold));
    options.set_root_margin(&page.config.reveal_root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }
    callback.forget();

    Ok(())
}
