use std::cell::RefCell;
use std::rc::Rc;

use web_sys::js_sys::Math;
use web_sys::{Document, Element};

use crate::dom;
use crate::error::Result;
use crate::markers;
use crate::motion::MotionPreference;
use crate::timers::{RepeatingTask, Timers};
use crate::Page;

/// The container the decorative lines fall through.
pub trait LineHost {
    type Line: 'static;

    fn is_attached(&self) -> bool;
    fn spawn(&self, left_percent: f64, duration_ms: u32) -> Option<Self::Line>;
    fn remove(&self, line: Self::Line);
}

#[derive(Debug, Clone, Copy)]
pub struct LineTiming {
    pub interval_ms: u32,
    pub duration_ms: u32,
}

struct Spawner<H, R> {
    host: Rc<H>,
    timers: Rc<dyn Timers>,
    duration_ms: u32,
    random: RefCell<R>,
}

impl<H, R> Spawner<H, R>
where
    H: LineHost + 'static,
    R: FnMut() -> f64,
{
    fn spawn_one(&self) {
        let left = ((self.random.borrow_mut())() * 100.0).clamp(0.0, 100.0);
        if let Some(line) = self.host.spawn(left, self.duration_ms) {
            let host = Rc::clone(&self.host);
            self.timers
                .after(self.duration_ms, Box::new(move || host.remove(line)));
        }
    }
}

/// Spawns one line now and another every `interval_ms`; each removes itself
/// after `duration_ms`. The schedule cancels itself on the first tick that
/// finds the host detached.
///
/// Returns `None` without touching the host when motion is reduced or the
/// host is already gone.
pub fn start<H, R>(
    host: Rc<H>,
    timers: Rc<dyn Timers>,
    motion: MotionPreference,
    timing: LineTiming,
    random: R,
) -> Option<RepeatingTask>
where
    H: LineHost + 'static,
    R: FnMut() -> f64 + 'static,
{
    if motion.is_reduced() || !host.is_attached() {
        return None;
    }

    let spawner = Rc::new(Spawner {
        host,
        timers: Rc::clone(&timers),
        duration_ms: timing.duration_ms,
        random: RefCell::new(random),
    });
    spawner.spawn_one();

    let slot: Rc<RefCell<Option<RepeatingTask>>> = Rc::default();
    let own_task = Rc::clone(&slot);
    let task = timers.every(
        timing.interval_ms,
        Box::new(move || {
            if !spawner.host.is_attached() {
                let task = own_task.borrow_mut().take();
                if let Some(task) = task {
                    task.cancel();
                }
                return;
            }
            spawner.spawn_one();
        }),
    );
    *slot.borrow_mut() = Some(task.clone());
    Some(task)
}

struct Container {
    document: Document,
    element: Element,
}

impl Container {
    fn create_line(&self, left_percent: f64, duration_ms: u32) -> Result<Element> {
        let line = self.document.create_element("div")?;
        line.set_class_name(markers::AMBIENT_LINE);
        line.set_attribute("aria-hidden", "true")?;
        dom::set_style(&line, "left", &format!("{:.2}%", left_percent))?;
        dom::set_style(&line, "animation-duration", &format!("{}ms", duration_ms))?;
        self.element.append_child(&line)?;
        Ok(line)
    }
}

impl LineHost for Container {
    type Line = Element;

    fn is_attached(&self) -> bool {
        self.element.is_connected()
    }

    fn spawn(&self, left_percent: f64, duration_ms: u32) -> Option<Element> {
        self.create_line(left_percent, duration_ms).ok()
    }

    fn remove(&self, line: Element) {
        line.remove();
    }
}

pub fn install(page: &Page) -> Result<()> {
    let element = dom::require(&page.document, markers::AMBIENT_LINES)?;
    let host = Rc::new(Container {
        document: page.document.clone(),
        element,
    });
    let timing = LineTiming {
        interval_ms: page.config.ambient_interval_ms,
        duration_ms: page.config.ambient_duration_ms,
    };
    // The schedule keeps itself alive until the container goes away.
    let _ = start(
        host,
        Rc::clone(&page.timers),
        page.motion,
        timing,
        Math::random,
    );
    Ok(())
}
