use std::rc::Rc;

use log::{debug, info, warn};
use web_sys::{Document, Window};

pub mod config;
pub mod dom;
pub mod error;
pub mod markers;
pub mod motion;
pub mod throttle;
pub mod timers;
#[cfg(test)]
mod testing;

pub mod components {
    pub mod ambient;
    pub mod faq;
    pub mod lifecycle;
    pub mod nav_drawer;
    pub mod reveal;
    pub mod scroll_state;
    pub mod skip_link;
    pub mod smooth_scroll;
    pub mod typewriter;
}

use components::{
    ambient, faq, lifecycle, nav_drawer, reveal, scroll_state, skip_link, smooth_scroll,
    typewriter,
};
use config::MotionConfig;
use error::{MotionError, Result};
use motion::MotionPreference;
use timers::{GlooTimers, Timers};

/// What every component gets at install time.
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub motion: MotionPreference,
    pub config: MotionConfig,
    pub timers: Rc<dyn Timers>,
}

impl Page {
    pub fn new(config: MotionConfig) -> Result<Self> {
        let window = web_sys::window().ok_or(MotionError::MissingTarget("window"))?;
        let document = window
            .document()
            .ok_or(MotionError::MissingTarget("document"))?;
        let motion = MotionPreference::detect(&window);
        Ok(Self {
            window,
            document,
            motion,
            config,
            timers: Rc::new(GlooTimers),
        })
    }
}

/// Installs every effect, configured from the page's `#motion-config` block.
pub fn start() -> Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(MotionError::MissingTarget("document"))?;
    start_with(MotionConfig::from_document(&document))
}

pub fn start_with(config: MotionConfig) -> Result<()> {
    let page = Page::new(config)?;
    if page.motion.is_reduced() {
        info!("Reduced motion requested, animations disabled");
    }

    let installers: [(&str, fn(&Page) -> Result<()>); 9] = [
        ("page lifecycle", lifecycle::install),
        ("smooth scroll", smooth_scroll::install),
        ("reveal on scroll", reveal::install),
        ("typewriter", typewriter::install),
        ("ambient lines", ambient::install),
        ("scroll state", scroll_state::install),
        ("navigation drawer", nav_drawer::install),
        ("faq accordion", faq::install),
        ("skip to content", skip_link::install),
    ];
    for (name, install) in installers {
        report(name, install(&page));
    }
    Ok(())
}

fn report(name: &str, result: Result<()>) {
    match result {
        Ok(()) => debug!("{} ready", name),
        Err(MotionError::MissingTarget(marker)) => debug!("{} skipped: no {}", name, marker),
        Err(err) => warn!("{} not installed: {}", name, err),
    }
}
