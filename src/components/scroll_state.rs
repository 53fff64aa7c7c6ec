use std::rc::Rc;

use web_sys::{Element, Event, MouseEvent};

use crate::components::smooth_scroll;
use crate::config::MotionConfig;
use crate::dom;
use crate::error::Result;
use crate::markers;
use crate::throttle::Throttle;
use crate::Page;

/// Everything the page derives from the vertical scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub header_scrolled: bool,
    pub parallax_offset: f64,
    pub scroll_top_visible: bool,
}

impl ScrollState {
    pub fn at(scroll_y: f64, config: &MotionConfig) -> Self {
        Self {
            header_scrolled: scroll_y > config.header_scrolled_threshold,
            parallax_offset: scroll_y * config.parallax_coefficient,
            scroll_top_visible: scroll_y > config.scroll_top_threshold,
        }
    }
}

pub trait ScrollView {
    fn apply(&self, state: &ScrollState);
}

struct PageScrollView {
    root: Option<Element>,
    header: Option<Element>,
    scroll_top: Option<Element>,
}

impl ScrollView for PageScrollView {
    fn apply(&self, state: &ScrollState) {
        if let Some(header) = &self.header {
            dom::logged(
                "header is-scrolled",
                dom::set_class(header, markers::SCROLLED, state.header_scrolled),
            );
        }
        if let Some(root) = &self.root {
            dom::logged(
                "parallax offset",
                dom::set_style(
                    root,
                    markers::PARALLAX_PROPERTY,
                    &format!("{:.2}px", state.parallax_offset),
                ),
            );
        }
        if let Some(control) = &self.scroll_top {
            dom::logged(
                "scroll-top is-visible",
                dom::set_class(control, markers::VISIBLE, state.scroll_top_visible),
            );
        }
    }
}

pub fn install(page: &Page) -> Result<()> {
    let scroll_top = dom::query(&page.document, markers::SCROLL_TOP)?;
    let view = PageScrollView {
        root: page.document.document_element(),
        header: dom::query(&page.document, markers::HEADER)?,
        scroll_top: scroll_top.clone(),
    };

    let config = page.config.clone();
    let throttle = Throttle::new(
        page.config.scroll_throttle_ms,
        Rc::clone(&page.timers),
        move |scroll_y: f64| view.apply(&ScrollState::at(scroll_y, &config)),
    );

    // Pages restored mid-scroll start in the right state.
    throttle.call(page.window.scroll_y().unwrap_or(0.0));

    let window = page.window.clone();
    dom::listen_passive(&page.window, "scroll", move |_: Event| {
        throttle.call(window.scroll_y().unwrap_or(0.0));
    })?;

    if let Some(control) = scroll_top {
        let window = page.window.clone();
        let behavior = page.motion.scroll_behavior();
        dom::listen(&control, "click", move |event: MouseEvent| {
            event.prevent_default();
            smooth_scroll::scroll_to(&window, 0.0, behavior);
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualTimers;
    use proptest::prelude::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorded {
        states: RefCell<Vec<ScrollState>>,
    }

    impl ScrollView for Rc<Recorded> {
        fn apply(&self, state: &ScrollState) {
            self.states.borrow_mut().push(*state);
        }
    }

    #[test]
    fn header_flips_exactly_at_the_threshold() {
        let config = MotionConfig::default();
        assert!(!ScrollState::at(0.0, &config).header_scrolled);
        assert!(!ScrollState::at(16.0, &config).header_scrolled);
        assert!(ScrollState::at(16.5, &config).header_scrolled);
        assert!(ScrollState::at(17.0, &config).header_scrolled);
    }

    #[test]
    fn scroll_top_shows_past_five_hundred() {
        let config = MotionConfig::default();
        assert!(!ScrollState::at(500.0, &config).scroll_top_visible);
        assert!(ScrollState::at(501.0, &config).scroll_top_visible);
    }

    #[test]
    fn parallax_follows_the_coefficient() {
        let config = MotionConfig::default();
        let state = ScrollState::at(1000.0, &config);
        assert!((state.parallax_offset - 120.0).abs() < 1e-9);
        assert_eq!(ScrollState::at(0.0, &config).parallax_offset, 0.0);
    }

    #[test]
    fn throttled_ticks_reflect_the_latest_position() {
        let timers = ManualTimers::new();
        let recorded = Rc::new(Recorded::default());
        let view = Rc::clone(&recorded);
        let config = MotionConfig::default();
        let throttle = Throttle::new(100, Rc::new(timers.clone()), move |y: f64| {
            view.apply(&ScrollState::at(y, &config))
        });

        throttle.call(10.0);
        timers.advance(30);
        throttle.call(300.0);
        timers.advance(30);
        throttle.call(620.0);
        timers.advance(40);
        throttle.call(4.0);
        timers.advance(100);

        let states = recorded.states.borrow();
        let tops: Vec<bool> = states.iter().map(|s| s.scroll_top_visible).collect();
        let headers: Vec<bool> = states.iter().map(|s| s.header_scrolled).collect();
        assert_eq!(tops, vec![false, true, false]);
        assert_eq!(headers, vec![false, true, false]);
    }

    proptest! {
        #[test]
        fn derivations_depend_only_on_position(y in 0.0f64..20_000.0) {
            let config = MotionConfig::default();
            let state = ScrollState::at(y, &config);
            prop_assert_eq!(state.header_scrolled, y > 16.0);
            prop_assert_eq!(state.scroll_top_visible, y > 500.0);
            prop_assert!((state.parallax_offset - y * 0.12).abs() < 1e-9);
            prop_assert_eq!(state, ScrollState::at(y, &config));
        }

        #[test]
        fn header_transitions_track_the_threshold_crossing(a in 0.0f64..64.0, b in 0.0f64..64.0) {
            let config = MotionConfig::default();
            let before = ScrollState::at(a, &config).header_scrolled;
            let after = ScrollState::at(b, &config).header_scrolled;
            prop_assert_eq!(!before && after, a <= 16.0 && b > 16.0);
            prop_assert_eq!(before && !after, a > 16.0 && b <= 16.0);
        }
    }
}
