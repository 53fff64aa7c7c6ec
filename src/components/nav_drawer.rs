use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::dom;
use crate::error::Result;
use crate::markers;
use crate::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    pub fn is_open(self) -> bool {
        self == DrawerState::Open
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrawerState::Closed => "closed",
            DrawerState::Open => "open",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    Toggle,
    LinkSelected,
    Escape,
    OutsideClick,
}

/// Mobile navigation drawer. Starts closed.
#[derive(Debug, Default)]
pub struct NavDrawer {
    state: DrawerState,
}

impl NavDrawer {
    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// Applies `event` and returns the new state, or `None` when nothing changed.
    pub fn handle(&mut self, event: DrawerEvent) -> Option<DrawerState> {
        let next = match (event, self.state) {
            (DrawerEvent::Toggle, DrawerState::Closed) => DrawerState::Open,
            (DrawerEvent::Toggle, DrawerState::Open) => DrawerState::Closed,
            (_, DrawerState::Open) => DrawerState::Closed,
            (_, DrawerState::Closed) => return None,
        };
        self.state = next;
        Some(next)
    }
}

pub trait DrawerView {
    fn render(&self, state: DrawerState);
}

fn dispatch(
    drawer: &RefCell<NavDrawer>,
    view: &dyn DrawerView,
    event: DrawerEvent,
) -> Option<DrawerState> {
    let next = drawer.borrow_mut().handle(event);
    if let Some(state) = next {
        view.render(state);
    }
    next
}

struct DrawerElements {
    drawer: Element,
    toggle: Element,
    body: Option<HtmlElement>,
}

impl DrawerView for DrawerElements {
    fn render(&self, state: DrawerState) {
        dom::logged(
            "drawer state",
            self.drawer.set_attribute("data-state", state.as_str()),
        );
        let expanded = if state.is_open() { "true" } else { "false" };
        dom::logged(
            "toggle aria-expanded",
            self.toggle.set_attribute("aria-expanded", expanded),
        );
        if let Some(body) = &self.body {
            dom::logged(
                "body nav-open",
                dom::set_class(body, markers::NAV_OPEN, state.is_open()),
            );
        }
    }
}

pub fn install(page: &Page) -> Result<()> {
    let drawer = dom::require(&page.document, markers::NAV)?;
    let toggle = dom::require(&page.document, markers::NAV_TOGGLE)?;
    let links = dom::query_all_in(&drawer, markers::IN_PAGE_ANCHOR)?;

    let view = Rc::new(DrawerElements {
        drawer: drawer.clone(),
        toggle: toggle.clone(),
        body: page.document.body(),
    });
    let state = Rc::new(RefCell::new(NavDrawer::default()));
    view.render(state.borrow().state());

    {
        let (state, view) = (Rc::clone(&state), Rc::clone(&view));
        dom::listen(&toggle, "click", move |event: MouseEvent| {
            event.prevent_default();
            dispatch(&state, &*view, DrawerEvent::Toggle);
        })?;
    }

    for link in links {
        let (state, view) = (Rc::clone(&state), Rc::clone(&view));
        dom::listen(&link, "click", move |_: MouseEvent| {
            dispatch(&state, &*view, DrawerEvent::LinkSelected);
        })?;
    }

    {
        let (state, view) = (Rc::clone(&state), Rc::clone(&view));
        let toggle = toggle.clone();
        dom::listen(&page.document, "keydown", move |event: KeyboardEvent| {
            if event.key() != "Escape" {
                return;
            }
            if dispatch(&state, &*view, DrawerEvent::Escape).is_some() {
                if let Some(toggle) = toggle.dyn_ref::<HtmlElement>() {
                    dom::logged("toggle focus", toggle.focus());
                }
            }
        })?;
    }

    {
        let (state, view) = (Rc::clone(&state), Rc::clone(&view));
        dom::listen(&page.document, "click", move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            if drawer.contains(Some(&target)) || toggle.contains(Some(&target)) {
                return;
            }
            dispatch(&state, &*view, DrawerEvent::OutsideClick);
        })?;
    }

    Ok(())
}
