use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::dom;
use crate::error::{MotionError, Result};
use crate::markers;
use crate::Page;

/// The element id an in-page link points at. `#` alone and absolute URLs
/// are left to the browser.
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// The id a click on a link with `href` should scroll to, or `None` when the
/// click is left to the browser.
pub fn intercept<'a>(href: Option<&'a str>, exists: impl Fn(&str) -> bool) -> Option<&'a str> {
    fragment_id(href?).filter(|id| exists(id))
}

/// Scroll position that puts `element_top` just below the fixed header.
pub fn scroll_target(element_top: f64, header_height: f64, padding: f64) -> f64 {
    element_top - (header_height + padding)
}

pub fn scroll_to(window: &Window, top: f64, behavior: ScrollBehavior) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(behavior);
    window.scroll_to_with_scroll_to_options(&options);
}

fn header_height(document: &Document) -> f64 {
    document
        .query_selector(markers::HEADER)
        .ok()
        .flatten()
        .and_then(|header| header.dyn_into::<HtmlElement>().ok())
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0)
}

fn document_top(window: &Window, element: &Element) -> f64 {
    element.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0)
}

pub fn install(page: &Page) -> Result<()> {
    let anchors = dom::query_all(&page.document, markers::IN_PAGE_ANCHOR)?;
    if anchors.is_empty() {
        return Err(MotionError::MissingTarget(markers::IN_PAGE_ANCHOR));
    }

    let padding = page.config.anchor_padding;
    let behavior = page.motion.scroll_behavior();

    for anchor in anchors {
        let window = page.window.clone();
        let document = page.document.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event: MouseEvent| {
            let href = link.get_attribute("href");
            let Some(id) = intercept(href.as_deref(), |id| {
                document.get_element_by_id(id).is_some()
            }) else {
                return;
            };
            let Some(target) = document.get_element_by_id(id) else {
                return;
            };

            event.prevent_default();
            let top = scroll_target(
                document_top(&window, &target),
                header_height(&document),
                padding,
            );
            scroll_to(&window, top, behavior);
        })?;
    }

    Ok(())
}
