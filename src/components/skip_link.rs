use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::dom;
use crate::error::{MotionError, Result};
use crate::markers;
use crate::Page;

/// The first forward Tab from an unfocused page lands on the main content
/// instead of walking through the header links.
pub fn should_skip(key: &str, shift: bool, focus_on_body: bool) -> bool {
    key == "Tab" && !shift && focus_on_body
}

pub fn install(page: &Page) -> Result<()> {
    let main = dom::require(&page.document, markers::MAIN)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| MotionError::MissingTarget(markers::MAIN))?;
    if !main.has_attribute("tabindex") {
        main.set_attribute("tabindex", "-1")?;
    }

    let document = page.document.clone();
    dom::listen(&page.document, "keydown", move |event: KeyboardEvent| {
        let focus_on_body = match (document.active_element(), document.body()) {
            (None, _) => true,
            (Some(active), Some(body)) => active == *body,
            (Some(_), None) => false,
        };
        if should_skip(&event.key(), event.shift_key(), focus_on_body) && main.focus().is_ok() {
            event.prevent_default();
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_tab_from_the_body_skips() {
        assert!(should_skip("Tab", false, true));
    }

    #[test]
    fn everything_else_tabs_normally() {
        assert!(!should_skip("Tab", true, true));
        assert!(!should_skip("Tab", false, false));
        assert!(!should_skip("Enter", false, true));
        assert!(!should_skip("Escape", false, true));
    }
}
