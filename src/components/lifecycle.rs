use web_sys::{Document, Event};

use crate::dom;
use crate::error::Result;
use crate::markers;
use crate::Page;

fn mark_loaded(document: &Document) {
    if let Some(body) = document.body() {
        dom::logged("body is-loaded", body.class_list().add_1(markers::LOADED));
    }
}

pub fn install(page: &Page) -> Result<()> {
    if page.motion.is_reduced() {
        if let Some(root) = page.document.document_element() {
            root.class_list().add_1(markers::REDUCED_MOTION)?;
        }
    }

    // The module can finish loading after the window did.
    if page.document.ready_state() == "complete" {
        mark_loaded(&page.document);
        return Ok(());
    }

    let document = page.document.clone();
    dom::listen(&page.window, "load", move |_: Event| mark_loaded(&document))?;
    Ok(())
}
