use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, NodeList};

use crate::error::{MotionError, Result};

pub fn query(document: &Document, selector: &'static str) -> Result<Option<Element>> {
    Ok(document.query_selector(selector)?)
}

pub fn require(document: &Document, selector: &'static str) -> Result<Element> {
    query(document, selector)?.ok_or(MotionError::MissingTarget(selector))
}

pub fn query_all(document: &Document, selector: &'static str) -> Result<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub fn query_all_in(parent: &Element, selector: &'static str) -> Result<Vec<Element>> {
    Ok(elements(parent.query_selector_all(selector)?))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// For writes inside event handlers, where there is nobody to return an error
/// to. Failures are logged and the handler carries on.
pub fn logged<T, E>(context: &str, result: std::result::Result<T, E>) -> Option<T>
where
    E: Into<MotionError>,
{
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!("{} failed: {}", context, err.into());
            None
        }
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) -> Result<()> {
    element.class_list().toggle_with_force(class, on)?;
    Ok(())
}

pub fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

/// Attaches a page-lifetime listener. Events that are not an `E` are ignored.
pub fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static) -> Result<()>
where
    E: JsCast + 'static,
{
    let closure = wrap(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but tells the browser the handler never calls `preventDefault`.
pub fn listen_passive<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<()>
where
    E: JsCast + 'static,
{
    let closure = wrap(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn wrap<E>(mut handler: impl FnMut(E) + 'static) -> Closure<dyn FnMut(web_sys::Event)>
where
    E: JsCast + 'static,
{
    Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(web_sys::Event)>)
}
