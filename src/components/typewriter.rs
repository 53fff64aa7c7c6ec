use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_sys::{Document, Element};

use crate::dom;
use crate::error::{MotionError, Result};
use crate::markers;
use crate::motion::MotionPreference;
use crate::timers::Timers;
use crate::Page;

/// Where typed characters go.
pub trait TextSink {
    fn clear(&self);
    fn push(&self, ch: char);
    fn set(&self, text: &str);
}

struct Typing {
    sink: Rc<dyn TextSink>,
    chars: Vec<char>,
    next: Cell<usize>,
    speed_ms: u32,
    timers: Rc<dyn Timers>,
    on_complete: Cell<Option<Box<dyn FnOnce()>>>,
}

/// Types `text` into `sink` one character every `speed_ms`, then calls
/// `on_complete`. With reduced motion the text appears at once.
///
/// Calling it again on the same sink restarts from an empty text.
pub fn type_text(
    sink: Rc<dyn TextSink>,
    text: &str,
    speed_ms: u32,
    motion: MotionPreference,
    timers: Rc<dyn Timers>,
    on_complete: Box<dyn FnOnce()>,
) {
    if motion.is_reduced() {
        sink.set(text);
        on_complete();
        return;
    }

    sink.clear();
    tick(Rc::new(Typing {
        sink,
        chars: text.chars().collect(),
        next: Cell::new(0),
        speed_ms,
        timers,
        on_complete: Cell::new(Some(on_complete)),
    }));
}

fn tick(typing: Rc<Typing>) {
    let index = typing.next.get();
    match typing.chars.get(index) {
        Some(&ch) => {
            typing.sink.push(ch);
            typing.next.set(index + 1);
            let again = Rc::clone(&typing);
            typing
                .timers
                .after(typing.speed_ms, Box::new(move || tick(again)));
        }
        None => {
            if let Some(done) = typing.on_complete.take() {
                done();
            }
        }
    }
}

/// The attribute value to type, exactly as written. Blank values count as
/// missing.
pub fn source_text(attribute: Option<String>) -> Option<String> {
    attribute.filter(|text| !text.trim().is_empty())
}

/// A span mounted inside the typewriter element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub class: &'static str,
    /// Starts with the whole source text instead of being typed into.
    pub full_text: bool,
    pub aria_hidden: bool,
}

/// Assistive tech reads the complete line from a visually hidden span. The
/// typed span and the cursor are hidden from it.
pub const PARTS: [Part; 3] = [
    Part {
        class: markers::VISUALLY_HIDDEN,
        full_text: true,
        aria_hidden: false,
    },
    Part {
        class: markers::TYPEWRITER_TEXT,
        full_text: false,
        aria_hidden: true,
    },
    Part {
        class: markers::TYPEWRITER_CURSOR,
        full_text: false,
        aria_hidden: true,
    },
];

struct ElementSink {
    text: Element,
    buffer: RefCell<String>,
}

impl ElementSink {
    fn mount(document: &Document, host: &Element, source: &str) -> Result<Self> {
        host.set_text_content(None);
        let mut typed = None;
        for part in PARTS {
            let span = document.create_element("span")?;
            span.set_class_name(part.class);
            if part.aria_hidden {
                span.set_attribute("aria-hidden", "true")?;
            }
            if part.full_text {
                span.set_text_content(Some(source));
            }
            host.append_child(&span)?;
            if part.class == markers::TYPEWRITER_TEXT {
                typed = Some(span);
            }
        }

        let text = typed.ok_or(MotionError::MissingTarget(markers::TYPEWRITER_TEXT))?;
        Ok(Self {
            text,
            buffer: RefCell::new(String::new()),
        })
    }

    fn flush(&self) {
        let buffer = self.buffer.borrow();
        self.text.set_text_content(Some(buffer.as_str()));
    }
}

impl TextSink for ElementSink {
    fn clear(&self) {
        self.buffer.borrow_mut().clear();
        self.flush();
    }

    fn push(&self, ch: char) {
        self.buffer.borrow_mut().push(ch);
        self.flush();
    }

    fn set(&self, text: &str) {
        *self.buffer.borrow_mut() = text.to_string();
        self.flush();
    }
}

pub fn install(page: &Page) -> Result<()> {
    let host = dom::require(&page.document, markers::TYPEWRITER)?;
    let text = source_text(host.get_attribute(markers::TYPEWRITER_ATTR))
        .ok_or(MotionError::MissingTarget(markers::TYPEWRITER_ATTR))?;

    let sink = Rc::new(ElementSink::mount(&page.document, &host, &text)?);

    let done = host.clone();
    type_text(
        sink,
        &text,
        page.config.typewriter_speed_ms,
        page.motion,
        Rc::clone(&page.timers),
        Box::new(move || {
            dom::logged("typewriter is-complete", done.class_list().add_1(markers::COMPLETE));
        }),
    );
    Ok(())
}
