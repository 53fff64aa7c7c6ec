use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element, MouseEvent};

use crate::dom;
use crate::error::{MotionError, Result};
use crate::markers;
use crate::Page;

/// One question/answer pair. Pairs never affect each other, so any number
/// can be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaqItem {
    expanded: bool,
}

impl FaqItem {
    pub fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    /// Reads the state the markup starts with.
    pub fn from_aria(aria_expanded: Option<&str>) -> Self {
        Self::new(aria_expanded == Some("true"))
    }

    pub fn is_expanded(self) -> bool {
        self.expanded
    }

    pub fn toggled(self) -> Self {
        Self::new(!self.expanded)
    }
}

/// DOM access a question/answer pair needs.
pub trait FaqDom {
    type Node: Clone;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
    fn set_expanded(&self, question: &Self::Node, expanded: bool);
    fn set_hidden(&self, answer: &Self::Node, hidden: bool);
}

pub struct FaqPair<N> {
    question: N,
    answer: N,
}

impl<N: Clone> FaqPair<N> {
    /// The answer is the element named by `aria-controls`, or the question's
    /// next sibling when that is absent or dangling.
    pub fn locate<D>(dom: &D, question: N) -> Option<Self>
    where
        D: FaqDom<Node = N>,
    {
        let answer = dom
            .attribute(&question, "aria-controls")
            .and_then(|id| dom.by_id(&id))
            .or_else(|| dom.next_sibling(&question))?;
        Some(Self { question, answer })
    }

    pub fn initial<D>(&self, dom: &D) -> FaqItem
    where
        D: FaqDom<Node = N>,
    {
        FaqItem::from_aria(dom.attribute(&self.question, "aria-expanded").as_deref())
    }

    pub fn render<D>(&self, dom: &D, item: FaqItem)
    where
        D: FaqDom<Node = N>,
    {
        dom.set_expanded(&self.question, item.is_expanded());
        dom.set_hidden(&self.answer, !item.is_expanded());
    }

    pub fn toggle<D>(&self, dom: &D, state: &Cell<FaqItem>)
    where
        D: FaqDom<Node = N>,
    {
        let next = state.get().toggled();
        state.set(next);
        self.render(dom, next);
    }
}

struct PageFaq {
    document: Document,
}

impl FaqDom for PageFaq {
    type Node = Element;

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn set_expanded(&self, question: &Element, expanded: bool) {
        let value = if expanded { "true" } else { "false" };
        dom::logged("faq aria-expanded", question.set_attribute("aria-expanded", value));
    }

    fn set_hidden(&self, answer: &Element, hidden: bool) {
        dom::logged(
            "faq answer hidden",
            answer.toggle_attribute_with_force("hidden", hidden),
        );
    }
}

pub fn install(page: &Page) -> Result<()> {
    let questions = dom::query_all(&page.document, markers::FAQ_QUESTION)?;
    if questions.is_empty() {
        return Err(MotionError::MissingTarget(markers::FAQ_QUESTION));
    }

    let faq = Rc::new(PageFaq {
        document: page.document.clone(),
    });
    for question in questions {
        let Some(pair) = FaqPair::locate(&*faq, question) else {
            continue;
        };
        let item = pair.initial(&*faq);
        pair.render(&*faq, item);

        let state = Cell::new(item);
        let target = pair.question.clone();
        let faq = Rc::clone(&faq);
        dom::listen(&target, "click", move |event: MouseEvent| {
            event.prevent_default();
            pair.toggle(&*faq, &state);
        })?;
    }

    Ok(())
}
