//! Attribute selectors and class names shared with the page markup and stylesheet.

pub const HEADER: &str = "[data-header]";
pub const NAV: &str = "[data-nav]";
pub const NAV_TOGGLE: &str = "[data-nav-toggle]";
pub const REVEAL: &str = "[data-reveal]";
pub const REVEAL_ATTR: &str = "data-reveal";
pub const TYPEWRITER: &str = "[data-typewriter]";
pub const TYPEWRITER_ATTR: &str = "data-typewriter";
pub const AMBIENT_LINES: &str = "[data-ambient-lines]";
pub const SCROLL_TOP: &str = "[data-scroll-top]";
pub const FAQ_QUESTION: &str = "[data-faq-question]";
pub const MAIN: &str = "[data-main]";
pub const IN_PAGE_ANCHOR: &str = "a[href^=\"#\"]";
pub const CONFIG_SCRIPT_ID: &str = "motion-config";

// Classes written by the components.
pub const REVEAL_HIDDEN: &str = "reveal";
pub const VISIBLE: &str = "is-visible";
pub const SCROLLED: &str = "is-scrolled";
pub const COMPLETE: &str = "is-complete";
pub const LOADED: &str = "is-loaded";
pub const NAV_OPEN: &str = "nav-open";
pub const REDUCED_MOTION: &str = "reduced-motion";
pub const AMBIENT_LINE: &str = "ambient-line";
pub const TYPEWRITER_TEXT: &str = "typewriter-text";
pub const TYPEWRITER_CURSOR: &str = "typewriter-cursor";
pub const VISUALLY_HIDDEN: &str = "visually-hidden";

pub const PARALLAX_PROPERTY: &str = "--parallax-offset";
