use web_sys::{ScrollBehavior, Window};

/// The visitor's motion preference, read once when the page starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub const QUERY: &'static str = "(prefers-reduced-motion: reduce)";

    pub fn from_matches(matches: bool) -> Self {
        if matches {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    /// Browsers without `matchMedia` are treated as having no preference.
    pub fn detect(window: &Window) -> Self {
        match window.match_media(Self::QUERY) {
            Ok(Some(list)) => Self::from_matches(list.matches()),
            _ => MotionPreference::Full,
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }

    pub fn scroll_behavior(self) -> ScrollBehavior {
        match self {
            MotionPreference::Full => ScrollBehavior::Smooth,
            MotionPreference::Reduced => ScrollBehavior::Instant,
        }
    }
}
