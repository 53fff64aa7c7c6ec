use log::warn;
use serde::Deserialize;
use web_sys::Document;

use crate::error::{MotionError, Result};
use crate::markers;

/// Thresholds and timings for every effect on the page.
///
/// Pages can override any subset of fields with a JSON block:
///
/// ```html
/// <script type="application/json" id="motion-config">{ "scrollTopThreshold": 800 }</script>
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    /// Gap kept between the fixed header and an anchor target, in px.
    pub anchor_padding: f64,
    pub header_scrolled_threshold: f64,
    pub scroll_top_threshold: f64,
    pub parallax_coefficient: f64,
    pub scroll_throttle_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub reveal_stagger_ms: u32,
    pub reveal_max_delay_ms: u32,
    pub typewriter_speed_ms: u32,
    pub ambient_interval_ms: u32,
    pub ambient_duration_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            anchor_padding: 12.0,
            header_scrolled_threshold: 16.0,
            scroll_top_threshold: 500.0,
            parallax_coefficient: 0.12,
            scroll_throttle_ms: 100,
            reveal_threshold: 0.15,
            reveal_root_margin: "0px 0px -40px 0px".to_string(),
            reveal_stagger_ms: 80,
            reveal_max_delay_ms: 480,
            typewriter_speed_ms: 45,
            ambient_interval_ms: 2200,
            ambient_duration_ms: 5000,
        }
    }
}

impl MotionConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str::<Self>(raw)
            .map(Self::validated)
            .map_err(|e| MotionError::Config(e.to_string()))
    }

    /// Reads the page's `#motion-config` block. A missing block means defaults;
    /// a broken one is reported and ignored.
    pub fn from_document(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(markers::CONFIG_SCRIPT_ID)
            .and_then(|script| script.text_content())
            .unwrap_or_default();

        if raw.trim().is_empty() {
            return Self::default();
        }

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}, falling back to defaults", err);
                Self::default()
            }
        }
    }

    /// Replaces values no effect can work with.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        self.anchor_padding = finite_or(self.anchor_padding, defaults.anchor_padding).max(0.0);
        self.header_scrolled_threshold =
            finite_or(self.header_scrolled_threshold, defaults.header_scrolled_threshold).max(0.0);
        self.scroll_top_threshold =
            finite_or(self.scroll_top_threshold, defaults.scroll_top_threshold).max(0.0);
        self.parallax_coefficient =
            finite_or(self.parallax_coefficient, defaults.parallax_coefficient);
        self.reveal_threshold =
            finite_or(self.reveal_threshold, defaults.reveal_threshold).clamp(0.0, 1.0);
        if self.reveal_root_margin.trim().is_empty() {
            self.reveal_root_margin = defaults.reveal_root_margin;
        }

        self.scroll_throttle_ms = self.scroll_throttle_ms.max(1);
        self.typewriter_speed_ms = self.typewriter_speed_ms.max(1);
        self.ambient_interval_ms = self.ambient_interval_ms.max(1);
        self.ambient_duration_ms = self.ambient_duration_ms.max(1);
        self
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
