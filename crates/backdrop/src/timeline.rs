//! Scroll-linked progress for the roadmap timeline.
//!
//! The timeline's accent line grows from 0% to 100% of its height while the
//! container scrolls between two anchors, and each entry reveals with a
//! delay that grows with its index.

use wasm_bindgen::prelude::*;

/// Pairs a point on the target (0 = top edge, 1 = bottom edge) with a point
/// on the viewport (0 = top, 1 = bottom). The anchor is reached when the two
/// points line up.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Anchor {
    pub target: f64,
    pub viewport: f64,
}

impl Anchor {
    #[must_use]
    pub const fn new(target: f64, viewport: f64) -> Self {
        Self { target, viewport }
    }
}

/// Page geometry in pixels, measured from the top of the document.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Layout {
    pub target_top: f64,
    pub target_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScrollOffsets {
    pub start: Anchor,
    pub end: Anchor,
}

/// Starts when the container top reaches 85% down the viewport, ends when
/// its bottom reaches 20%.
impl Default for ScrollOffsets {
    fn default() -> Self {
        Self {
            start: Anchor::new(0.0, 0.85),
            end: Anchor::new(1.0, 0.2),
        }
    }
}

impl ScrollOffsets {
    /// Scroll position at which `anchor` is satisfied.
    #[must_use]
    pub fn scroll_at(anchor: Anchor, layout: &Layout) -> f64 {
        layout.target_top + anchor.target * layout.target_height
            - anchor.viewport * layout.viewport_height
    }

    /// Progress in `[0, 1]` for a document scroll offset.
    #[must_use]
    pub fn progress(&self, scroll_y: f64, layout: &Layout) -> f64 {
        let start = Self::scroll_at(self.start, layout);
        let end = Self::scroll_at(self.end, layout);
        let span = end - start;
        if span.abs() < f64::EPSILON {
            return if scroll_y >= end { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / span).clamp(0.0, 1.0)
    }
}

/// Map `value` from `input` onto `output`, clamped to the output range.
#[must_use]
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_min, in_max) = input;
    let (out_min, out_max) = output;
    let span = in_max - in_min;
    if span.abs() < f64::EPSILON {
        return out_min;
    }
    let t = ((value - in_min) / span).clamp(0.0, 1.0);
    out_min + (out_max - out_min) * t
}

/// Reveal delay in seconds for the `index`-th entry.
#[must_use]
pub fn stagger_delay(index: usize, base: f64, step: f64) -> f64 {
    base + step * index as f64
}

#[wasm_bindgen(js_name = timelineProgress)]
#[must_use]
pub fn timeline_progress(
    scroll_y: f64,
    target_top: f64,
    target_height: f64,
    viewport_height: f64,
) -> f64 {
    let layout = Layout {
        target_top,
        target_height,
        viewport_height,
    };
    ScrollOffsets::default().progress(scroll_y, &layout)
}

#[wasm_bindgen(js_name = interpolateRange)]
#[must_use]
pub fn interpolate_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    interpolate(value, (in_min, in_max), (out_min, out_max))
}

#[wasm_bindgen(js_name = staggerDelay)]
#[must_use]
pub fn stagger_delay_js(index: u32, base: f64, step: f64) -> f64 {
    stagger_delay(index as usize, base, step)
}
