// Carousel windowing: page slicing, cyclic advance, and slide-transition metadata.
// Rule: the first list item belongs to the hero banner and never appears in a row.
// See DESIGN.md: Carousel Windowing

use serde::{Deserialize, Serialize};

use crate::types::Entity;

/// Current page of a carousel row and whether a slide is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WindowState {
    pub page_index: usize,
    pub is_transitioning: bool,
}

/// Last page index reachable by `advance` before wrapping to 0.
///
/// `floor((item_count - 1) / page_size) - 1`, floored at 0. Items past the
/// last full page are never shown; that matches the listing pages' behavior.
pub fn max_page_index(item_count: usize, page_size: usize) -> usize {
    if item_count <= 1 {
        return 0;
    }
    (item_count - 1)
        .checked_div(page_size)
        .unwrap_or(0)
        .saturating_sub(1)
}

/// Begin a slide to the next page, wrapping after the last one.
///
/// No-op while a slide is already in flight or when there is nothing to show.
pub fn advance(state: WindowState, item_count: usize, page_size: usize) -> WindowState {
    if state.is_transitioning || item_count == 0 {
        return state;
    }

    let max_index = max_page_index(item_count, page_size);
    let page_index = if state.page_index >= max_index {
        0
    } else {
        state.page_index + 1
    };

    WindowState {
        page_index,
        is_transitioning: true,
    }
}

/// Mark the exit animation as finished.
pub fn complete_transition(state: WindowState) -> WindowState {
    WindowState {
        is_transitioning: false,
        ..state
    }
}

/// Items visible on `page_index`, skipping the hero item at index 0.
pub fn window_slice(items: &[Entity], page_index: usize, page_size: usize) -> &[Entity] {
    let rest = items.get(1..).unwrap_or(&[]);
    let start = page_size.saturating_mul(page_index).min(rest.len());
    let end = start.saturating_add(page_size).min(rest.len());
    &rest[start..end]
}

/// Item rendered in the banner above the rows.
pub fn hero(items: &[Entity]) -> Option<&Entity> {
    items.first()
}

/// Horizontal offsets (pixels) for one row slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideMotion {
    /// Where the incoming page starts (off-screen right).
    pub enter_from_x: f64,
    /// Resting position of the visible page.
    pub rest_x: f64,
    /// Where the outgoing page ends (off-screen left).
    pub exit_to_x: f64,
    pub duration_ms: u32,
}

impl SlideMotion {
    /// Offsets derived from the viewport width at the moment the slide begins.
    pub fn from_viewport(viewport_width: f64, inset: f64, duration_ms: u32) -> Self {
        let travel = viewport_width - inset;
        SlideMotion {
            enter_from_x: travel,
            rest_x: 0.0,
            exit_to_x: -travel,
            duration_ms,
        }
    }
}

/// Stateful carousel row: window state plus the motion of the current slide.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    state: WindowState,
    motion: Option<SlideMotion>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn motion(&self) -> Option<SlideMotion> {
        self.motion
    }

    /// Back to the first page, no slide in flight. Used when the list is replaced.
    pub fn reset(&mut self) {
        self.state = WindowState::default();
        self.motion = None;
    }

    /// Advance one page and return the slide to animate, if any.
    ///
    /// When the row stays on the same page the host never sees a page
    /// change, so no exit animation fires; the transition completes here.
    pub fn advance(
        &mut self,
        item_count: usize,
        page_size: usize,
        viewport_width: f64,
        inset: f64,
        duration_ms: u32,
    ) -> Option<SlideMotion> {
        let next = advance(self.state, item_count, page_size);
        if next == self.state {
            return None;
        }

        if next.page_index == self.state.page_index {
            self.state = complete_transition(next);
            self.motion = None;
            return None;
        }

        let motion = SlideMotion::from_viewport(viewport_width, inset, duration_ms);
        self.state = next;
        self.motion = Some(motion);
        Some(motion)
    }

    pub fn complete_transition(&mut self) {
        self.state = complete_transition(self.state);
        self.motion = None;
    }

    pub fn visible<'a>(&self, items: &'a [Entity], page_size: usize) -> &'a [Entity] {
        window_slice(items, self.state.page_index, page_size)
    }
}
