//! Pure geometry helpers for note placement.
//!
//! # Responsibility
//! - Compute incremental pointer deltas for drag gestures.
//! - Clamp note positions to the board surface rectangle.
//! - Encode/decode `"{n}px"` pixel strings used by persisted records.
//!
//! # Invariants
//! - Clamping never panics, even when a note is larger than the surface.
//!   In that case the lower bound wins.
//! - Functions here are side-effect free.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static PX_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*(?:px)?\s*$").expect("valid px regex")
});

/// Pointer coordinate in surface client space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Note offset from the surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// Position of a note created by a pointer gesture at `point`.
    pub fn at_pointer(point: Point) -> Self {
        Self {
            top: point.y,
            left: point.x,
        }
    }
}

/// Rendered note box dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Size {
    pub height: f64,
    pub width: f64,
}

impl Size {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    /// Returns whether both dimensions are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.height.is_finite() && self.width.is_finite() && self.height >= 0.0 && self.width >= 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            height: DEFAULT_NOTE_EDGE_PX,
            width: DEFAULT_NOTE_EDGE_PX,
        }
    }
}

/// Default note edge length in pixels.
pub const DEFAULT_NOTE_EDGE_PX: f64 = 300.0;

/// Movement between two consecutive pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

/// Client rectangle of the board surface that contains notes.
///
/// `top_inset` reserves a band at the top (board header) that notes may not
/// be dragged into.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub top_inset: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top_inset: 0.0,
        }
    }

    pub fn with_top_inset(mut self, top_inset: f64) -> Self {
        self.top_inset = top_inset;
        self
    }
}

/// Returns the delta from the last recorded pointer to the current one.
///
/// Drag deltas are incremental: callers must record `current` as the new
/// `last` after applying the delta.
pub fn pointer_delta(last: Point, current: Point) -> Delta {
    Delta {
        dx: current.x - last.x,
        dy: current.y - last.y,
    }
}

/// Applies a pointer delta to a note position.
pub fn apply_delta(position: Position, delta: Delta) -> Position {
    Position {
        top: position.top + delta.dy,
        left: position.left + delta.dx,
    }
}

/// Clamps `position` so a box of `size` stays within `surface`.
///
/// Horizontal range is `[0, width - note_width]`, vertical range is
/// `[top_inset, height - note_height]`.
pub fn clamp_to_surface(position: Position, size: Size, surface: Surface) -> Position {
    Position {
        top: bounded(position.top, surface.top_inset, surface.height - size.height),
        left: bounded(position.left, 0.0, surface.width - size.width),
    }
}

// Not `f64::clamp`: that panics when `upper < lower`.
fn bounded(value: f64, lower: f64, upper: f64) -> f64 {
    value.min(upper).max(lower)
}

/// Formats a pixel value the way persisted records store it (`"300px"`).
pub fn format_px(value: f64) -> String {
    format!("{value}px")
}

/// Parses a persisted pixel string. A bare number without `px` is accepted.
///
/// Returns `None` for empty or malformed values.
pub fn parse_px(value: &str) -> Option<f64> {
    let caps = PX_VALUE_RE.captures(value)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}
