//! Finger-state → gesture token table.
//!
//! The table is total and its rows are disjoint: every finger combination
//! maps to exactly one token, `None` included.

use std::fmt;

use crate::gesture::domain::finger_state::FingerState;
use crate::presentation::domain::presentation_state::Phase;
use crate::shared::constants::INDEX_FINGER_TIP;
use crate::shared::hand_landmarks::HandLandmarks;
use crate::shared::landmarks::{PixelPoint, Point};

const OPEN_PALM: [bool; 5] = [true, true, true, true, true];
const LAST_THREE: [bool; 5] = [false, false, true, true, true];
const THUMB: [bool; 5] = [true, false, false, false, false];
const PINKY: [bool; 5] = [false, false, false, false, true];
const INDEX_MIDDLE: [bool; 5] = [false, true, true, false, false];
const INDEX: [bool; 5] = [false, true, false, false, false];
const INDEX_MIDDLE_RING: [bool; 5] = [false, true, true, true, false];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureToken {
    None,
    Start,
    End,
    Prev,
    Next,
    Point,
    Draw,
    EraseLast,
}

impl GestureToken {
    /// Discrete tokens mutate state once per physical gesture and go through
    /// the debounce gate. `Point` and `Draw` are continuous.
    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            GestureToken::Start
                | GestureToken::End
                | GestureToken::Prev
                | GestureToken::Next
                | GestureToken::EraseLast
        )
    }
}

impl fmt::Display for GestureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureToken::None => "none",
            GestureToken::Start => "start",
            GestureToken::End => "end",
            GestureToken::Prev => "prev",
            GestureToken::Next => "next",
            GestureToken::Point => "point",
            GestureToken::Draw => "draw",
            GestureToken::EraseLast => "erase-last",
        };
        f.write_str(name)
    }
}

/// Screen region that enables slide navigation: right of `min_x` and above
/// `max_y`, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavHotZone {
    pub min_x: f64,
    pub max_y: f64,
}

impl NavHotZone {
    pub fn new(min_x: f64, max_y: f64) -> Self {
        Self { min_x, max_y }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x > self.min_x && p.y < self.max_y
    }
}

/// Maps a reduced camera motion range onto the full output resolution so
/// small hand movements cover the whole slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorMapper {
    width: u32,
    height: u32,
    x_range: [f64; 2],
    y_range: [f64; 2],
}

impl CursorMapper {
    pub fn new(width: u32, height: u32, x_range: [f64; 2], y_range: [f64; 2]) -> Self {
        Self {
            width,
            height,
            x_range,
            y_range,
        }
    }

    /// `p` in camera pixels → output pixels, clamped at the range ends.
    pub fn map(&self, p: Point) -> PixelPoint {
        PixelPoint::new(
            interp(p.x, self.x_range, self.width as f64) as i32,
            interp(p.y, self.y_range, self.height as f64) as i32,
        )
    }
}

fn interp(v: f64, [lo, hi]: [f64; 2], out: f64) -> f64 {
    if v <= lo {
        return 0.0;
    }
    if v >= hi {
        return out;
    }
    (v - lo) / (hi - lo) * out
}

/// Everything the presentation loop needs from one detected hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    pub fingers: FingerState,
    /// Hand bounding-box center in camera pixels, tested against the hot-zone.
    pub center: Point,
    /// Remapped index fingertip in output pixels.
    pub cursor: PixelPoint,
}

impl HandReading {
    pub fn from_hand(hand: &HandLandmarks, mapper: &CursorMapper, width: u32, height: u32) -> Self {
        let tip = hand.point(INDEX_FINGER_TIP);
        let tip_px = Point::new(tip.x * width as f64, tip.y * height as f64);
        Self {
            fingers: FingerState::from_hand(hand),
            center: hand.pixel_center(width, height),
            cursor: mapper.map(tip_px),
        }
    }
}

/// Frame state the navigation preconditions depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureContext {
    pub phase: Phase,
    pub in_hot_zone: bool,
    pub slide_index: usize,
    pub slide_count: usize,
}

pub fn classify(fingers: FingerState, ctx: &GestureContext) -> GestureToken {
    match (ctx.phase, fingers.fingers()) {
        (Phase::NotStarted, OPEN_PALM) => GestureToken::Start,
        (Phase::NotStarted, _) => GestureToken::None,
        (Phase::Running, LAST_THREE) => GestureToken::End,
        (Phase::Running, THUMB) if ctx.in_hot_zone && ctx.slide_index > 0 => GestureToken::Prev,
        (Phase::Running, PINKY) if ctx.in_hot_zone && ctx.slide_index + 1 < ctx.slide_count => {
            GestureToken::Next
        }
        (Phase::Running, INDEX_MIDDLE) => GestureToken::Point,
        (Phase::Running, INDEX) => GestureToken::Draw,
        (Phase::Running, INDEX_MIDDLE_RING) => GestureToken::EraseLast,
        (Phase::Running, _) => GestureToken::None,
    }
}
