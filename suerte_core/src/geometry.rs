//! Wheel geometry: segment layout and the pointer-relative winner mapping.
//!
//! The pointer sits at the top of the wheel and the wheel turns clockwise
//! under it. Segments are laid out clockwise from the top in a 200×200 box.

use crate::rng::RandomSource;

pub const PALETTE: [&str; 8] = [
    "#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

const CENTER: f64 = 100.0;
const RADIUS: f64 = 100.0;
const CAPTION_RADIUS: f64 = 60.0;
const CAPTION_CHARS: usize = 12;

pub fn segment_angle(n: usize) -> f64 {
    360.0 / n as f64
}

pub fn segment_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Index of the segment under the pointer once the wheel rests at `rotation` degrees.
///
/// `floor(((360 - (θ mod 360) + 90) mod 360) / (360 / n))`
pub fn winner_index(rotation: f64, n: usize) -> usize {
    assert!(n > 0, "wheel without segments");
    let normalized = rotation.rem_euclid(360.0);
    let under_pointer = (360.0 - normalized + 90.0).rem_euclid(360.0);
    let idx = (under_pointer / segment_angle(n)).floor() as usize;
    idx.min(n - 1)
}

/// Next resting angle: whole turns plus a random offset, added to the current one.
pub fn spin_target(current: f64, min_turns: f64, extra_turns: f64, rng: &mut dyn RandomSource) -> f64 {
    let turns = min_turns + rng.next_f64() * extra_turns;
    let offset = rng.next_f64() * 360.0;
    current + turns * 360.0 + offset
}

fn polar(angle_deg: f64, radius: f64) -> (f64, f64) {
    let rad = (angle_deg - 90.0).to_radians();
    (CENTER + radius * rad.cos(), CENTER + radius * rad.sin())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
    pub color: &'static str,
}

impl Segment {
    pub fn new(index: usize, n: usize) -> Self {
        let step = segment_angle(n);
        Self {
            index,
            start_deg: step * index as f64,
            end_deg: step * (index + 1) as f64,
            color: segment_color(index),
        }
    }

    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    /// SVG wedge path from the center.
    pub fn svg_path(&self) -> String {
        let (x1, y1) = polar(self.start_deg, RADIUS);
        let (x2, y2) = polar(self.end_deg, RADIUS);
        let large_arc = u8::from(self.end_deg - self.start_deg > 180.0);
        format!(
            "M {CENTER} {CENTER} L {x1:.3} {y1:.3} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2:.3} {y2:.3} Z"
        )
    }

    pub fn caption_pos(&self) -> (f64, f64) {
        polar(self.mid_deg(), CAPTION_RADIUS)
    }
}

pub fn segments(n: usize) -> impl Iterator<Item = Segment> {
    (0..n).map(move |i| Segment::new(i, n))
}

/// Label as drawn on a segment.
pub fn caption(label: &str) -> String {
    if label.chars().count() > CAPTION_CHARS {
        let head: String = label.chars().take(CAPTION_CHARS).collect();
        format!("{head}...")
    } else {
        label.to_string()
    }
}
