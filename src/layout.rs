//! Stage geometry, hit-testing, and connector styling.
//!
//! Every stage's on-screen region is a pure function of its ordinal
//! position, so regions are never stored: they are recomputed on demand
//! and can never drift from the pipeline's current length or order.

/// Width of a stage rectangle, in pixels.
pub const STAGE_WIDTH: f32 = 50.0;
/// Horizontal offset of the first stage from the canvas origin.
pub const STAGE_OFFSET: f32 = 100.0;
/// Top edge shared by all stage rectangles.
pub const STAGE_MIN_Y: f32 = 100.0;
/// Height of a stage rectangle.
pub const STAGE_HEIGHT: f32 = 250.0;

/// The screen region of one stage: its body rectangle plus the X
/// coordinate where its outgoing connectors terminate (the left edge
/// of the next stage).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageRegion {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
    /// Left edge of the next stage; connectors run from `max_x()` to here.
    pub sink_min_x: f32,
}

impl StageRegion {
    pub fn max_x(&self) -> f32 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.min_y + self.height
    }

    /// Inclusive point-in-rect test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x() && y >= self.min_y && y <= self.max_y()
    }
}

/// Compute the region for the stage at `position`.
///
/// Identical for every tool kind so that stages line up visually
/// regardless of type.
pub fn region_for(position: usize) -> StageRegion {
    StageRegion {
        min_x: position as f32 * STAGE_WIDTH * 4.0 + STAGE_OFFSET,
        min_y: STAGE_MIN_Y,
        width: STAGE_WIDTH,
        height: STAGE_HEIGHT,
        sink_min_x: (position as f32 + 1.0) * STAGE_WIDTH * 4.0 + STAGE_OFFSET,
    }
}

/// Test whether `(x, y)` falls inside the stage at `position`.
pub fn is_inside(position: usize, x: f32, y: f32) -> bool {
    region_for(position).contains(x, y)
}

/// Vertical spacing between consecutive connector lines for a stage
/// producing `line_count` output lines.
pub fn output_spacing(line_count: usize) -> f32 {
    if line_count == 0 {
        return 0.0;
    }
    (STAGE_HEIGHT / line_count as f32 / 2.0).ceil()
}

/// Y coordinate of the connector for output line `index` (0-based).
pub fn connector_y(index: usize, spacing: f32) -> f32 {
    STAGE_MIN_Y + (index as f32 + 1.0) * spacing
}

/// Grayscale connector color derived from a line's text.
///
/// Each character contributes `min(10 * (code - 'a'), 255)`, clamped to
/// zero for characters before `'a'`; the ceiling of the average over
/// all characters is formatted as unpadded lowercase hex and repeated
/// three times. Empty lines are black. Purely cosmetic, but a pure
/// function of the text so re-renders are stable.
pub fn line_color(line: &str) -> String {
    if line.is_empty() {
        return "#000000".to_string();
    }
    let mut total: u32 = 0;
    let mut count: u32 = 0;
    for c in line.chars() {
        total += ((c as u32).saturating_sub('a' as u32) * 10).min(255);
        count += 1;
    }
    let avg = total.div_ceil(count);
    let hex = format!("{avg:x}");
    format!("#{hex}{hex}{hex}")
}
