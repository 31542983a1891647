use super::canvas::{Canvas, Region};
use crate::color::Color;
use crate::geometry::Size;
use crate::indicators::DrawCommand;

/// Slots are never larger than this many pixels per side.
const MAX_SLOT_PIXELS: usize = 1024;

/// Lays indicators out left to right, each centered in an equal slot, wrapping
/// onto further rows when a width limit is given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    /// Space offered to each indicator, in points.
    pub slot: Size,
    /// Pixels per point.
    pub scale: f64,
    /// Gap between slots and between rows of slots, in pixels.
    pub gap: usize,
    pub background: Color,
}

impl Stage {
    fn slot_pixels(&self) -> (usize, usize) {
        let slot = self.slot.sanitized().scaled(self.scale.max(0.0));
        let side = |pixels: f64| (pixels.ceil() as usize).min(MAX_SLOT_PIXELS);
        (side(slot.width), side(slot.height))
    }

    /// How many slots fit side by side in `max_width` pixels. Always at least one.
    pub fn slots_per_row(&self, max_width: usize) -> usize {
        let (slot_width, _) = self.slot_pixels();
        let stride = slot_width.saturating_add(self.gap).max(1);
        (max_width.saturating_add(self.gap) / stride).max(1)
    }

    /// Rasterizes each `(size, commands)` pair into its slot, all in one row.
    pub fn compose(&self, frames: &[(Size, Vec<DrawCommand>)]) -> Canvas {
        self.compose_within(frames, usize::MAX)
    }

    /// Rasterizes each `(size, commands)` pair into its slot, starting a new
    /// row whenever the next slot would make the canvas wider than `max_width`.
    ///
    /// Indicators are clipped to their slot. A single slot wider than
    /// `max_width` is cut at the canvas edge.
    pub fn compose_within(&self, frames: &[(Size, Vec<DrawCommand>)], max_width: usize) -> Canvas {
        let (slot_width, slot_height) = self.slot_pixels();
        let columns = self.slots_per_row(max_width).min(frames.len());
        let rows = frames.len().div_ceil(columns.max(1)).max(1);
        let span = |slot: usize, count: usize| slot * count + self.gap * count.saturating_sub(1);
        let width = span(slot_width, columns).clamp(1, max_width.max(1));
        let mut canvas = Canvas::new(width, span(slot_height, rows).max(1), self.background);
        for (index, (size, commands)) in frames.iter().enumerate() {
            let region = Region {
                x: (index % columns) * (slot_width + self.gap),
                y: (index / columns) * (slot_height + self.gap),
                width: slot_width,
                height: slot_height,
            };
            canvas.paint_centered(commands, region, *size, self.scale);
        }
        canvas
    }
}
