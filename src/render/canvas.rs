use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::indicators::DrawCommand;
use itertools::iproduct;
use std::ops::Range;

/// A rectangle of canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// An opaque pixel buffer draw commands are rasterized into.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let background = background.over(Color::BLACK);
        Self { width, height, background, pixels: vec![background; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Rasterizes `commands`, laid out in a box of `size` points, with the
    /// box's top left corner at pixel `(x, y)` and `scale` pixels per point.
    ///
    /// Each pixel takes a single sample at its center; commands are composited
    /// in order.
    pub fn paint(&mut self, commands: &[DrawCommand], x: usize, y: usize, size: Size, scale: f64) {
        let clip = Region { x, y, width: self.width.saturating_sub(x), height: self.height.saturating_sub(y) };
        self.fill(commands, (x as f64, y as f64), size, scale, clip);
    }

    /// Rasterizes `commands` laid out in a box of `size` points centered in
    /// `region`. Nothing outside the region is touched, even when the box is
    /// larger than it.
    pub fn paint_centered(&mut self, commands: &[DrawCommand], region: Region, size: Size, scale: f64) {
        let scaled = size.sanitized().scaled(scale.max(0.0));
        let left = region.x as f64 + ((region.width as f64 - scaled.width) / 2.0).round();
        let top = region.y as f64 + ((region.height as f64 - scaled.height) / 2.0).round();
        self.fill(commands, (left, top), size, scale, region);
    }

    fn fill(&mut self, commands: &[DrawCommand], origin: (f64, f64), size: Size, scale: f64, clip: Region) {
        if commands.is_empty() || !(scale > 0.0) {
            return;
        }
        let size = size.sanitized().scaled(scale);
        let (left, top) = origin;
        let clip_width = clip.width.min(self.width.saturating_sub(clip.x));
        let clip_height = clip.height.min(self.height.saturating_sub(clip.y));
        let columns = pixel_span(left, size.width, clip.x, clip_width);
        let rows = pixel_span(top, size.height, clip.y, clip_height);
        for (row, column) in iproduct!(rows, columns) {
            let point = Point::new((column as f64 + 0.5 - left) / scale, (row as f64 + 0.5 - top) / scale);
            let index = row * self.width + column;
            let mut pixel = self.pixels[index];
            for command in commands {
                if let Some(color) = command.sample(point) {
                    pixel = color.over(pixel);
                }
            }
            self.pixels[index] = pixel;
        }
    }

    /// Pairs of rows, top and bottom, as shown by one terminal cell row.
    pub fn row_pairs(&self) -> impl Iterator<Item = (&[Color], Option<&[Color]>)> {
        let mut rows = self.pixels.chunks(self.width.max(1)).take(self.height);
        std::iter::from_fn(move || {
            let top = rows.next()?;
            Some((top, rows.next()))
        })
    }
}

/// The pixels covered by `length` starting at `start`, limited to the clip span.
fn pixel_span(start: f64, length: f64, clip_start: usize, clip_length: usize) -> Range<usize> {
    let first = start.floor().max(clip_start as f64) as usize;
    let end = ((start + length).ceil().max(0.0) as usize).min(clip_start + clip_length);
    first..end
}
