use serde::{Deserialize, Serialize};

/// A width and height in points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp negative or NaN dimensions to zero.
    pub fn sanitized(self) -> Self {
        let clamp = |v: f64| if v.is_nan() || v < 0.0 { 0.0 } else { v };
        Self { width: clamp(self.width), height: clamp(self.height) }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self { width: self.width * factor, height: self.height * factor }
    }
}

/// A point in the local coordinate space of an indicator, origin at the top left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates this point by `degrees` (clockwise on screen) around `origin`.
    pub fn rotated_around(&self, origin: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point::new(origin.x + dx * cos - dy * sin, origin.y + dx * sin + dy * cos)
    }
}

/// Returns the smaller side of the container.
pub fn min_dimension(container: Size) -> f64 {
    let container = container.sanitized();
    container.width.min(container.height)
}

/// Returns the larger side of the container.
pub fn max_dimension(container: Size) -> f64 {
    let container = container.sanitized();
    container.width.max(container.height)
}

const MAX_WRAP_TURNS: f64 = 16.0;

/// Adds `delta` to `current` and wraps the result back into `[0, 360)`.
///
/// Wrapping is done by subtraction: `%` on floats keeps the sign of the
/// dividend and accumulates error on repeated use. Values more than a few
/// turns out are first reduced with `rem_euclid`, since subtracting 360 from
/// them can be a no-op. A non-finite sum leaves `current` unchanged.
pub fn advance_degrees(current: f64, delta: f64) -> f64 {
    let mut value = current + delta;
    if !value.is_finite() {
        return current;
    }
    if value.abs() >= MAX_WRAP_TURNS * 360.0 {
        value = value.rem_euclid(360.0);
    }
    while value >= 360.0 {
        value -= 360.0;
    }
    while value < 0.0 {
        value += 360.0;
    }
    value
}
