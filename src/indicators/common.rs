use super::IndicatorKind;
use crate::color::Color;
use crate::geometry::{Point, Size};
use std::time::Duration;

/// A primitive shape in the indicator's local coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { center: Point, radius: f64 },
    /// The area between two concentric circles.
    Ring { center: Point, inner_radius: f64, outer_radius: f64 },
    /// An axis aligned rectangle before the command's transform is applied.
    Rect { center: Point, size: Size },
}

impl Shape {
    /// Whether `point` lies inside the shape.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            Self::Circle { center, radius } => point.distance_to(center) <= radius,
            Self::Ring { center, inner_radius, outer_radius } => {
                let distance = point.distance_to(center);
                distance >= inner_radius && distance <= outer_radius
            }
            Self::Rect { center, size } => {
                (point.x - center.x).abs() <= size.width / 2.0 && (point.y - center.y).abs() <= size.height / 2.0
            }
        }
    }

    pub fn center(&self) -> Point {
        match *self {
            Self::Circle { center, .. } | Self::Ring { center, .. } | Self::Rect { center, .. } => center,
        }
    }
}

/// How a shape is filled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// A conic gradient around the shape's center. Angles are in degrees,
    /// clockwise from the positive x axis.
    AngularGradient { from: Color, to: Color, start_degrees: f64, end_degrees: f64 },
}

impl Paint {
    /// The paint color at `point` for a shape centered at `center`.
    pub fn color_at(&self, center: Point, point: Point) -> Color {
        match *self {
            Self::Solid(color) => color,
            Self::AngularGradient { from, to, start_degrees, end_degrees } => {
                let span = end_degrees - start_degrees;
                if span <= 0.0 {
                    return to;
                }
                let angle = (point.y - center.y).atan2(point.x - center.x).to_degrees();
                let mut offset = angle - start_degrees;
                while offset < 0.0 {
                    offset += 360.0;
                }
                while offset >= 360.0 {
                    offset -= 360.0;
                }
                from.lerp(to, offset / span)
            }
        }
    }
}

/// Rotation and uniform scale applied around `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub origin: Point,
    pub rotation_degrees: f64,
    pub scale: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self { origin: Point::default(), rotation_degrees: 0.0, scale: 1.0 }
    }

    pub fn rotation(origin: Point, degrees: f64) -> Self {
        Self { origin, rotation_degrees: degrees, scale: 1.0 }
    }

    pub fn scale(origin: Point, scale: f64) -> Self {
        Self { origin, rotation_degrees: 0.0, scale }
    }

    /// Maps a point from the transformed space back into shape space.
    ///
    /// Returns `None` when the transform collapses everything to a point.
    pub fn invert(&self, point: Point) -> Option<Point> {
        if self.scale <= 0.0 {
            return None;
        }
        let unrotated = point.rotated_around(self.origin, -self.rotation_degrees);
        Some(Point::new(
            self.origin.x + (unrotated.x - self.origin.x) / self.scale,
            self.origin.y + (unrotated.y - self.origin.y) / self.scale,
        ))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A single drawing instruction produced by an indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub paint: Paint,
    pub opacity: f64,
    pub transform: Transform,
}

impl DrawCommand {
    /// A solid, opaque, untransformed shape.
    pub fn solid(shape: Shape, color: Color) -> Self {
        Self { shape, paint: Paint::Solid(color), opacity: 1.0, transform: Transform::identity() }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    /// The color this command paints at `point`, if it covers it.
    pub fn sample(&self, point: Point) -> Option<Color> {
        let local = self.transform.invert(point)?;
        if !self.shape.contains(local) {
            return None;
        }
        let color = self.paint.color_at(self.shape.center(), local);
        Some(color.opacity(color.alpha * self.opacity.clamp(0.0, 1.0)))
    }
}

/// The outcome of a single timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickState {
    /// The tick committed a change to the animation state.
    Modified,
    /// Nothing changed.
    Unmodified,
}

/// Contract shared by every activity indicator.
pub trait ActivityIndicator {
    fn kind(&self) -> IndicatorKind;

    /// Whether the indicator is currently animating.
    fn is_animating(&self) -> bool;

    fn set_animating(&mut self, animating: bool);

    /// The foreground color.
    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// The intrinsic size, or `None` when the indicator fills whatever space it is offered.
    fn default_size(&self) -> Option<Size>;

    fn set_default_size(&mut self, size: Option<Size>);

    /// Interval of the indicator's recurring timer.
    fn tick_interval(&self) -> Duration;

    /// Advances the animation state for a timer tick fired at `now`.
    ///
    /// The animating flag is sampled by the host on every tick and passed in.
    fn tick(&mut self, is_animating: bool, now: Duration) -> TickState;

    /// Describes the indicator drawn into a container of the given size at `now`.
    fn draw(&self, container: Size, now: Duration) -> Vec<DrawCommand>;

    /// Drops the default size so the indicator stretches to fill offered space.
    fn make_resizable(&mut self) {
        self.set_default_size(None);
    }

    /// By-value form of [`ActivityIndicator::make_resizable`].
    fn resizable(mut self) -> Self
    where
        Self: Sized,
    {
        self.make_resizable();
        self
    }

    /// The size the indicator occupies when `offered` space is available.
    fn layout_size(&self, offered: Size) -> Size {
        self.default_size().unwrap_or(offered).sanitized()
    }
}

impl<T: ActivityIndicator + ?Sized> ActivityIndicator for Box<T> {
    fn kind(&self) -> IndicatorKind {
        (**self).kind()
    }

    fn is_animating(&self) -> bool {
        (**self).is_animating()
    }

    fn set_animating(&mut self, animating: bool) {
        (**self).set_animating(animating)
    }

    fn color(&self) -> Color {
        (**self).color()
    }

    fn set_color(&mut self, color: Color) {
        (**self).set_color(color)
    }

    fn default_size(&self) -> Option<Size> {
        (**self).default_size()
    }

    fn set_default_size(&mut self, size: Option<Size>) {
        (**self).set_default_size(size)
    }

    fn tick_interval(&self) -> Duration {
        (**self).tick_interval()
    }

    fn tick(&mut self, is_animating: bool, now: Duration) -> TickState {
        (**self).tick(is_animating, now)
    }

    fn draw(&self, container: Size, now: Duration) -> Vec<DrawCommand> {
        (**self).draw(container, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_contains() {
        let ring = Shape::Ring { center: Point::new(0.0, 0.0), inner_radius: 2.0, outer_radius: 4.0 };
        assert!(ring.contains(Point::new(3.0, 0.0)));
        assert!(!ring.contains(Point::new(1.0, 0.0)));
        assert!(!ring.contains(Point::new(0.0, 5.0)));
    }

    #[test]
    fn rotated_rect_sample() {
        let rect = Shape::Rect { center: Point::new(10.0, 5.0), size: Size::new(2.0, 10.0) };
        let command = DrawCommand::solid(rect, Color::WHITE)
            .with_transform(Transform::rotation(Point::new(10.0, 10.0), 90.0));
        // A vertical bar above the origin becomes a horizontal bar to its right.
        assert!(command.sample(Point::new(15.0, 10.0)).is_some());
        assert!(command.sample(Point::new(10.0, 5.0)).is_none());
    }

    #[test]
    fn scaled_to_zero_draws_nothing() {
        let circle = Shape::Circle { center: Point::new(5.0, 5.0), radius: 5.0 };
        let command =
            DrawCommand::solid(circle, Color::WHITE).with_transform(Transform::scale(Point::new(5.0, 5.0), 0.0));
        assert_eq!(command.sample(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn gradient_starts_transparent() {
        let paint = Paint::AngularGradient {
            from: Color::WHITE.opacity(0.0),
            to: Color::WHITE,
            start_degrees: -90.0,
            end_degrees: 270.0,
        };
        let center = Point::new(0.0, 0.0);
        // Just clockwise of twelve o'clock is the start of the sweep.
        let start = paint.color_at(center, Point::new(0.01, -10.0));
        let end = paint.color_at(center, Point::new(-0.01, -10.0));
        assert!(start.alpha < 0.01);
        assert!(end.alpha > 0.99);
    }

    #[test]
    fn opacity_multiplies_paint_alpha() {
        let circle = Shape::Circle { center: Point::new(0.0, 0.0), radius: 1.0 };
        let command = DrawCommand::solid(circle, Color::WHITE.opacity(0.5)).with_opacity(0.5);
        let sampled = command.sample(Point::new(0.0, 0.0)).map(|c| c.alpha);
        assert_eq!(sampled, Some(0.25));
    }
}
