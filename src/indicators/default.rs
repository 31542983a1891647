use super::common::{ActivityIndicator, DrawCommand, Shape, TickState, Transform};
use super::IndicatorKind;
use crate::color::{Color, Palette};
use crate::geometry::{advance_degrees, min_dimension, Point, Size};
use std::time::Duration;

const SPOKE_COUNT: usize = 12;
const TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / SPOKE_COUNT as u64);
const STEP_DEGREES: f64 = 360.0 / SPOKE_COUNT as f64;

/// The classic twelve-spoke spinner. Steps one spoke per tick without
/// interpolation.
#[derive(Clone, Debug)]
pub struct DefaultIndicator {
    is_animating: bool,
    color: Color,
    default_size: Option<Size>,
    /// Rotation in degrees, always within `[0, 360)`.
    rotation: f64,
}

impl DefaultIndicator {
    pub const DEFAULT_SIZE: Size = Size::new(40.0, 40.0);

    pub fn new(is_animating: bool, color: Color) -> Self {
        Self { is_animating, color, default_size: Some(Self::DEFAULT_SIZE), rotation: 0.0 }
    }

    pub fn from_palette(is_animating: bool, palette: &Palette) -> Self {
        Self::new(is_animating, palette.primary)
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    fn spoke_size(min: f64) -> Size {
        Size::new(min * 0.07, (min / 2.0) - (min * 0.25))
    }
}

impl ActivityIndicator for DefaultIndicator {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Default
    }

    fn is_animating(&self) -> bool {
        self.is_animating
    }

    fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn default_size(&self) -> Option<Size> {
        self.default_size
    }

    fn set_default_size(&mut self, size: Option<Size>) {
        self.default_size = size;
    }

    fn tick_interval(&self) -> Duration {
        TICK_INTERVAL
    }

    fn tick(&mut self, is_animating: bool, _now: Duration) -> TickState {
        self.is_animating = is_animating;
        if !is_animating {
            return TickState::Unmodified;
        }
        self.rotation = advance_degrees(self.rotation, STEP_DEGREES);
        TickState::Modified
    }

    fn draw(&self, container: Size, _now: Duration) -> Vec<DrawCommand> {
        let container = container.sanitized();
        let min = min_dimension(container);
        if min <= 0.0 {
            return Vec::new();
        }
        let size = Self::spoke_size(min);
        let spoke = Shape::Rect { center: Point::new(container.width / 2.0, size.height / 2.0), size };
        (0..SPOKE_COUNT)
            .map(|index| {
                let fraction = index as f64 / SPOKE_COUNT as f64;
                DrawCommand::solid(spoke, self.color)
                    .with_opacity(1.0 - fraction)
                    .with_transform(Transform::rotation(container.center(), self.rotation - 360.0 * fraction))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 30.0)]
    #[case(11, 330.0)]
    #[case(12, 0.0)]
    #[case(13, 30.0)]
    #[case(100, 120.0)]
    fn rotation_wraps(#[case] ticks: u32, #[case] expected: f64) {
        let mut indicator = DefaultIndicator::new(true, Color::WHITE);
        for tick in 1..=ticks {
            indicator.tick(true, TICK_INTERVAL * tick);
            assert!((0.0..360.0).contains(&indicator.rotation()));
        }
        assert_eq!(indicator.rotation(), expected);
    }

    #[test]
    fn ticks_twelve_times_per_second() {
        let indicator = DefaultIndicator::new(true, Color::WHITE);
        assert_eq!(indicator.tick_interval(), Duration::from_nanos(83_333_333));
    }

    #[test]
    fn paused_ticks_do_nothing() {
        let mut indicator = DefaultIndicator::new(false, Color::WHITE);
        for tick in 1..=5 {
            assert_eq!(indicator.tick(false, TICK_INTERVAL * tick), TickState::Unmodified);
        }
        assert_eq!(indicator.rotation(), 0.0);
    }

    #[test]
    fn spokes_fade_around_the_circle() {
        let indicator = DefaultIndicator::new(true, Color::WHITE);
        let commands = indicator.draw(Size::new(40.0, 40.0), Duration::ZERO);
        assert_eq!(commands.len(), SPOKE_COUNT);
        assert_eq!(commands[0].opacity, 1.0);
        assert_eq!(commands[6].opacity, 0.5);
        assert_eq!(commands[3].transform.rotation_degrees, -90.0);
        let Shape::Rect { size, .. } = commands[0].shape else {
            panic!("expected a rectangle");
        };
        assert!((size.width - 2.8).abs() < 1e-9);
        assert_eq!(size.height, 10.0);
    }
}
