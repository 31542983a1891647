use super::common::{ActivityIndicator, DrawCommand, Paint, Shape, TickState, Transform};
use super::IndicatorKind;
use crate::animation::{Animated, Transition};
use crate::color::{Color, Palette};
use crate::geometry::{min_dimension, Size};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const STEP_DEGREES: f64 = 36.0;

/// A ring with a conic fade from transparent to the foreground color, turning
/// once per second.
#[derive(Clone, Debug)]
pub struct Continuous {
    is_animating: bool,
    color: Color,
    default_size: Option<Size>,
    /// Rotation in degrees. Grows by one step per animating tick and is never
    /// reduced; a full turn is visually a no-op.
    rotation: Animated,
}

impl Continuous {
    pub const DEFAULT_SIZE: Size = Size::new(40.0, 40.0);

    pub fn new(is_animating: bool, color: Color) -> Self {
        Self { is_animating, color, default_size: Some(Self::DEFAULT_SIZE), rotation: Animated::new(0.0) }
    }

    pub fn from_palette(is_animating: bool, palette: &Palette) -> Self {
        Self::new(is_animating, palette.primary)
    }

    /// The committed rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation.target()
    }

    fn line_width(min: f64) -> f64 {
        min * 0.1
    }
}

impl Default for Continuous {
    /// Animating, in the default palette's primary color.
    fn default() -> Self {
        Self::from_palette(true, &Palette::default())
    }
}

impl ActivityIndicator for Continuous {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Continuous
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

    fn tick(&mut self, is_animating: bool, now: Duration) -> TickState {
        self.is_animating = is_animating;
        if !is_animating {
            return TickState::Unmodified;
        }
        let target = self.rotation.target() + STEP_DEGREES;
        self.rotation.animate_to(target, Transition::linear(TICK_INTERVAL), now);
        TickState::Modified
    }

    fn draw(&self, container: Size, now: Duration) -> Vec<DrawCommand> {
        let container = container.sanitized();
        let min = min_dimension(container);
        if min <= 0.0 {
            return Vec::new();
        }
        let center = container.center();
        let outer_radius = min / 2.0;
        let ring = Shape::Ring {
            center,
            inner_radius: (outer_radius - Self::line_width(min)).max(0.0),
            outer_radius,
        };
        let paint = Paint::AngularGradient {
            from: self.color.opacity(0.0),
            to: self.color,
            start_degrees: -90.0,
            end_degrees: 270.0,
        };
        let transform = Transform::rotation(center, self.rotation.value_at(now));
        vec![DrawCommand { shape: ring, paint, opacity: 1.0, transform }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_animating() {
        let indicator = Continuous::default();
        assert!(indicator.is_animating());
        assert_eq!(indicator.color(), Palette::DARK.primary);
        assert_eq!(indicator.default_size(), Some(Continuous::DEFAULT_SIZE));
    }

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(25)]
    fn rotation_grows_per_tick(#[case] ticks: u32) {
        let mut indicator = Continuous::new(true, Color::WHITE);
        for tick in 1..=ticks {
            assert_eq!(indicator.tick(true, TICK_INTERVAL * tick), TickState::Modified);
        }
        assert_eq!(indicator.rotation(), 36.0 * ticks as f64);
    }

    #[test]
    fn one_turn_per_second() {
        let mut indicator = Continuous::new(true, Color::WHITE);
        for tick in 1..=10 {
            indicator.tick(true, TICK_INTERVAL * tick);
        }
        assert_eq!(indicator.rotation(), 360.0);
    }

    #[test]
    fn rotation_moves_linearly_between_ticks() {
        let mut indicator = Continuous::new(true, Color::WHITE);
        indicator.tick(true, TICK_INTERVAL);
        let halfway = TICK_INTERVAL + TICK_INTERVAL / 2;
        let command = indicator.draw(Size::new(40.0, 40.0), halfway)[0];
        assert!((command.transform.rotation_degrees - 18.0).abs() < 1e-6);
    }

    #[test]
    fn paused_ticks_hold_rotation() {
        let mut indicator = Continuous::new(false, Color::WHITE);
        assert_eq!(indicator.tick(false, TICK_INTERVAL), TickState::Unmodified);
        assert_eq!(indicator.rotation(), 0.0);
    }

    #[test]
    fn ring_stroke_is_a_tenth_of_the_container() {
        let indicator = Continuous::new(true, Color::WHITE).resizable();
        let commands = indicator.draw(Size::new(100.0, 60.0), Duration::ZERO);
        let Shape::Ring { inner_radius, outer_radius, .. } = commands[0].shape else {
            panic!("expected a ring");
        };
        assert_eq!(outer_radius, 30.0);
        assert!((outer_radius - inner_radius - 6.0).abs() < 1e-9);
        assert_eq!(indicator.default_size(), None);
    }
}
