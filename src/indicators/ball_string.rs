use super::common::{ActivityIndicator, DrawCommand, Shape, TickState, Transform};
use super::IndicatorKind;
use crate::animation::{Animated, Transition};
use crate::color::{Color, Palette};
use crate::geometry::{min_dimension, Point, Size};
use std::time::Duration;

const BALL_COUNT: usize = 7;
const TICK_INTERVAL: Duration = Duration::from_millis(1500);
const SWING_DURATION: Duration = Duration::from_secs(1);

/// A string of fading balls that swings a full turn around the center, each
/// ball trailing the one before it.
#[derive(Clone, Debug)]
pub struct BallString {
    is_animating: bool,
    color: Color,
    default_size: Option<Size>,
    /// Rotation of each ball in degrees, first ball first.
    rotations: [Animated; BALL_COUNT],
}

impl BallString {
    pub const DEFAULT_SIZE: Size = Size::new(40.0, 40.0);

    pub fn new(is_animating: bool, color: Color) -> Self {
        Self {
            is_animating,
            color,
            default_size: Some(Self::DEFAULT_SIZE),
            rotations: std::array::from_fn(|_| Animated::new(360.0)),
        }
    }

    pub fn from_palette(is_animating: bool, palette: &Palette) -> Self {
        Self::new(is_animating, palette.primary)
    }

    /// The committed rotation of the string in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotations[0].target()
    }

    /// Opacity of ball `index`, counting from 1.
    pub fn ball_opacity(index: usize) -> f64 {
        1.0 - index as f64 / (BALL_COUNT * 3) as f64
    }

    fn ball_frame(min: f64) -> Size {
        Size::new(min * 0.07, (min / 2.0) - (min * 0.25))
    }
}

impl ActivityIndicator for BallString {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::BallString
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
        let target = self.rotation() + 360.0;
        for (offset, rotation) in self.rotations.iter_mut().enumerate() {
            let delay = Duration::from_secs_f64((offset + 1) as f64 / 20.0);
            rotation.animate_to(target, Transition::ease_in_out(SWING_DURATION).delayed(delay), now);
        }
        TickState::Modified
    }

    fn draw(&self, container: Size, now: Duration) -> Vec<DrawCommand> {
        let container = container.sanitized();
        let min = min_dimension(container);
        if min <= 0.0 {
            return Vec::new();
        }
        let frame = Self::ball_frame(min);
        let ball = Shape::Circle {
            center: Point::new(container.width / 2.0, frame.height / 2.0),
            radius: frame.width.min(frame.height) / 2.0,
        };
        self.rotations
            .iter()
            .enumerate()
            .map(|(offset, rotation)| {
                DrawCommand::solid(ball, self.color)
                    .with_opacity(Self::ball_opacity(offset + 1))
                    .with_transform(Transform::rotation(container.center(), rotation.value_at(now)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 20.0 / 21.0)]
    #[case(4, 17.0 / 21.0)]
    #[case(7, 14.0 / 21.0)]
    fn opacity_by_index(#[case] index: usize, #[case] expected: f64) {
        assert!((BallString::ball_opacity(index) - expected).abs() < 1e-12);
    }

    #[test]
    fn opacities_ignore_rotation() {
        let mut indicator = BallString::new(true, Color::WHITE);
        let container = Size::new(40.0, 40.0);
        for tick in 1..=5 {
            let now = TICK_INTERVAL * tick;
            indicator.tick(true, now);
            let opacities: Vec<f64> = indicator.draw(container, now).iter().map(|c| c.opacity).collect();
            let expected: Vec<f64> = (1..=BALL_COUNT).map(BallString::ball_opacity).collect();
            assert_eq!(opacities, expected);
        }
    }

    #[test]
    fn swings_a_full_turn_per_tick() {
        let mut indicator = BallString::new(true, Color::WHITE);
        assert_eq!(indicator.rotation(), 360.0);
        assert_eq!(indicator.tick(true, TICK_INTERVAL), TickState::Modified);
        assert_eq!(indicator.rotation(), 720.0);
        assert_eq!(indicator.tick(false, TICK_INTERVAL * 2), TickState::Unmodified);
        assert_eq!(indicator.rotation(), 720.0);
        assert!(!indicator.is_animating());
    }

    #[test]
    fn balls_trail_each_other() {
        let mut indicator = BallString::new(true, Color::WHITE);
        indicator.tick(true, Duration::ZERO);
        let midway = Duration::from_millis(500);
        let rotations: Vec<f64> =
            indicator.draw(Size::new(40.0, 40.0), midway).iter().map(|c| c.transform.rotation_degrees).collect();
        assert!(rotations.windows(2).all(|w| w[0] > w[1]));
        let settled = indicator.draw(Size::new(40.0, 40.0), Duration::from_secs(2));
        assert!(settled.iter().all(|c| c.transform.rotation_degrees == 720.0));
    }

    #[test]
    fn balls_sit_at_the_top_center() {
        let indicator = BallString::new(false, Color::WHITE);
        let commands = indicator.draw(Size::new(40.0, 40.0), Duration::ZERO);
        assert_eq!(commands.len(), BALL_COUNT);
        let Shape::Circle { center, radius } = commands[0].shape else {
            panic!("expected a circle");
        };
        assert_eq!(center, Point::new(20.0, 5.0));
        assert!((radius - 1.4).abs() < 1e-9);
    }

    #[test]
    fn empty_container_draws_nothing() {
        let indicator = BallString::new(true, Color::WHITE);
        assert!(indicator.draw(Size::new(0.0, 40.0), Duration::ZERO).is_empty());
    }
}
