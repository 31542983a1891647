use super::common::{ActivityIndicator, DrawCommand, Shape, TickState, Transform};
use super::IndicatorKind;
use crate::animation::{Animated, Transition};
use crate::color::{Color, Palette};
use crate::geometry::{max_dimension, Point, Size};
use std::time::Duration;

const BALL_COUNT: usize = 3;
const TICK_INTERVAL: Duration = Duration::from_millis(300);
const ACTIVE_SCALE: f64 = 1.5;
const RESTING_SCALE: f64 = 1.0;

/// A row of dots where the highlight sweeps from left to right.
#[derive(Clone, Debug)]
pub struct Radar {
    is_animating: bool,
    color: Color,
    default_size: Option<Size>,
    current_index: Option<usize>,
    scales: [Animated; BALL_COUNT],
}

impl Radar {
    pub const DEFAULT_SIZE: Size = Size::new(120.0, 40.0);

    pub fn new(is_animating: bool, color: Color) -> Self {
        Self {
            is_animating,
            color,
            default_size: Some(Self::DEFAULT_SIZE),
            current_index: None,
            scales: std::array::from_fn(|_| Animated::new(RESTING_SCALE)),
        }
    }

    pub fn from_palette(is_animating: bool, palette: &Palette) -> Self {
        Self::new(is_animating, palette.primary)
    }

    /// The highlighted ball, `None` before the first tick and after stopping.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The committed scale of ball `index`.
    pub fn scale_for(&self, index: usize) -> f64 {
        if self.current_index == Some(index) {
            ACTIVE_SCALE
        } else {
            RESTING_SCALE
        }
    }

    fn retarget_scales(&mut self, now: Duration) {
        for index in 0..BALL_COUNT {
            let target = self.scale_for(index);
            let scale = &mut self.scales[index];
            if scale.target() != target {
                scale.animate_to(target, Transition::ease_in_out(TICK_INTERVAL), now);
            }
        }
    }

    fn padding(max: f64) -> f64 {
        max * 0.075
    }
}

impl ActivityIndicator for Radar {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Radar
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
        if is_animating {
            let next = self.current_index.map_or(0, |index| (index + 1) % BALL_COUNT);
            self.current_index = Some(next);
        } else if self.current_index.is_some() {
            self.current_index = None;
        } else {
            return TickState::Unmodified;
        }
        self.retarget_scales(now);
        TickState::Modified
    }

    fn draw(&self, container: Size, now: Duration) -> Vec<DrawCommand> {
        let container = container.sanitized();
        if container.is_empty() {
            return Vec::new();
        }
        let padding = Self::padding(max_dimension(container));
        let column = container.width / BALL_COUNT as f64;
        let radius = (column - 2.0 * padding).min(container.height - 2.0 * padding) / 2.0;
        if radius <= 0.0 {
            return Vec::new();
        }
        self.scales
            .iter()
            .enumerate()
            .map(|(index, scale)| {
                let center = Point::new(column * (index as f64 + 0.5), container.height / 2.0);
                DrawCommand::solid(Shape::Circle { center, radius }, self.color)
                    .with_transform(Transform::scale(center, scale.value_at(now)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, Some(0))]
    #[case(2, Some(1))]
    #[case(3, Some(2))]
    #[case(4, Some(0))]
    #[case(8, Some(1))]
    fn index_sweeps(#[case] ticks: u32, #[case] expected: Option<usize>) {
        let mut radar = Radar::new(true, Color::WHITE);
        assert_eq!(radar.current_index(), None);
        for tick in 1..=ticks {
            radar.tick(true, TICK_INTERVAL * tick);
        }
        assert_eq!(radar.current_index(), expected);
    }

    #[test]
    fn stopping_resets_exactly_once() {
        let mut radar = Radar::new(true, Color::WHITE);
        radar.tick(true, TICK_INTERVAL);
        radar.tick(true, TICK_INTERVAL * 2);
        assert_eq!(radar.tick(false, TICK_INTERVAL * 3), TickState::Modified);
        assert_eq!(radar.current_index(), None);
        for tick in 4..=6 {
            assert_eq!(radar.tick(false, TICK_INTERVAL * tick), TickState::Unmodified);
            assert_eq!(radar.current_index(), None);
        }
    }

    #[test]
    fn never_started_stays_idle() {
        let mut radar = Radar::new(false, Color::WHITE);
        assert_eq!(radar.tick(false, TICK_INTERVAL), TickState::Unmodified);
    }

    #[test]
    fn active_ball_grows() {
        let mut radar = Radar::new(true, Color::WHITE);
        radar.tick(true, Duration::ZERO);
        assert_eq!(radar.scale_for(0), ACTIVE_SCALE);
        assert_eq!(radar.scale_for(1), RESTING_SCALE);

        let settled = radar.draw(Radar::DEFAULT_SIZE, TICK_INTERVAL);
        let scales: Vec<f64> = settled.iter().map(|c| c.transform.scale).collect();
        assert_eq!(scales, vec![1.5, 1.0, 1.0]);

        let midway = radar.draw(Radar::DEFAULT_SIZE, TICK_INTERVAL / 2);
        assert!(midway[0].transform.scale > 1.0 && midway[0].transform.scale < 1.5);
    }

    #[test]
    fn balls_fill_equal_columns() {
        let radar = Radar::new(true, Color::WHITE);
        let commands = radar.draw(Radar::DEFAULT_SIZE, Duration::ZERO);
        let circles: Vec<(Point, f64)> = commands
            .iter()
            .filter_map(|c| match c.shape {
                Shape::Circle { center, radius } => Some((center, radius)),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 3);
        assert_eq!(circles[1].0, Point::new(60.0, 20.0));
        assert!((circles[0].1 - 11.0).abs() < 1e-9);
    }
}
