use super::common::{ActivityIndicator, DrawCommand, Shape, TickState};
use super::IndicatorKind;
use crate::animation::{Animated, Transition};
use crate::color::{Color, Palette};
use crate::geometry::{min_dimension, Size};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const PULSE_DURATION: Duration = Duration::from_secs(1);
/// Width of the stroke masking the ripple, in points regardless of size.
const MASK_LINE_WIDTH: f64 = 50.0;

/// A solid dot with a ripple that expands and fades out once per second.
#[derive(Clone, Debug)]
pub struct Pulse {
    is_animating: bool,
    color: Color,
    default_size: Option<Size>,
    scale: Animated,
    opacity: Animated,
}

impl Pulse {
    pub const DEFAULT_SIZE: Size = Size::new(60.0, 60.0);

    pub fn new(is_animating: bool, color: Color) -> Self {
        Self {
            is_animating,
            color,
            default_size: Some(Self::DEFAULT_SIZE),
            scale: Animated::new(1.0),
            opacity: Animated::new(0.0),
        }
    }

    /// Uses the palette's label color, like text would.
    pub fn from_palette(is_animating: bool, palette: &Palette) -> Self {
        Self::new(is_animating, palette.label)
    }

    /// The committed ripple scale.
    pub fn scale(&self) -> f64 {
        self.scale.target()
    }

    /// The committed ripple opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity.target()
    }

    pub fn scale_at(&self, now: Duration) -> f64 {
        self.scale.value_at(now)
    }

    pub fn opacity_at(&self, now: Duration) -> f64 {
        self.opacity.value_at(now)
    }

    fn padding(min: f64) -> f64 {
        min * 0.25
    }
}

impl ActivityIndicator for Pulse {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Pulse
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
        let mut state = TickState::Unmodified;

        // The ripple restarts from the dot's edge whether or not we animate.
        if self.scale.target() != 0.0 {
            self.scale.set(0.0);
            self.opacity.set(1.0);
            state = TickState::Modified;
        }

        if is_animating {
            let transition = Transition::ease_out(PULSE_DURATION);
            self.scale.animate_to(1.0, transition, now);
            self.opacity.animate_to(0.0, transition, now);
            state = TickState::Modified;
        }
        state
    }

    fn draw(&self, container: Size, now: Duration) -> Vec<DrawCommand> {
        let container = container.sanitized();
        let min = min_dimension(container);
        if min <= 0.0 {
            return Vec::new();
        }
        let center = container.center();
        let dot_radius = (min / 2.0 - Self::padding(min)).max(0.0);

        let mut commands = Vec::with_capacity(2);
        // Ripple: the full-size disc scaled by the pulse, clipped to the mask stroke.
        let inner_radius = (dot_radius - MASK_LINE_WIDTH / 2.0).max(0.0);
        let outer_radius = (dot_radius + MASK_LINE_WIDTH / 2.0).min(min / 2.0 * self.scale_at(now));
        if outer_radius > inner_radius {
            let ripple = Shape::Ring { center, inner_radius, outer_radius };
            commands.push(DrawCommand::solid(ripple, self.color).with_opacity(self.opacity_at(now)));
        }
        commands.push(DrawCommand::solid(Shape::Circle { center, radius: dot_radius }, self.color));
        commands
    }
}
