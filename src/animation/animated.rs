use super::easing::Easing;
use std::time::Duration;

/// How a property moves from its current value to a new target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, delay: Duration::ZERO, easing }
    }

    pub fn linear(duration: Duration) -> Self {
        Self::new(duration, Easing::Linear)
    }

    pub fn ease_out(duration: Duration) -> Self {
        Self::new(duration, Easing::EaseOut)
    }

    pub fn ease_in_out(duration: Duration) -> Self {
        Self::new(duration, Easing::EaseInOut)
    }

    /// The same transition, starting `delay` after it is triggered.
    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    fn end_offset(&self) -> Duration {
        self.delay + self.duration
    }
}

/// A scalar property that is either settled or transitioning towards a target.
///
/// The target is the committed state; the sampled value is what the renderer
/// sees at a given moment.
#[derive(Clone, Debug, PartialEq)]
pub struct Animated {
    from: f64,
    to: f64,
    started: Duration,
    transition: Option<Transition>,
}

impl Animated {
    pub fn new(value: f64) -> Self {
        Self { from: value, to: value, started: Duration::ZERO, transition: None }
    }

    /// Jumps to `value` without a transition, cancelling any running one.
    pub fn set(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.transition = None;
    }

    /// Starts a transition to `target` from whatever value is visible at `now`.
    pub fn animate_to(&mut self, target: f64, transition: Transition, now: Duration) {
        self.from = self.value_at(now);
        self.to = target;
        self.started = now;
        self.transition = Some(transition);
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn value_at(&self, now: Duration) -> f64 {
        let Some(transition) = self.transition else {
            return self.to;
        };
        let elapsed = now.saturating_sub(self.started);
        if elapsed < transition.delay {
            return self.from;
        }
        let running = elapsed - transition.delay;
        if transition.duration.is_zero() || running >= transition.duration {
            return self.to;
        }
        let progress = running.as_secs_f64() / transition.duration.as_secs_f64();
        self.from + (self.to - self.from) * transition.easing.apply(progress)
    }

    pub fn is_settled(&self, now: Duration) -> bool {
        match self.transition {
            Some(transition) => now.saturating_sub(self.started) >= transition.end_offset(),
            None => true,
        }
    }
}
