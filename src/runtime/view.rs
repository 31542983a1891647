use super::binding::Binding;
use super::timer::{RunLoop, TimerError, TimerGuard};
use crate::color::Color;
use crate::geometry::Size;
use crate::indicators::{ActivityIndicator, DrawCommand, TickState};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// An indicator mounted on a run loop.
///
/// The view owns the indicator's recurring timer: it is scheduled on mount and
/// cancelled when the view is dropped, on every exit path.
pub struct IndicatorView<I> {
    indicator: Rc<RefCell<I>>,
    animating: Binding<bool>,
    _timer: TimerGuard,
}

impl<I: ActivityIndicator + 'static> IndicatorView<I> {
    /// Mounts `indicator`, sampling `animating` on every tick.
    pub fn mount(indicator: I, animating: Binding<bool>, run_loop: &RunLoop) -> Result<Self, TimerError> {
        let interval = indicator.tick_interval();
        let kind = indicator.kind();
        let indicator = Rc::new(RefCell::new(indicator));
        let timer = {
            let indicator = Rc::clone(&indicator);
            let animating = animating.clone();
            run_loop.schedule_repeating(interval, move |now| {
                let state = indicator.borrow_mut().tick(animating.get(), now);
                if state == TickState::Modified {
                    log::trace!("{kind} advanced at {now:?}");
                }
            })?
        };
        Ok(Self { indicator, animating, _timer: timer })
    }

    /// Mounts `indicator` with a fresh binding seeded from its own flag.
    pub fn mount_owned(indicator: I, run_loop: &RunLoop) -> Result<Self, TimerError> {
        let animating = Binding::new(indicator.is_animating());
        Self::mount(indicator, animating, run_loop)
    }

    /// The host side of the animating flag.
    pub fn animating(&self) -> &Binding<bool> {
        &self.animating
    }

    pub fn set_color(&self, color: Color) {
        self.indicator.borrow_mut().set_color(color);
    }

    /// Read access to the mounted indicator.
    pub fn with_indicator<R>(&self, read: impl FnOnce(&I) -> R) -> R {
        read(&self.indicator.borrow())
    }

    /// Lays the indicator out in `offered` space and draws it at `now`.
    pub fn draw(&self, offered: Size, now: Duration) -> (Size, Vec<DrawCommand>) {
        let indicator = self.indicator.borrow();
        let size = indicator.layout_size(offered);
        (size, indicator.draw(size, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::indicators::{build_indicator, DefaultIndicator, IndicatorKind, Paint, Pulse, Radar};

    #[test]
    fn ticks_follow_the_binding() {
        let run_loop = RunLoop::new();
        let animating = Binding::new(true);
        let view = IndicatorView::mount(Radar::new(true, Color::WHITE), animating.clone(), &run_loop).expect("mount");

        run_loop.advance_to(Duration::from_millis(1200));
        assert_eq!(view.with_indicator(|radar| radar.current_index()), Some(0));

        animating.set(false);
        run_loop.advance_to(Duration::from_millis(1500));
        assert_eq!(view.with_indicator(|radar| radar.current_index()), None);
        assert!(!view.with_indicator(|radar| radar.is_animating()));
    }

    #[test]
    fn twelve_ticks_bring_the_spinner_home() {
        let run_loop = RunLoop::new();
        let view = IndicatorView::mount_owned(DefaultIndicator::new(true, Color::WHITE), &run_loop).expect("mount");
        let interval = view.with_indicator(|indicator| indicator.tick_interval());
        assert_eq!(run_loop.advance_to(interval * 12), 12);
        assert_eq!(view.with_indicator(|indicator| indicator.rotation()), 0.0);
    }

    #[test]
    fn unmounting_cancels_the_timer() {
        let run_loop = RunLoop::new();
        let view = IndicatorView::mount_owned(Pulse::new(true, Color::WHITE), &run_loop).expect("mount");
        assert_eq!(run_loop.active_timers(), 1);
        drop(view);
        assert_eq!(run_loop.active_timers(), 0);
        assert_eq!(run_loop.advance_to(Duration::from_secs(10)), 0);
    }

    #[test]
    fn boxed_indicators_mount() {
        let run_loop = RunLoop::new();
        let indicator = build_indicator(IndicatorKind::Continuous, true, None, &Palette::DARK).resizable();
        let view = IndicatorView::mount_owned(indicator, &run_loop).expect("mount");
        run_loop.advance_to(Duration::from_secs(1));
        let offered = Size::new(80.0, 80.0);
        let (size, commands) = view.draw(offered, Duration::from_millis(1100));
        assert_eq!(size, offered);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].transform.rotation_degrees, 360.0);
    }

    #[test]
    fn color_changes_apply_to_the_next_draw() {
        let run_loop = RunLoop::new();
        let view = IndicatorView::mount_owned(Radar::new(false, Color::WHITE), &run_loop).expect("mount");
        view.set_color(Color::BLACK);
        let (_, commands) = view.draw(Size::new(1.0, 1.0), Duration::ZERO);
        assert!(commands.iter().all(|c| c.paint == Paint::Solid(Color::BLACK)));
        assert_eq!(view.with_indicator(|radar| radar.color()), Color::BLACK);
    }
}
