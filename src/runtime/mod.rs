//! Host-side plumbing: recurring timers, shared flags and mounted views.

mod binding;
mod timer;
mod view;

pub use binding::Binding;
pub use timer::{RunLoop, TimerError, TimerGuard, TimerId};
pub use view::IndicatorView;
