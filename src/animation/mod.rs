//! Time-based animation of scalar properties.

mod animated;
mod easing;

pub use animated::{Animated, Transition};
pub use easing::Easing;
