//! Animated activity indicators.
//!
//! Every indicator implements [`ActivityIndicator`]: it owns a small piece of
//! animation state that it advances on its own recurring timer while the host
//! says it is animating, and it describes itself as a list of
//! [`DrawCommand`]s for whatever space it is given.
//!
//! The [`runtime`] module mounts indicators on a single-threaded [`RunLoop`]
//! and the [`render`] module rasterizes draw commands for a terminal.

pub mod animation;
pub mod color;
pub mod config;
pub mod geometry;
pub mod indicators;
pub mod render;
pub mod runtime;

pub use color::{Color, Palette};
pub use geometry::{max_dimension, min_dimension, Point, Size};
pub use indicators::{
    build_indicator, ActivityIndicator, BallString, Continuous, DefaultIndicator, DrawCommand, IndicatorKind, Pulse,
    Radar, TickState,
};
pub use runtime::{Binding, IndicatorView, RunLoop};
