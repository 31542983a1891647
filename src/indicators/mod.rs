mod common;

// Individual indicator modules
mod ball_string;
mod continuous;
mod default;
mod pulse;
mod radar;

pub use ball_string::BallString;
pub use common::{ActivityIndicator, DrawCommand, Paint, Shape, TickState, Transform};
pub use continuous::Continuous;
pub use default::DefaultIndicator;
pub use pulse::Pulse;
pub use radar::Radar;

use crate::color::{Color, Palette};
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of indicator styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorKind {
    BallString,
    Continuous,
    Default,
    Pulse,
    Radar,
}

impl IndicatorKind {
    /// The intrinsic size of indicators of this kind.
    pub fn default_size(&self) -> Size {
        match self {
            Self::BallString => BallString::DEFAULT_SIZE,
            Self::Continuous => Continuous::DEFAULT_SIZE,
            Self::Default => DefaultIndicator::DEFAULT_SIZE,
            Self::Pulse => Pulse::DEFAULT_SIZE,
            Self::Radar => Radar::DEFAULT_SIZE,
        }
    }

    /// The color used when none is given.
    pub fn default_color(&self, palette: &Palette) -> Color {
        match self {
            Self::Pulse => palette.label,
            _ => palette.primary,
        }
    }
}

/// Build the indicator implementation for a given kind.
pub fn build_indicator(
    kind: IndicatorKind,
    is_animating: bool,
    color: Option<Color>,
    palette: &Palette,
) -> Box<dyn ActivityIndicator> {
    let color = color.unwrap_or_else(|| kind.default_color(palette));
    match kind {
        IndicatorKind::BallString => Box::new(BallString::new(is_animating, color)),
        IndicatorKind::Continuous => Box::new(Continuous::new(is_animating, color)),
        IndicatorKind::Default => Box::new(DefaultIndicator::new(is_animating, color)),
        IndicatorKind::Pulse => Box::new(Pulse::new(is_animating, color)),
        IndicatorKind::Radar => Box::new(Radar::new(is_animating, color)),
    }
}
