use crate::color::{Color, Palette};
use crate::geometry::Size;
use crate::indicators::{build_indicator, ActivityIndicator, IndicatorKind};
use crate::render::Stage;
use serde::Deserialize;
use std::{fs::File, io, path::Path, path::PathBuf};
use strum::IntoEnumIterator;

/// The largest accepted `scale`, in terminal pixels per point.
pub const MAX_SCALE: f64 = 8.0;

const STAGE_GAP: usize = 2;

/// Settings for the preview binaries.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Frames drawn per second.
    pub frame_rate: u32,

    /// Terminal pixels per point.
    pub scale: f64,

    /// Space offered to each indicator; resizable indicators fill it.
    pub slot: Size,

    pub background: Color,

    /// The indicators to show, in order. Empty means one of every kind.
    pub indicators: Vec<IndicatorConfig>,
}

impl DemoConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io { path: path.into(), source })?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be greater than zero".into()));
        }
        if !(self.scale > 0.0 && self.scale <= MAX_SCALE) {
            return Err(ConfigError::Invalid(format!("scale must be in (0, {MAX_SCALE}], got {}", self.scale)));
        }
        if self.slot.sanitized().is_empty() {
            return Err(ConfigError::Invalid("slot must have a positive width and height".into()));
        }
        Ok(())
    }

    /// The stage the configured indicators are drawn on.
    pub fn stage(&self) -> Stage {
        Stage { slot: self.slot, scale: self.scale, gap: STAGE_GAP, background: self.background }
    }

    /// The configured indicators, or one of each kind when none are listed.
    pub fn resolved_indicators(&self) -> Vec<IndicatorConfig> {
        if self.indicators.is_empty() {
            IndicatorKind::iter().map(IndicatorConfig::new).collect()
        } else {
            self.indicators.clone()
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            scale: 0.25,
            slot: Size::new(120.0, 60.0),
            background: Color::BLACK,
            indicators: Vec::new(),
        }
    }
}

/// One indicator on the stage.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorConfig {
    pub kind: IndicatorKind,

    /// The foreground color; the palette default when absent.
    #[serde(default)]
    pub color: Option<Color>,

    #[serde(default = "default_animating")]
    pub animating: bool,

    #[serde(default)]
    pub resizable: bool,
}

impl IndicatorConfig {
    pub fn new(kind: IndicatorKind) -> Self {
        Self { kind, color: None, animating: default_animating(), resizable: false }
    }

    pub fn build(&self, palette: &Palette) -> Box<dyn ActivityIndicator> {
        let mut indicator = build_indicator(self.kind, self.animating, self.color, palette);
        if self.resizable {
            indicator.make_resizable();
        }
        indicator
    }
}

fn default_animating() -> bool {
    true
}

/// Errors that can occur when loading configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
