use std::path::Path;

use bon::Builder;
use log::warn;
use serde::Deserialize;

use crate::error::{ClockError, Result};

// ============================================================================
// COLOR
// ============================================================================

/// RGBA color used for hands and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Parses any CSS color string a canvas `fillStyle` accepts: hex forms,
    /// `rgb()`/`rgba()`, `hsl()`/`hsla()` and the named colors.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let c = normalized.parse::<css_color_parser2::Color>().ok()?;
        let alpha = (c.a.clamp(0.0, 1.0) * 255.).round() as u8;
        Some(Self::new(c.r, c.g, c.b).with_alpha(alpha))
    }
}

// ============================================================================
// STYLE
// ============================================================================

/// How the hands are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Straight hands radiating from a central pivot.
    #[default]
    Classic,
    /// Arcs swept from 12 o'clock to the hand's position.
    Modern,
}

impl Style {
    /// Exact, case-sensitive match on `"classic"` or `"modern"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::Classic),
            "modern" => Some(Self::Modern),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
        }
    }
}

// ============================================================================
// USER OPTIONS (PARTIAL)
// ============================================================================

/// Partial clock options. Every field is optional; present values override
/// the defaults when they are usable and are otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Builder, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOptions {
    /// Clock radius in percent of the smaller viewport side.
    pub radius_option: Option<f64>,
    /// `"classic"` or `"modern"`.
    #[builder(into)]
    pub style: Option<String>,

    pub hours_size: Option<f64>,
    pub minutes_size: Option<f64>,
    pub seconds_size: Option<f64>,

    pub hours_thickness: Option<f64>,
    pub minutes_thickness: Option<f64>,
    pub seconds_thickness: Option<f64>,

    #[builder(into)]
    pub hours_color: Option<String>,
    #[builder(into)]
    pub minutes_color: Option<String>,
    #[builder(into)]
    pub seconds_color: Option<String>,
    #[builder(into)]
    pub bg_color: Option<String>,
}

// ============================================================================
// RESOLVED CONFIGURATION
// ============================================================================

pub const DEFAULT_RADIUS_PERCENT: f64 = 35.0;
pub const DEFAULT_HOURS: HandConfig = HandConfig::new(60.0, 30.0, Color::new(0x8e, 0x44, 0xad));
pub const DEFAULT_MINUTES: HandConfig = HandConfig::new(80.0, 17.0, Color::new(0x27, 0xae, 0x60));
pub const DEFAULT_SECONDS: HandConfig = HandConfig::new(100.0, 7.0, Color::new(0xf1, 0xc4, 0x0f));
pub const DEFAULT_BACKGROUND: Color = Color::new(0x2c, 0x3e, 0x50);

/// Appearance of one hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandConfig {
    /// Length in percent of the clock radius.
    pub size: f64,
    /// Stroke thickness, scaled by the clock radius when drawn.
    pub thickness: f64,
    pub color: Color,
}

impl HandConfig {
    pub const fn new(size: f64, thickness: f64, color: Color) -> Self {
        Self {
            size,
            thickness,
            color,
        }
    }
}

/// Fully resolved clock configuration. Fixed once the clock is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub radius_percent: f64,
    pub style: Style,
    pub hours: HandConfig,
    pub minutes: HandConfig,
    pub seconds: HandConfig,
    pub background: Color,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            radius_percent: DEFAULT_RADIUS_PERCENT,
            style: Style::Classic,
            hours: DEFAULT_HOURS,
            minutes: DEFAULT_MINUTES,
            seconds: DEFAULT_SECONDS,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl ClockConfig {
    /// Merges `options` over the defaults.
    ///
    /// Zero, NaN and empty values are skipped, unknown styles and
    /// unparseable colors keep the default. Nothing here fails.
    pub fn resolve(options: Option<&ClockOptions>) -> Self {
        let mut config = Self::default();
        if let Some(options) = options {
            config.merge(options);
        }
        config
    }

    fn merge(&mut self, options: &ClockOptions) {
        override_number("radiusOption", &mut self.radius_percent, options.radius_option);

        if let Some(name) = options.style.as_deref() {
            match Style::from_name(name) {
                Some(style) => self.style = style,
                None => warn!("ignoring unknown style {name:?}, keeping {:?}", self.style.as_str()),
            }
        }

        override_number("hoursSize", &mut self.hours.size, options.hours_size);
        override_number("minutesSize", &mut self.minutes.size, options.minutes_size);
        override_number("secondsSize", &mut self.seconds.size, options.seconds_size);

        override_number("hoursThickness", &mut self.hours.thickness, options.hours_thickness);
        override_number("minutesThickness", &mut self.minutes.thickness, options.minutes_thickness);
        override_number("secondsThickness", &mut self.seconds.thickness, options.seconds_thickness);

        override_color("hoursColor", &mut self.hours.color, options.hours_color.as_deref());
        override_color("minutesColor", &mut self.minutes.color, options.minutes_color.as_deref());
        override_color("secondsColor", &mut self.seconds.color, options.seconds_color.as_deref());
        override_color("bgColor", &mut self.background, options.bg_color.as_deref());
    }

    /// Hands in drawing order: seconds, minutes, hours.
    pub fn hands(&self) -> [(Hand, &HandConfig); 3] {
        [
            (Hand::Seconds, &self.seconds),
            (Hand::Minutes, &self.minutes),
            (Hand::Hours, &self.hours),
        ]
    }
}

/// The three clock hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hours,
    Minutes,
    Seconds,
}

fn override_number(field: &str, slot: &mut f64, value: Option<f64>) {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => *slot = v,
        Some(v) => warn!("ignoring {field} = {v}, keeping {slot}"),
        None => {}
    }
}

fn override_color(field: &str, slot: &mut Color, value: Option<&str>) {
    let Some(value) = value else { return };
    if value.is_empty() {
        return;
    }
    match Color::parse(value) {
        Some(color) => *slot = color,
        None => warn!("ignoring {field} = {value:?}, not a color"),
    }
}

// ============================================================================
// WINDOW & CONFIG FILE
// ============================================================================

/// Host window settings. Not part of the clock face itself.
#[derive(Debug, Clone, PartialEq, Builder, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowConfig {
    #[builder(default = "Clock".to_string(), into)]
    pub title: String,
    #[builder(default = 600)]
    pub width: u32,
    #[builder(default = 600)]
    pub height: u32,
    #[builder(default = true)]
    pub resizable: bool,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// On-disk TOML configuration: clock options at the top level plus an
/// optional `[window]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub clock: ClockOptions,
    #[serde(default)]
    pub window: WindowConfig,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ClockError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
