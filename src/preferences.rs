//! Display preferences and their persistence.
//!
//! Preferences are the user-level display defaults shared by every plot
//! surface: background, zero line, default line colours and widths, and the
//! per-channel visibility flags. They are stored as JSON; colours are kept as
//! the strings the user wrote (`"goldenrod"`, `"#f3f3bb"`) and validated into
//! [`ColorSpec`] when loaded.

use crate::error::{PlotError, PlotResult};
use eyre::{Result, WrapErr};
use gpui::{Hsla, Rgba};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named colours understood in preference files.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("white", 0xffffff),
    ("w", 0xffffff),
    ("black", 0x000000),
    ("k", 0x000000),
    ("blue", 0x0000ff),
    ("b", 0x0000ff),
    ("red", 0xff0000),
    ("r", 0xff0000),
    ("green", 0x008000),
    ("g", 0x008000),
    ("purple", 0x800080),
    ("yellow", 0xffff00),
    ("y", 0xffff00),
    ("goldenrod", 0xdaa520),
    ("orange", 0xffa500),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("cyan", 0x00ffff),
    ("c", 0x00ffff),
    ("magenta", 0xff00ff),
    ("m", 0xff00ff),
];

fn rgba_from_u32(rgb: u32, alpha: f32) -> Rgba {
    Rgba {
        r: ((rgb >> 16) & 0xff) as f32 / 255.0,
        g: ((rgb >> 8) & 0xff) as f32 / 255.0,
        b: (rgb & 0xff) as f32 / 255.0,
        a: alpha,
    }
}

/// Parses a colour name or a `#rrggbb` / `#rrggbbaa` hex string.
pub fn parse_color(text: &str) -> PlotResult<Hsla> {
    let trimmed = text.trim().trim_matches('"');
    let lower = trimmed.to_ascii_lowercase();

    if lower == "none" || lower == "transparent" {
        return Ok(Hsla::from(rgba_from_u32(0, 0.0)));
    }

    if let Some(hex) = lower.strip_prefix('#') {
        let parsed = match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(|v| rgba_from_u32(v, 1.0)),
            8 => u32::from_str_radix(hex, 16)
                .ok()
                .map(|v| rgba_from_u32(v >> 8, (v & 0xff) as f32 / 255.0)),
            _ => None,
        };
        return parsed
            .map(Hsla::from)
            .ok_or_else(|| PlotError::InvalidColor(text.to_string()));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| Hsla::from(rgba_from_u32(*rgb, 1.0)))
        .ok_or_else(|| PlotError::InvalidColor(text.to_string()))
}

/// A colour as written by the user plus its parsed value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorSpec {
    text: String,
    color: Hsla,
}

impl ColorSpec {
    pub fn parse(text: &str) -> PlotResult<Self> {
        Ok(Self {
            text: text.to_string(),
            color: parse_color(text)?,
        })
    }

    /// Infallible constructor for the built-in names used as defaults.
    pub(crate) fn builtin(text: &'static str, rgb: u32) -> Self {
        Self {
            text: text.to_string(),
            color: Hsla::from(rgba_from_u32(rgb, 1.0)),
        }
    }

    pub fn hsla(&self) -> Hsla {
        self.color
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Same hue with the given opacity.
    pub fn with_alpha(&self, alpha: f32) -> Hsla {
        Hsla {
            a: alpha.clamp(0.0, 1.0),
            ..self.color
        }
    }
}

impl TryFrom<String> for ColorSpec {
    type Error = PlotError;

    fn try_from(value: String) -> PlotResult<Self> {
        Self::parse(&value)
    }
}

impl From<ColorSpec> for String {
    fn from(value: ColorSpec) -> Self {
        value.text
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// On/off run lengths in pixels for a unit-width stroke. Empty for solid.
    pub fn dash_pattern(&self) -> &'static [f32] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[6.0, 4.0],
            Self::Dotted => &[1.5, 3.0],
            Self::DashDot => &[6.0, 3.0, 1.5, 3.0],
        }
    }
}

/// Where the zero line sits in each plot. Top and bottom keep the small
/// side of the range at a tenth of the large one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroLinePosition {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Per-channel visibility of the plotter application, in display order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelVisibility {
    pub show_gradx: bool,
    pub show_grady: bool,
    pub show_gradz: bool,
    pub show_ssp: bool,
    pub show_rho: bool,
    pub show_theta: bool,
    pub show_omega: bool,
}

impl Default for ChannelVisibility {
    fn default() -> Self {
        Self {
            show_gradx: true,
            show_grady: true,
            show_gradz: true,
            show_ssp: true,
            show_rho: true,
            show_theta: true,
            show_omega: true,
        }
    }
}

impl ChannelVisibility {
    pub const CHANNELS: [&'static str; 7] = ["gradx", "grady", "gradz", "ssp", "rho", "theta", "omega"];

    /// Flags in channel order, suitable for `PlotSurface::set_visible_slots`.
    pub fn as_flags(&self) -> Vec<bool> {
        vec![
            self.show_gradx,
            self.show_grady,
            self.show_gradz,
            self.show_ssp,
            self.show_rho,
            self.show_theta,
            self.show_omega,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub bgcolor: ColorSpec,
    pub foreground_color: ColorSpec,
    pub zero_line_plot_show: bool,
    pub zero_line_plot_color: ColorSpec,
    pub zero_line_plot_style: LineStyle,
    pub zero_line_plot_position: ZeroLinePosition,
    pub xaxis_show: bool,
    pub title_show: bool,
    pub line_color_real: ColorSpec,
    pub line_color_imaginary: ColorSpec,
    pub line_color_magnitude: ColorSpec,
    pub line_width: f32,
    #[serde(flatten)]
    pub channels: ChannelVisibility,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            bgcolor: ColorSpec::builtin("white", 0xffffff),
            foreground_color: ColorSpec::builtin("black", 0x000000),
            zero_line_plot_show: true,
            zero_line_plot_color: ColorSpec::builtin("goldenrod", 0xdaa520),
            zero_line_plot_style: LineStyle::Solid,
            zero_line_plot_position: ZeroLinePosition::Middle,
            xaxis_show: false,
            title_show: false,
            line_color_real: ColorSpec::builtin("blue", 0x0000ff),
            line_color_imaginary: ColorSpec::builtin("red", 0xff0000),
            line_color_magnitude: ColorSpec::builtin("purple", 0x800080),
            line_width: 1.0,
            channels: ChannelVisibility::default(),
        }
    }
}

impl Preferences {
    /// Loads preferences from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading preferences from {}", path.display()))?;
        Self::from_json(&text).wrap_err_with(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .wrap_err_with(|| format!("writing preferences to {}", path.display()))?;
        Ok(())
    }
}

/// Key-value access to display preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    /// Replaces one value. Unknown keys and ill-typed values are rejected and
    /// leave the store unchanged.
    fn set(&mut self, key: &str, value: serde_json::Value) -> PlotResult<()>;
}

impl PreferenceStore for Preferences {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        serde_json::to_value(self).ok()?.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> PlotResult<()> {
        let mut tree = serde_json::to_value(&*self)
            .map_err(|e| PlotError::configuration(e.to_string()))?;
        let Some(map) = tree.as_object_mut() else {
            return Err(PlotError::configuration("preferences are not a map"));
        };
        if !map.contains_key(key) {
            return Err(PlotError::configuration(format!("unknown preference '{key}'")));
        }
        map.insert(key.to_string(), value);

        let updated: Preferences = serde_json::from_value(tree).map_err(|e| {
            tracing::warn!("rejected preference {key}: {e}");
            PlotError::configuration(format!("{key}: {e}"))
        })?;
        *self = updated;
        Ok(())
    }
}
