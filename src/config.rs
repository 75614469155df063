use crate::data_types::ScalingMode;
use crate::preferences::ColorSpec;
use serde::{Deserialize, Serialize};

/// Which drag gesture the primary button performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomMode {
    #[default]
    None,
    /// Horizontal extent only.
    Span,
    /// Horizontal and vertical extent.
    Box,
}

/// Which host notifications are emitted. Callbacks default to no-ops, so
/// everything is on unless a host opts out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFlags {
    pub zoom_select: bool,
    pub zoom_motion: bool,
    pub reference_select: bool,
    pub reference_motion: bool,
    pub middle_select: bool,
    pub middle_motion: bool,
    pub middle_press: bool,
    pub scroll: bool,
    pub motion: bool,
}

impl Default for EventFlags {
    fn default() -> Self {
        Self {
            zoom_select: true,
            zoom_motion: true,
            reference_select: true,
            reference_motion: true,
            middle_select: true,
            middle_motion: true,
            middle_press: true,
            scroll: true,
            motion: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollTarget {
    /// Rescale only the slot under the pointer.
    #[default]
    Hovered,
    /// Rescale every active slot.
    All,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Apply the vertical rescale after notifying the host.
    pub rescale: bool,
    pub target: ScrollTarget,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            rescale: true,
            target: ScrollTarget::Hovered,
        }
    }
}

/// Fill of a rubber band or reference overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub color: ColorSpec,
    pub alpha: f32,
}

impl OverlayStyle {
    pub fn zoom_default() -> Self {
        Self {
            color: ColorSpec::builtin("yellow", 0xffff00),
            alpha: 0.2,
        }
    }

    pub fn reference_default() -> Self {
        Self {
            color: ColorSpec::builtin("purple", 0x800080),
            alpha: 0.2,
        }
    }
}

/// Construction options of a [`crate::PlotSurface`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub slot_count: usize,
    pub scaling: ScalingMode,
    pub zoom: ZoomMode,
    /// Secondary-button reference span.
    pub reference: bool,
    /// Middle-button reporter.
    pub middle: bool,
    /// One recognizer per slot instead of one shared across active slots.
    pub unlink: bool,
    pub events: EventFlags,
    pub scroll: ScrollConfig,
    /// Fraction of the x data extent added on both sides when autoscaling.
    pub x_scale_bump: f64,
    /// Fraction of the y data extent added on both sides when autoscaling.
    pub y_scale_bump: f64,
    /// Scroll rescale factor per normalised step.
    pub scale_multiplier: f64,
    /// Minimum horizontal extent (data units) for a span or box to commit.
    pub min_span: Option<f64>,
    /// Minimum vertical extent (data units) for a box to commit.
    pub min_span_y: Option<f64>,
    pub zoom_overlay: OverlayStyle,
    pub reference_overlay: OverlayStyle,
    pub x_title: String,
    pub plot_titles: Vec<String>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            slot_count: 2,
            scaling: ScalingMode::Global,
            zoom: ZoomMode::None,
            reference: false,
            middle: false,
            unlink: false,
            events: EventFlags::default(),
            scroll: ScrollConfig::default(),
            x_scale_bump: 0.0,
            y_scale_bump: 0.0,
            scale_multiplier: 1.25,
            min_span: None,
            min_span_y: None,
            zoom_overlay: OverlayStyle::zoom_default(),
            reference_overlay: OverlayStyle::reference_default(),
            x_title: "Points".to_string(),
            plot_titles: Vec::new(),
        }
    }
}

impl SurfaceConfig {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            ..Default::default()
        }
    }

    pub fn with_zoom(mut self, zoom: ZoomMode) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_reference(mut self, enabled: bool) -> Self {
        self.reference = enabled;
        self
    }

    pub fn with_middle(mut self, enabled: bool) -> Self {
        self.middle = enabled;
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn unlinked(mut self) -> Self {
        self.unlink = true;
        self
    }

    pub fn with_padding(mut self, x_scale_bump: f64, y_scale_bump: f64) -> Self {
        self.x_scale_bump = x_scale_bump;
        self.y_scale_bump = y_scale_bump;
        self
    }
}
