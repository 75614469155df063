use crate::config::SurfaceConfig;
use crate::preferences::{LineStyle, Preferences};
use gpui::*;

/// Resolved colours of a surface.
#[derive(Clone, Debug)]
pub struct PlotTheme {
    pub background: Hsla,
    pub axis_line: Hsla,
    pub axis_label: Hsla,
    pub axis_label_size: Pixels,
    pub zero_line: Option<(Hsla, LineStyle)>,
    pub zoom_fill: Hsla,
    pub reference_fill: Hsla,
}

impl PlotTheme {
    pub fn new(prefs: &Preferences, config: &SurfaceConfig) -> Self {
        let foreground = prefs.foreground_color.hsla();
        Self {
            background: prefs.bgcolor.hsla(),
            axis_line: foreground.opacity(0.6),
            axis_label: foreground,
            axis_label_size: px(11.0),
            zero_line: prefs
                .zero_line_plot_show
                .then(|| (prefs.zero_line_plot_color.hsla(), prefs.zero_line_plot_style)),
            zoom_fill: config.zoom_overlay.color.with_alpha(config.zoom_overlay.alpha),
            reference_fill: config
                .reference_overlay
                .color
                .with_alpha(config.reference_overlay.alpha),
        }
    }
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self::new(&Preferences::default(), &SurfaceConfig::default())
    }
}
