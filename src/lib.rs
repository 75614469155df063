//! gpui_stairs: interactive multi-pane stair plots for GPUI

pub mod config;
pub mod data_types;
pub mod error;
pub mod geometry;
pub mod gestures;
pub mod host;
pub mod layout;
pub mod measure;
pub mod plot_view;
pub mod preferences;
pub mod scales;
pub mod surface;
pub mod theme;
pub mod transform;
pub mod view_controller;

pub use config::{EventFlags, ScrollConfig, ScrollTarget, SurfaceConfig, ZoomMode};
pub use data_types::{AxisDomain, AxisRange, ScalingMode, Span, StairSeries};
pub use error::{PlotError, PlotResult};
pub use gestures::InputEvent;
pub use host::{NoopHost, PlotHost};
pub use measure::SlotMeasurement;
pub use plot_view::StairPlotView;
pub use preferences::{Preferences, ZeroLinePosition};
pub use surface::{PlotSurface, Redraw};
pub use view_controller::ScaleAnchor;
