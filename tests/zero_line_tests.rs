mod common;

use common::*;
use gpui::MouseButton;
use gpui_stairs::preferences::ZeroLinePosition;
use gpui_stairs::{PlotSurface, Preferences, ScaleAnchor, SurfaceConfig, ZoomMode};

fn placed(position: ZeroLinePosition) -> (PlotSurface, Recorder) {
    let prefs = Preferences {
        zero_line_plot_position: position,
        ..Preferences::default()
    };
    surface_with_prefs(SurfaceConfig::new(2).with_zoom(ZoomMode::Span), prefs)
}

fn assert_y(s: &PlotSurface, slot: usize, min: f64, max: f64) {
    let y = s.y_limits(slot).unwrap();
    assert_close(y.min, min);
    assert_close(y.max, max);
}

#[test]
fn test_autoscale_places_zero_line() {
    let (s, _rec) = placed(ZeroLinePosition::Middle);
    assert_y(&s, 0, -4.0, 4.0);

    let (s, _rec) = placed(ZeroLinePosition::Top);
    assert_y(&s, 0, -4.0, 0.4);
    assert_y(&s, 1, -4.0, 0.4);

    let (s, _rec) = placed(ZeroLinePosition::Bottom);
    assert_y(&s, 0, -0.4, 4.0);
}

#[test]
fn test_autoscale_padding_keeps_edge_split() {
    let prefs = Preferences {
        zero_line_plot_position: ZeroLinePosition::Bottom,
        ..Preferences::default()
    };
    let (s, _rec) = surface_with_prefs(SurfaceConfig::new(1).with_padding(0.0, 0.05), prefs);
    assert_y(&s, 0, -0.44, 4.4);
}

#[test]
fn test_zoom_reset_keeps_position() {
    for (position, min, max) in [
        (ZeroLinePosition::Top, -4.0, 0.4),
        (ZeroLinePosition::Middle, -4.0, 4.0),
        (ZeroLinePosition::Bottom, -0.4, 4.0),
    ] {
        let (mut s, _rec) = placed(position);
        s.set_vertical_scale(3.0, Some(0), ScaleAnchor::Zero).unwrap();
        let p = at(&s, 0, 20.0, 0.0);
        click(&mut s, MouseButton::Left, p);
        assert_y(&s, 0, min, max);
    }
}

#[test]
fn test_scroll_about_zero_keeps_position() {
    let (mut s, _rec) = placed(ZeroLinePosition::Top);
    let p = at(&s, 0, 50.0, -1.0);
    scroll(&mut s, p, 3.0, false);
    assert_close(s.vertical_scale(0).unwrap(), 3.2);
    assert_y(&s, 0, -3.2, 0.32);
    assert_y(&s, 1, -4.0, 0.4);

    let (mut s, _rec) = placed(ZeroLinePosition::Bottom);
    let p = at(&s, 1, 50.0, 1.0);
    scroll(&mut s, p, -3.0, false);
    assert_y(&s, 1, -0.5, 5.0);
}

#[test]
fn test_reset_y_limits_and_absolute_scale_use_position() {
    let (mut s, _rec) = placed(ZeroLinePosition::Bottom);
    s.set_vertical_scale_absolute(&[10.0, 20.0], false).unwrap();
    assert_y(&s, 0, -1.0, 10.0);
    assert_y(&s, 1, -2.0, 20.0);

    s.reset_y_limits();
    assert_y(&s, 0, -0.4, 4.0);
}

#[test]
fn test_changing_position_rederives_limits() {
    let (mut s, _rec) = placed(ZeroLinePosition::Middle);
    s.set_vertical_scale_absolute(&[10.0, 10.0], false).unwrap();

    let mut prefs = s.preferences().clone();
    prefs.zero_line_plot_position = ZeroLinePosition::Top;
    s.set_preferences(prefs);
    assert_y(&s, 0, -10.0, 1.0);
    assert_close(s.vertical_scale(0).unwrap(), 10.0);
}
