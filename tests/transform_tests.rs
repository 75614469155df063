use gpui::{px, Bounds, Point, Size};
use gpui_stairs::data_types::AxisRange;
use gpui_stairs::scales::ChartScale;
use gpui_stairs::transform::PlotTransform;

#[test]
fn test_chart_scale_linear() {
    let scale = ChartScale::new_linear((0.0, 100.0), (0.0, 500.0));

    assert_eq!(scale.map(0.0), 0.0);
    assert_eq!(scale.map(50.0), 250.0);
    assert_eq!(scale.map(100.0), 500.0);

    assert_eq!(scale.invert(0.0), 0.0);
    assert_eq!(scale.invert(250.0), 50.0);
    assert_eq!(scale.invert(500.0), 100.0);
}

#[test]
fn test_flat_domain_widened() {
    let scale = ChartScale::new_linear((2.0, 2.0), (0.0, 100.0));
    assert_eq!(scale.domain(), (1.5, 2.5));
    assert_eq!(scale.map(2.0), 50.0);
}

#[test]
fn test_plot_transform() {
    let x_scale = ChartScale::new_linear((0.0, 100.0), (0.0, 200.0));
    let y_scale = ChartScale::new_linear((0.0, 100.0), (200.0, 0.0));

    let bounds = Bounds::new(
        Point::new(px(0.0), px(0.0)),
        Size::new(px(200.0), px(200.0)),
    );
    let transform = PlotTransform::new(x_scale, y_scale, bounds);

    let p_screen_origin = transform.data_to_screen(Point::new(0.0, 0.0));
    assert_eq!(p_screen_origin.x, px(0.0));
    assert_eq!(p_screen_origin.y, px(200.0));

    let p_screen_center = transform.data_to_screen(Point::new(50.0, 50.0));
    assert_eq!(p_screen_center.x, px(100.0));
    assert_eq!(p_screen_center.y, px(100.0));

    let p_restored = transform.screen_to_data(p_screen_center);
    assert!((p_restored.x - 50.0).abs() < 0.001);
    assert!((p_restored.y - 50.0).abs() < 0.001);
}

#[test]
fn test_transform_for_ranges_offset_frame() {
    // second row of a stacked layout
    let bounds = Bounds::new(
        Point::new(px(10.0), px(300.0)),
        Size::new(px(400.0), px(300.0)),
    );
    let t = PlotTransform::for_ranges(
        &AxisRange::new(0.0, 100.0),
        &AxisRange::new(-4.0, 4.0),
        bounds,
    );

    let zero = t.data_to_screen(Point::new(0.0, 0.0));
    assert_eq!(zero.x, px(10.0));
    assert_eq!(zero.y, px(450.0));
    assert_eq!(t.y_data_to_screen(4.0), px(300.0));

    let back = t.screen_to_data(Point::new(px(210.0), px(375.0)));
    assert!((back.x - 50.0).abs() < 1e-4);
    assert!((back.y - 2.0).abs() < 1e-4);
}
