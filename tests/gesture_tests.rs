mod common;

use common::*;
use gpui::{point, px, MouseButton};
use gpui_stairs::{InputEvent, Redraw, SurfaceConfig, ZoomMode};

fn zoom_surface() -> (gpui_stairs::PlotSurface, Recorder) {
    surface_with(SurfaceConfig::new(3).with_zoom(ZoomMode::Span))
}

#[test]
fn test_span_zoom_commits_and_notifies() {
    let (mut s, rec) = zoom_surface();
    let from = at(&s, 0, 10.0, 0.0);
    let to = at(&s, 0, 40.0, 0.0);

    assert_eq!(drag_gesture(&mut s, MouseButton::Left, from, to), Redraw::Full);

    let selects = rec.zoom_selects();
    assert_eq!(selects.len(), 1);
    assert_close(selects[0].x_min, 10.0);
    assert_close(selects[0].x_max, 40.0);
    assert!(!selects[0].reset);
    assert_eq!(selects[0].slot, 0);

    // linked: every active slot follows
    for slot in 0..3 {
        let x = s.x_limits(slot).unwrap();
        assert_close(x.min, 10.0);
        assert_close(x.max, 40.0);
    }
}

#[test]
fn test_span_zoom_order_normalized() {
    let (mut s, rec) = zoom_surface();
    let from = at(&s, 1, 40.0, 0.0);
    let to = at(&s, 1, 10.0, 0.0);
    drag_gesture(&mut s, MouseButton::Left, from, to);

    let z = &rec.zoom_selects()[0];
    assert!(z.x_min < z.x_max);
    assert_close(z.x_min, 10.0);
    assert_close(z.x_max, 40.0);
}

#[test]
fn test_click_resets_zoom() {
    let (mut s, rec) = zoom_surface();
    let from = at(&s, 0, 10.0, 0.0);
    let to = at(&s, 0, 40.0, 0.0);
    drag_gesture(&mut s, MouseButton::Left, from, to);
    s.set_vertical_scale(3.0, Some(0), gpui_stairs::ScaleAnchor::Zero)
        .unwrap();
    rec.clear();

    let p = at(&s, 0, 20.0, 0.0);
    assert_eq!(click(&mut s, MouseButton::Left, p), Redraw::Full);

    let selects = rec.zoom_selects();
    assert_eq!(selects.len(), 1);
    assert!(selects[0].reset);
    assert_eq!(selects[0].value, 0.0);
    let x = s.x_limits(0).unwrap();
    assert_close(x.min, 0.0);
    assert_close(x.max, 100.0);
    assert_close(s.vertical_scale(0).unwrap(), 4.0);
    let y = s.y_limits(0).unwrap();
    assert_close(y.min, -4.0);
    assert_close(y.max, 4.0);
}

#[test]
fn test_span_below_minimum_is_discarded() {
    let mut config = SurfaceConfig::new(2).with_zoom(ZoomMode::Span);
    config.min_span = Some(20.0);
    let (mut s, rec) = surface_with(config);

    let from = at(&s, 0, 10.0, 0.0);
    let to = at(&s, 0, 20.0, 0.0);
    assert_eq!(drag_gesture(&mut s, MouseButton::Left, from, to), Redraw::Overlay);

    assert!(rec.zoom_selects().is_empty());
    let x = s.x_limits(0).unwrap();
    assert_close(x.min, 0.0);
    assert_close(x.max, 100.0);
}

#[test]
fn test_zoom_motion_throttled_per_frame() {
    let (mut s, rec) = zoom_surface();
    let is_zoom_motion = |n: &Note| matches!(n, Note::ZoomMotion(_));

    let p = at(&s, 0, 10.0, 0.0);
    press(&mut s, MouseButton::Left, p);
    let p = at(&s, 0, 20.0, 0.0);
    drag(&mut s, MouseButton::Left, p);
    let p = at(&s, 0, 30.0, 0.0);
    drag(&mut s, MouseButton::Left, p);
    assert_eq!(rec.count(is_zoom_motion), 1);

    s.end_frame();
    let p = at(&s, 0, 35.0, 0.0);
    drag(&mut s, MouseButton::Left, p);
    assert_eq!(rec.count(is_zoom_motion), 2);
}

#[test]
fn test_generic_motion_suppressed_during_drag() {
    let (mut s, rec) = zoom_surface();
    let is_motion = |n: &Note| matches!(n, Note::Motion(_));

    let p = at(&s, 0, 30.0, 0.0);
    hover(&mut s, p);
    assert_eq!(rec.count(is_motion), 1);
    match &rec.notes()[0] {
        Note::Motion(m) => {
            assert_eq!(m.slot, 0);
            assert_eq!(m.value, -2.0);
            assert_close(m.bounds.x_max, 100.0);
            assert_close(m.bounds.y_max, 4.0);
        }
        other => panic!("unexpected {other:?}"),
    }

    let p = at(&s, 0, 10.0, 0.0);
    press(&mut s, MouseButton::Left, p);
    let p = at(&s, 0, 20.0, 0.0);
    drag(&mut s, MouseButton::Left, p);
    assert_eq!(rec.count(is_motion), 1);
}

#[test]
fn test_generic_motion_kept_when_gesture_motion_disabled() {
    let mut config = SurfaceConfig::new(2).with_zoom(ZoomMode::Span);
    config.events.zoom_motion = false;
    let (mut s, rec) = surface_with(config);

    let p = at(&s, 0, 10.0, 0.0);
    press(&mut s, MouseButton::Left, p);
    let p = at(&s, 0, 20.0, 0.0);
    drag(&mut s, MouseButton::Left, p);

    assert_eq!(rec.count(|n| matches!(n, Note::Motion(_))), 1);
    assert_eq!(rec.count(|n| matches!(n, Note::ZoomMotion(_))), 0);
}

#[test]
fn test_reference_span_commit_and_toggle() {
    let (mut s, rec) = surface_with(SurfaceConfig::new(2).with_reference(true));
    assert!(!s.reference_visible());

    let from = at(&s, 0, 10.0, 0.0);
    let to = at(&s, 0, 40.0, 0.0);
    drag_gesture(&mut s, MouseButton::Right, from, to);

    let span = s.reference_span().unwrap();
    assert_close(span.min, 10.0);
    assert_close(span.max, 40.0);
    assert!(s.reference_visible());
    // zoom limits untouched
    assert_close(s.x_limits(0).unwrap().min, 0.0);

    let selects = rec.reference_selects();
    assert_eq!(selects.len(), 1);
    assert!(!selects[0].reset);
    let m = &selects[0].measurements;
    assert_eq!(m.len(), 2);
    assert_close(m[0].area, -15.0);
    assert_close(m[0].rms, 2.5_f64.sqrt());

    let p = at(&s, 1, 60.0, 0.0);
    assert_eq!(click(&mut s, MouseButton::Right, p), Redraw::Full);
    assert!(!s.reference_visible());
    let last = rec.reference_selects().pop().unwrap();
    assert!(last.reset);
    assert_eq!(last.slot, 1);
    assert_close(last.x_min, 60.0);

    click(&mut s, MouseButton::Right, p);
    assert!(s.reference_visible());
    assert!(s.reference_span().is_some());
}

#[test]
fn test_reference_overlay_drawn_when_visible() {
    let (mut s, _rec) = surface_with(SurfaceConfig::new(2).with_reference(true));
    assert!(s.scene().overlay.is_empty());

    let from = at(&s, 0, 10.0, 0.0);
    let to = at(&s, 0, 40.0, 0.0);
    drag_gesture(&mut s, MouseButton::Right, from, to);
    assert_eq!(s.scene().overlay.fills.len(), 2);

    click(&mut s, MouseButton::Right, to);
    assert!(s.scene().overlay.is_empty());
}

#[test]
fn test_box_zoom_sets_both_axes() {
    let (mut s, rec) = surface_with(SurfaceConfig::new(2).with_zoom(ZoomMode::Box));
    let from = at(&s, 1, 10.0, 1.0);
    let to = at(&s, 1, 40.0, 3.0);
    drag_gesture(&mut s, MouseButton::Left, from, to);

    let z = &rec.zoom_selects()[0];
    assert_close(z.y_min.unwrap(), 1.0);
    assert_close(z.y_max.unwrap(), 3.0);
    let x = s.x_limits(1).unwrap();
    let y = s.y_limits(1).unwrap();
    assert_close(x.min, 10.0);
    assert_close(x.max, 40.0);
    assert_close(y.min, 1.0);
    assert_close(y.max, 3.0);
}

#[test]
fn test_box_zoom_release_outside_slot_discarded() {
    let (mut s, rec) = surface_with(SurfaceConfig::new(2).with_zoom(ZoomMode::Box));
    let from = at(&s, 0, 10.0, 1.0);
    let to = at(&s, 1, 40.0, 3.0);
    drag_gesture(&mut s, MouseButton::Left, from, to);

    assert!(rec.zoom_selects().is_empty());
    assert_close(s.x_limits(0).unwrap().max, 100.0);
}

#[test]
fn test_box_zoom_click_resets() {
    let (mut s, rec) = surface_with(SurfaceConfig::new(2).with_zoom(ZoomMode::Box));
    let p = at(&s, 0, 50.0, 0.0);
    click(&mut s, MouseButton::Left, p);
    let z = &rec.zoom_selects()[0];
    assert!(z.reset);
}

#[test]
fn test_middle_button_reports_pixels() {
    let (mut s, rec) = surface_with(SurfaceConfig::new(2).with_middle(true));
    let a = at(&s, 1, 20.0, 0.0);
    let b = point(a.x + px(30.0), a.y);
    let c = point(a.x + px(50.0), a.y + px(10.0));

    // middle reports leave the drawing alone
    assert_eq!(press(&mut s, MouseButton::Middle, a), Redraw::None);
    assert_eq!(drag(&mut s, MouseButton::Middle, b), Redraw::None);
    assert_eq!(release(&mut s, MouseButton::Middle, c), Redraw::None);

    let notes: Vec<Note> = rec
        .notes()
        .into_iter()
        .filter(|n| !matches!(n, Note::Motion(_)))
        .collect();
    assert_eq!(notes.len(), 3);
    match &notes[0] {
        Note::MiddlePress(p) => {
            assert_eq!(p.screen, a);
            assert_eq!(p.slot, 1);
            assert_close(p.data.x, 20.0);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &notes[1] {
        Note::MiddleMotion(m) => {
            assert_eq!(m.current, b);
            assert_eq!(m.previous, a);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &notes[2] {
        Note::MiddleSelect(m) => {
            assert_eq!(m.start, a);
            assert_eq!(m.end, c);
            assert_eq!(m.slot, 1);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_unlinked_zoom_touches_one_slot() {
    let (mut s, _rec) = surface_with(SurfaceConfig::new(3).with_zoom(ZoomMode::Span).unlinked());
    let from = at(&s, 1, 10.0, 0.0);
    let to = at(&s, 1, 40.0, 0.0);
    drag_gesture(&mut s, MouseButton::Left, from, to);

    assert_close(s.x_limits(1).unwrap().min, 10.0);
    assert_close(s.x_limits(0).unwrap().min, 0.0);
    assert_close(s.x_limits(2).unwrap().min, 0.0);
}

#[test]
fn test_focus_lost_cancels_drag() {
    let (mut s, rec) = zoom_surface();
    let p = at(&s, 0, 10.0, 0.0);
    press(&mut s, MouseButton::Left, p);
    let p = at(&s, 0, 40.0, 0.0);
    drag(&mut s, MouseButton::Left, p);
    assert!(s.is_dragging());

    assert_eq!(s.dispatch(InputEvent::FocusLost), Redraw::Overlay);
    assert!(!s.is_dragging());
    assert!(s.scene().overlay.is_empty());

    release(&mut s, MouseButton::Left, p);
    assert!(rec.zoom_selects().is_empty());
    assert_close(s.x_limits(0).unwrap().max, 100.0);
}

#[test]
fn test_disabled_gestures_ignore_presses() {
    let (mut s, rec) = zoom_surface();
    s.set_gestures_enabled(false);
    let from = at(&s, 0, 10.0, 0.0);
    let to = at(&s, 0, 40.0, 0.0);
    assert_eq!(drag_gesture(&mut s, MouseButton::Left, from, to), Redraw::None);
    assert!(rec.zoom_selects().is_empty());

    s.set_gestures_enabled(true);
    drag_gesture(&mut s, MouseButton::Left, from, to);
    assert_eq!(rec.zoom_selects().len(), 1);
}

#[test]
fn test_hidden_slot_takes_no_press() {
    let (mut s, rec) = zoom_surface();
    s.set_visible_slots(&[true, false, true]).unwrap();
    assert!(s.data_to_screen(1, gpui::Point::new(10.0, 0.0)).is_none());

    let from = at(&s, 2, 10.0, 0.0);
    let to = at(&s, 2, 40.0, 0.0);
    drag_gesture(&mut s, MouseButton::Left, from, to);
    assert_eq!(rec.zoom_selects()[0].slot, 2);
    assert_close(s.x_limits(0).unwrap().min, 10.0);
    // hidden slots keep their limits
    assert_close(s.x_limits(1).unwrap().min, 0.0);
}

#[test]
fn test_background_reused_during_drag() {
    let (mut s, _rec) = zoom_surface();
    s.scene();
    s.scene();
    assert_eq!(s.background_builds(), 1);

    let p = at(&s, 0, 10.0, 0.0);
    press(&mut s, MouseButton::Left, p);
    let p = at(&s, 0, 40.0, 0.0);
    assert_eq!(drag(&mut s, MouseButton::Left, p), Redraw::Overlay);
    let scene = s.scene();
    assert_eq!(scene.overlay.fills.len(), 3);
    assert_eq!(s.background_builds(), 1);

    release(&mut s, MouseButton::Left, p);
    s.scene();
    assert_eq!(s.background_builds(), 2);
}
