use crate::geometry::{FillRect, LabelAlign, Scene, StrokePath, TextLabel};
use gpui::*;

/// Width reserved for a centred label.
const CENTERED_LABEL_WIDTH: f32 = 80.0;

pub fn paint_scene(scene: &Scene, window: &mut Window) {
    for rect in &scene.background.fills {
        paint_fill(window, rect);
    }
    for stroke in &scene.background.strokes {
        paint_stroke(window, stroke);
    }
    for rect in &scene.overlay.fills {
        paint_fill(window, rect);
    }
}

fn paint_fill(window: &mut Window, rect: &FillRect) {
    window.paint_quad(fill(rect.bounds, rect.color));
}

fn paint_stroke(window: &mut Window, stroke: &StrokePath) {
    let Some((first, rest)) = stroke.points.split_first() else {
        return;
    };
    let mut builder = PathBuilder::stroke(px(stroke.width));
    builder.move_to(*first);
    for p in rest {
        builder.line_to(*p);
    }
    let Ok(path) = builder.build() else {
        return;
    };
    match stroke.clip {
        Some(bounds) => window.with_content_mask(Some(ContentMask { bounds }), |window| {
            window.paint_path(path, stroke.color)
        }),
        None => window.paint_path(path, stroke.color),
    }
}

/// Absolutely positioned label elements, relative to `origin`.
pub fn label_elements(labels: &[TextLabel], origin: Point<Pixels>, size: Pixels) -> Vec<AnyElement> {
    labels
        .iter()
        .map(|label| {
            let left = label.origin.x - origin.x;
            let top = label.origin.y - origin.y;
            let el = div()
                .absolute()
                .top(top)
                .text_color(label.color)
                .text_size(size)
                .whitespace_nowrap();
            match label.align {
                LabelAlign::Left => el.left(left),
                LabelAlign::Center => el
                    .left(left - px(CENTERED_LABEL_WIDTH / 2.0))
                    .w(px(CENTERED_LABEL_WIDTH))
                    .text_align(TextAlign::Center),
            }
            .child(label.text.clone())
            .into_any_element()
        })
        .collect()
}
