//! Line chart of one metric across the run history.

use std::ops::RangeInclusive;

use crate::dashboard::{Metric, SeriesPoint};
use crate::egui_app::ui::style;
use crate::egui_app::view_model;
use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Shape, StrokeKind, Ui, pos2, vec2};

const CHART_HEIGHT: f32 = 220.0;
const AXIS_GUTTER: f32 = 56.0;
const LABEL_GUTTER: f32 = 22.0;
const GRID_LINES: usize = 4;

pub(super) fn render(
    ui: &mut Ui,
    points: &[SeriesPoint],
    value_range: RangeInclusive<f64>,
    metric: Metric,
) {
    let palette = style::palette();
    let size = vec2(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let outer = response.rect;
    painter.rect_filled(outer, 0.0, palette.bg_primary);
    painter.rect_stroke(outer, 0.0, style::outer_border(), StrokeKind::Inside);

    let plot = Rect::from_min_max(
        pos2(outer.left() + AXIS_GUTTER, outer.top() + 12.0),
        pos2(outer.right() - 16.0, outer.bottom() - LABEL_GUTTER),
    );
    let font = FontId::proportional(11.0);
    let (min, max) = (*value_range.start(), *value_range.end());
    let span = (max - min).max(f64::EPSILON);
    let to_y = |value: f64| plot.bottom() - (((value - min) / span) as f32) * plot.height();

    for step in 0..=GRID_LINES {
        let value = min + span * step as f64 / GRID_LINES as f64;
        let y = to_y(value);
        painter.line_segment(
            [pos2(plot.left(), y), pos2(plot.right(), y)],
            style::chart_grid(),
        );
        painter.text(
            pos2(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            view_model::percent(value),
            font.clone(),
            palette.text_muted,
        );
    }

    if points.is_empty() {
        painter.text(
            plot.center(),
            Align2::CENTER_CENTER,
            "No history to plot",
            FontId::proportional(13.0),
            palette.text_muted,
        );
        return;
    }

    let positions: Vec<Pos2> = points
        .iter()
        .enumerate()
        .map(|(index, point)| pos2(x_position(plot, index, points.len()), to_y(point.value)))
        .collect();
    if positions.len() > 1 {
        painter.add(Shape::line(positions.clone(), style::series_stroke()));
    }
    for position in &positions {
        painter.circle_filled(*position, 3.0, palette.accent_mint);
    }

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let baseline = outer.bottom() - LABEL_GUTTER / 2.0;
        painter.text(
            pos2(plot.left(), baseline),
            Align2::LEFT_CENTER,
            &first.label,
            font.clone(),
            palette.text_muted,
        );
        if points.len() > 1 {
            painter.text(
                pos2(plot.right(), baseline),
                Align2::RIGHT_CENTER,
                &last.label,
                font.clone(),
                palette.text_muted,
            );
        }
    }
    painter.text(
        pos2(plot.right(), plot.top()),
        Align2::RIGHT_TOP,
        metric.label(),
        font,
        palette.accent_mint,
    );

    let Some(pointer) = response.hover_pos() else {
        return;
    };
    let Some(index) = nearest_index(plot, pointer.x, points.len()) else {
        return;
    };
    let position = positions[index];
    painter.circle_stroke(position, 6.0, egui::Stroke::new(1.5, palette.accent_ice));
    let point = &points[index];
    response.on_hover_text_at_pointer(format!(
        "{}\n{}: {}",
        point.label,
        metric.label(),
        view_model::percent(point.value)
    ));
}

fn x_position(plot: Rect, index: usize, count: usize) -> f32 {
    if count <= 1 {
        return plot.center().x;
    }
    plot.left() + plot.width() * index as f32 / (count - 1) as f32
}

fn nearest_index(plot: Rect, x: f32, count: usize) -> Option<usize> {
    if count == 0 || x < plot.left() - 8.0 || x > plot.right() + 8.0 {
        return None;
    }
    if count == 1 {
        return Some(0);
    }
    let fraction = ((x - plot.left()) / plot.width()).clamp(0.0, 1.0);
    Some((fraction * (count - 1) as f32).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 50.0))
    }

    #[test]
    fn single_point_is_centred() {
        assert_eq!(x_position(plot(), 0, 1), 50.0);
    }

    #[test]
    fn points_span_the_plot_width() {
        assert_eq!(x_position(plot(), 0, 3), 0.0);
        assert_eq!(x_position(plot(), 1, 3), 50.0);
        assert_eq!(x_position(plot(), 2, 3), 100.0);
    }

    #[test]
    fn hover_snaps_to_nearest_point() {
        assert_eq!(nearest_index(plot(), 40.0, 3), Some(1));
        assert_eq!(nearest_index(plot(), 2.0, 3), Some(0));
        assert_eq!(nearest_index(plot(), 500.0, 3), None);
        assert_eq!(nearest_index(plot(), 10.0, 0), None);
    }
}
