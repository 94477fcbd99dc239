//! # Latency Chart
//!
//! Paints the per-packet latency series with the egui painter: grid, axes with
//! tick labels, the latency polyline, title, axis labels and a legend.
//!
//! Hovering the plot area highlights the nearest packet and shows its latency.

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};

use super::chart_layout::{ChartBounds, format_tick, index_ticks, map_to_screen, nice_step, nice_ticks};

pub const CHART_TITLE: &str = "Latencia por Paquete";
pub const X_AXIS_LABEL: &str = "Paquete";
pub const Y_AXIS_LABEL: &str = "Latencia (s)";
pub const LEGEND_LABEL: &str = "Latencia";

/// Space around the plot area for title, tick labels and axis labels.
const MARGIN_LEFT: f32 = 80.0;
const MARGIN_RIGHT: f32 = 24.0;
const MARGIN_TOP: f32 = 44.0;
const MARGIN_BOTTOM: f32 = 56.0;

/// Approximate number of grid intervals per axis.
const X_TICK_TARGET: usize = 8;
const Y_TICK_TARGET: usize = 6;

/// Line color of the series (a medium blue).
const SERIES_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

pub struct LatencyChartApp {
    latencies: Vec<f64>,
    bounds: ChartBounds,
}

impl LatencyChartApp {
    pub fn new(latencies: Vec<f64>) -> Self {
        let bounds = ChartBounds::from_latencies(&latencies);
        Self { latencies, bounds }
    }

    fn to_screen(&self, plot: Rect, index: usize, latency: f64) -> Pos2 {
        egui::pos2(
            map_to_screen(index as f64, self.bounds.x_min, self.bounds.x_max, plot.left(), plot.right()),
            map_to_screen(latency, self.bounds.y_min, self.bounds.y_max, plot.bottom(), plot.top()),
        )
    }

    fn paint_grid(&self, painter: &egui::Painter, plot: Rect, text_color: Color32) {
        let grid_stroke = Stroke::new(1.0, Color32::from_gray(90));
        let tick_font = FontId::proportional(12.0);

        let x_step = nice_step(self.bounds.x_min, self.bounds.x_max, X_TICK_TARGET).max(1.0).round();
        for x in index_ticks(self.bounds.x_min, self.bounds.x_max, X_TICK_TARGET) {
            let sx = map_to_screen(x, self.bounds.x_min, self.bounds.x_max, plot.left(), plot.right());
            painter.line_segment([egui::pos2(sx, plot.top()), egui::pos2(sx, plot.bottom())], grid_stroke);
            painter.text(
                egui::pos2(sx, plot.bottom() + 6.0),
                Align2::CENTER_TOP,
                format_tick(x, x_step),
                tick_font.clone(),
                text_color,
            );
        }

        let y_step = nice_step(self.bounds.y_min, self.bounds.y_max, Y_TICK_TARGET);
        for y in nice_ticks(self.bounds.y_min, self.bounds.y_max, Y_TICK_TARGET) {
            let sy = map_to_screen(y, self.bounds.y_min, self.bounds.y_max, plot.bottom(), plot.top());
            painter.line_segment([egui::pos2(plot.left(), sy), egui::pos2(plot.right(), sy)], grid_stroke);
            painter.text(
                egui::pos2(plot.left() - 6.0, sy),
                Align2::RIGHT_CENTER,
                format_tick(y, y_step),
                tick_font.clone(),
                text_color,
            );
        }
    }

    fn paint_axes(&self, painter: &egui::Painter, full: Rect, plot: Rect, text_color: Color32) {
        let axis_stroke = Stroke::new(1.5, text_color);
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
        painter.line_segment([plot.left_bottom(), plot.left_top()], axis_stroke);

        painter.text(
            egui::pos2(plot.center().x, full.top() + 10.0),
            Align2::CENTER_TOP,
            CHART_TITLE,
            FontId::proportional(18.0),
            text_color,
        );
        painter.text(
            egui::pos2(plot.center().x, full.bottom() - 8.0),
            Align2::CENTER_BOTTOM,
            X_AXIS_LABEL,
            FontId::proportional(14.0),
            text_color,
        );

        // Y label runs bottom-to-top along the left edge
        let galley = painter.layout_no_wrap(Y_AXIS_LABEL.to_string(), FontId::proportional(14.0), text_color);
        let pos = egui::pos2(full.left() + 8.0, plot.center().y + galley.size().x / 2.0);
        painter.add(egui::epaint::TextShape::new(pos, galley, text_color).with_angle(-std::f32::consts::FRAC_PI_2));
    }

    fn paint_series(&self, painter: &egui::Painter, plot: Rect) {
        let stroke = Stroke::new(2.0, SERIES_COLOR);

        // Non-finite latencies break the line instead of stretching it
        let mut segment: Vec<Pos2> = Vec::new();
        for (index, &latency) in self.latencies.iter().enumerate() {
            if latency.is_finite() {
                segment.push(self.to_screen(plot, index, latency));
            } else if !segment.is_empty() {
                flush_segment(painter, std::mem::take(&mut segment), stroke);
            }
        }
        flush_segment(painter, segment, stroke);
    }

    fn paint_legend(&self, painter: &egui::Painter, plot: Rect, background: Color32, text_color: Color32) {
        let galley = painter.layout_no_wrap(LEGEND_LABEL.to_string(), FontId::proportional(13.0), text_color);
        let sample_width = 28.0;
        let size = egui::vec2(sample_width + 18.0 + galley.size().x, galley.size().y + 10.0);
        let rect = Rect::from_min_size(egui::pos2(plot.right() - size.x - 10.0, plot.top() + 10.0), size);

        painter.rect_filled(rect, 3.0, background);
        let border = Stroke::new(1.0, Color32::from_gray(120));
        painter.line_segment([rect.left_top(), rect.right_top()], border);
        painter.line_segment([rect.right_top(), rect.right_bottom()], border);
        painter.line_segment([rect.right_bottom(), rect.left_bottom()], border);
        painter.line_segment([rect.left_bottom(), rect.left_top()], border);

        let y = rect.center().y;
        painter.line_segment(
            [egui::pos2(rect.left() + 6.0, y), egui::pos2(rect.left() + 6.0 + sample_width, y)],
            Stroke::new(2.0, SERIES_COLOR),
        );
        painter.galley(egui::pos2(rect.left() + sample_width + 12.0, y - galley.size().y / 2.0), galley, text_color);
    }

    fn paint_hover(&self, painter: &egui::Painter, plot: Rect, pointer: Pos2, text_color: Color32) {
        if !plot.contains(pointer) || self.latencies.is_empty() {
            return;
        }

        let span = self.bounds.x_max - self.bounds.x_min;
        let t = ((pointer.x - plot.left()) / plot.width()) as f64;
        let index = (self.bounds.x_min + t * span).round().clamp(0.0, (self.latencies.len() - 1) as f64) as usize;
        let latency = self.latencies[index];
        if !latency.is_finite() {
            return;
        }

        let pos = self.to_screen(plot, index, latency);
        painter.circle_filled(pos, 4.0, SERIES_COLOR);
        painter.text(
            pos + egui::vec2(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!("#{}: {:.6} s", index, latency),
            FontId::monospace(12.0),
            text_color,
        );
    }
}

fn flush_segment(painter: &egui::Painter, points: Vec<Pos2>, stroke: Stroke) {
    match points.len() {
        0 => {}
        1 => {
            painter.circle_filled(points[0], stroke.width, stroke.color);
        }
        _ => {
            painter.add(egui::Shape::line(points, stroke));
        }
    }
}

impl eframe::App for LatencyChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let full = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(full, egui::Sense::hover());
            let painter = ui.painter_at(full);

            let plot = Rect::from_min_max(
                egui::pos2(full.left() + MARGIN_LEFT, full.top() + MARGIN_TOP),
                egui::pos2(full.right() - MARGIN_RIGHT, full.bottom() - MARGIN_BOTTOM),
            );
            if plot.width() <= 0.0 || plot.height() <= 0.0 {
                return;
            }

            let text_color = ui.visuals().text_color();
            let background = ui.visuals().extreme_bg_color;

            painter.rect_filled(plot, 0.0, background);
            self.paint_grid(&painter, plot, text_color);
            self.paint_series(&painter, plot);
            self.paint_axes(&painter, full, plot, text_color);
            self.paint_legend(&painter, plot, ui.visuals().panel_fill, text_color);

            if let Some(pointer) = response.hover_pos() {
                self.paint_hover(&painter, plot, pointer, text_color);
            }
        });
    }
}
