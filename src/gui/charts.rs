use eframe::egui::{
    self,
    pos2,
    vec2,
    Align2,
    Color32,
    FontId,
    Painter,
    Rect,
    Sense,
    Stroke,
    StrokeKind,
    Ui,
};

use super::theme::Palette;
use crate::{
    analysis::{
        discount::max_discount,
        BoxStats,
        CategoryDiscounts,
        FrequencyTable,
    },
    core::PbClass,
};

// Bar chart
const BAR_ROW_HEIGHT: f32 = 24.0;
const BAR_LABEL_WIDTH: f32 = 130.0;
const BAR_COUNT_WIDTH: f32 = 36.0;
const BAR_FILL: f32 = 0.7;

// Box plot
const BOX_PLOT_HEIGHT: f32 = 280.0;
const BOX_GROUP_MIN_WIDTH: f32 = 64.0;
const BOX_AXIS_WIDTH: f32 = 40.0;
const BOX_LABEL_HEIGHT: f32 = 56.0;
const BOX_WIDTH_RATIO: f32 = 0.6;
const AXIS_STEP: f64 = 10.0;

const LABEL_GAP: f32 = 6.0;
const EMPTY_CHART_HEIGHT: f32 = 40.0;

fn empty_chart(ui: &mut Ui, palette: &Palette) {
    ui.add_sized(
        [ui.available_width(), EMPTY_CHART_HEIGHT],
        egui::Label::new(palette.weak("No data")),
    );
}

/// Horizontal bar chart of a ranked hashtag table, highest frequency on top.
pub fn hashtag_bar_chart(ui: &mut Ui, title: &str, table: &FrequencyTable, color: Color32, palette: &Palette) {
    ui.label(palette.heading(title));
    ui.horizontal(|ui| {
        ui.label(palette.weak("x: Frequency"));
        ui.label(palette.weak("y: Hashtag"));
    });

    if table.is_empty() {
        empty_chart(ui, palette);
        return;
    }

    let width = ui.available_width();
    let height = table.len() as f32 * BAR_ROW_HEIGHT;
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
    let rect = response.rect;

    let font = FontId::proportional(ui.style().text_styles[&egui::TextStyle::Body].size);
    let bar_left = rect.left() + BAR_LABEL_WIDTH;
    let bar_span = (rect.right() - BAR_COUNT_WIDTH - bar_left).max(1.0);
    let max_frequency = table.max_frequency().max(1) as f32;

    for (idx, entry) in table.entries().iter().enumerate() {
        let row_top = rect.top() + idx as f32 * BAR_ROW_HEIGHT;
        let center_y = row_top + BAR_ROW_HEIGHT / 2.0;

        painter.text(
            pos2(bar_left - LABEL_GAP, center_y),
            Align2::RIGHT_CENTER,
            &entry.tag,
            font.clone(),
            palette.foreground,
        );

        let bar_width = bar_span * entry.frequency as f32 / max_frequency;
        let bar_height = BAR_ROW_HEIGHT * BAR_FILL;
        let bar = Rect::from_min_size(
            pos2(bar_left, center_y - bar_height / 2.0),
            vec2(bar_width, bar_height),
        );
        painter.rect_filled(bar, 2.0, color);

        painter.text(
            pos2(bar.right() + LABEL_GAP, center_y),
            Align2::LEFT_CENTER,
            entry.frequency.to_string(),
            font.clone(),
            palette.foreground,
        );
    }

    painter.line_segment(
        [pos2(bar_left, rect.top()), pos2(bar_left, rect.bottom())],
        palette.grid_stroke(),
    );
}

fn axis_max(max_value: f64) -> f64 {
    ((max_value / AXIS_STEP).ceil() * AXIS_STEP).max(AXIS_STEP)
}

struct YAxis {
    top: f32,
    bottom: f32,
    max: f64,
}

impl YAxis {
    fn to_screen(&self, value: f64) -> f32 {
        let fraction = (value / self.max).clamp(0.0, 1.0) as f32;
        self.bottom - fraction * (self.bottom - self.top)
    }
}

fn draw_box(painter: &Painter, center_x: f32, half_width: f32, stats: &BoxStats, axis: &YAxis, color: Color32) {
    let stroke = Stroke::new(1.5, color);

    let whisker_top = axis.to_screen(stats.whisker_high);
    let whisker_bottom = axis.to_screen(stats.whisker_low);
    let q3 = axis.to_screen(stats.q3);
    let q1 = axis.to_screen(stats.q1);
    let median = axis.to_screen(stats.median);

    painter.line_segment([pos2(center_x, whisker_top), pos2(center_x, q3)], stroke);
    painter.line_segment([pos2(center_x, q1), pos2(center_x, whisker_bottom)], stroke);

    let cap = half_width / 2.0;
    for y in [whisker_top, whisker_bottom] {
        painter.line_segment([pos2(center_x - cap, y), pos2(center_x + cap, y)], stroke);
    }

    let body = Rect::from_min_max(pos2(center_x - half_width, q3), pos2(center_x + half_width, q1));
    painter.rect_filled(body, 0.0, color.linear_multiply(0.35));
    painter.rect_stroke(body, 0.0, stroke, StrokeKind::Inside);
    painter.line_segment([pos2(center_x - half_width, median), pos2(center_x + half_width, median)], stroke);
}

/// Discount rate box plots per category. One box per class in `classes`, side by side.
pub fn discount_box_plot(
    ui: &mut Ui,
    title: &str,
    distributions: &[CategoryDiscounts],
    classes: &[PbClass],
    palette: &Palette,
) {
    ui.label(palette.heading(title));
    ui.horizontal(|ui| {
        for class in classes {
            ui.colored_label(palette.class_color(*class), format!("■ {}", class.display_name()));
        }
    });

    let groups: Vec<&CategoryDiscounts> = distributions
        .iter()
        .filter(|d| classes.iter().any(|class| d.for_class(*class).is_some()))
        .collect();

    if groups.is_empty() || classes.is_empty() {
        empty_chart(ui, palette);
        return;
    }

    let max = axis_max(max_discount(distributions));
    let group_width = ((ui.available_width() - BOX_AXIS_WIDTH) / groups.len() as f32).max(BOX_GROUP_MIN_WIDTH);
    let width = BOX_AXIS_WIDTH + group_width * groups.len() as f32;

    egui::ScrollArea::horizontal().id_salt(title).show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(vec2(width, BOX_PLOT_HEIGHT + BOX_LABEL_HEIGHT), Sense::hover());
        let rect = response.rect;
        let axis = YAxis { top: rect.top() + LABEL_GAP, bottom: rect.top() + BOX_PLOT_HEIGHT, max };
        let small = FontId::proportional(ui.style().text_styles[&egui::TextStyle::Small].size);
        let plot_left = rect.left() + BOX_AXIS_WIDTH;

        let mut tick = 0.0;
        while tick <= max {
            let y = axis.to_screen(tick);
            painter.line_segment([pos2(plot_left, y), pos2(rect.right(), y)], palette.grid_stroke());
            painter.text(
                pos2(plot_left - LABEL_GAP, y),
                Align2::RIGHT_CENTER,
                format!("{}", tick),
                small.clone(),
                palette.comment,
            );
            tick += AXIS_STEP;
        }

        let slot_width = group_width / classes.len() as f32;
        let half_width = slot_width * BOX_WIDTH_RATIO / 2.0;

        for (group_idx, group) in groups.iter().enumerate() {
            let group_left = plot_left + group_idx as f32 * group_width;

            for (slot, class) in classes.iter().enumerate() {
                if let Some(stats) = group.for_class(*class) {
                    let center_x = group_left + slot_width * (slot as f32 + 0.5);
                    draw_box(&painter, center_x, half_width, stats, &axis, palette.class_color(*class));
                }
            }

            painter.text(
                pos2(group_left + group_width / 2.0, axis.bottom + LABEL_GAP),
                Align2::CENTER_TOP,
                group.category.replace('/', "/\n"),
                small.clone(),
                palette.foreground,
            );
        }
    });
}
