use eframe::egui::{
    self,
    RichText,
    Ui,
};

use super::theme::Palette;
use crate::analysis::{
    summary::format_percent,
    CategoryBreakdown,
    SummaryMetrics,
};

const METRIC_VALUE_SCALE: f32 = 1.8;

fn metric_card(ui: &mut Ui, label: &str, value: String, palette: &Palette) {
    let size = ui.style().text_styles[&egui::TextStyle::Body].size * METRIC_VALUE_SCALE;
    ui.vertical(|ui| {
        ui.label(palette.weak(label));
        ui.label(RichText::new(value).size(size).strong().color(palette.foreground));
    });
}

pub fn summary_cards(ui: &mut Ui, metrics: &SummaryMetrics, palette: &Palette) {
    ui.columns(4, |columns| {
        metric_card(&mut columns[0], "총 상품 수", metrics.total_products.to_string(), palette);
        metric_card(&mut columns[1], "상위 20%에 든 상품 수", metrics.top_products.to_string(), palette);
        metric_card(&mut columns[2], "상위 20%에 든 PB상품 수", metrics.top_pb_products.to_string(), palette);
        metric_card(&mut columns[3], "PB상품의 Ranked 비율", metrics.pb_ratio_label(), palette);
    });
}

pub fn category_breakdown_grid(ui: &mut Ui, breakdown: &[CategoryBreakdown]) {
    egui::Grid::new("category_breakdown").striped(true).num_columns(5).show(ui, |ui| {
        ui.strong("Category");
        ui.strong("Products");
        ui.strong("PB");
        ui.strong("PB share");
        ui.strong("Discounted");
        ui.end_row();

        for entry in breakdown.iter().filter(|b| b.products > 0) {
            ui.label(entry.category.as_str());
            ui.label(entry.products.to_string());
            ui.label(entry.pb_products.to_string());
            ui.label(entry.pb_share().map(format_percent).unwrap_or_else(|| "-".to_string()));
            ui.label(entry.discounted_products.to_string());
            ui.end_row();
        }
    });
}
