use eframe::egui::{
    self,
    Ui,
};
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::{
    core::ProductRow,
    dataset::loader::{
        COL_BRAND,
        COL_CATEGORY,
        COL_CLASS,
        COL_DISCOUNT_RATE,
        COL_HASHTAGS,
        COL_LINK,
        COL_PRODUCT_NAME,
        COL_RANK,
    },
};

const TABLE_MAX_HEIGHT: f32 = 320.0;
const TABLE_HEADER_HEIGHT: f32 = 20.0;
const TABLE_ROW_HEIGHT: f32 = 18.0;
const COLUMN_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    Rank,
    Category,
    ProductName,
    Brand,
    Hashtags,
    DiscountRate,
    Link,
    Class,
}

impl ProductColumn {
    pub const ALL: [ProductColumn; COLUMN_COUNT] = [
        ProductColumn::Rank,
        ProductColumn::Category,
        ProductColumn::ProductName,
        ProductColumn::Brand,
        ProductColumn::Hashtags,
        ProductColumn::DiscountRate,
        ProductColumn::Link,
        ProductColumn::Class,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            ProductColumn::Rank => COL_RANK,
            ProductColumn::Category => COL_CATEGORY,
            ProductColumn::ProductName => COL_PRODUCT_NAME,
            ProductColumn::Brand => COL_BRAND,
            ProductColumn::Hashtags => COL_HASHTAGS,
            ProductColumn::DiscountRate => COL_DISCOUNT_RATE,
            ProductColumn::Link => COL_LINK,
            ProductColumn::Class => COL_CLASS,
        }
    }

    pub fn value(&self, row: &ProductRow) -> String {
        match self {
            ProductColumn::Rank => row.rank.map(|r| r.to_string()).unwrap_or_default(),
            ProductColumn::Category => row.category.clone(),
            ProductColumn::ProductName => row.product_name.clone(),
            ProductColumn::Brand => row.brand.clone(),
            ProductColumn::Hashtags => row.hashtags.clone().unwrap_or_default(),
            ProductColumn::DiscountRate => {
                row.discount_rate.map(|rate| format!("{}%", rate)).unwrap_or_default()
            }
            ProductColumn::Link => row.link.clone().unwrap_or_default(),
            ProductColumn::Class => row.class.label().to_string(),
        }
    }
}

pub struct ProductTableState {
    visible: [bool; COLUMN_COUNT],
}

impl Default for ProductTableState {
    fn default() -> Self {
        Self { visible: [true; COLUMN_COUNT] }
    }
}

impl ProductTableState {
    pub fn visible_columns(&self) -> Vec<ProductColumn> {
        ProductColumn::ALL
            .iter()
            .zip(self.visible.iter())
            .filter(|(_, visible)| **visible)
            .map(|(column, _)| *column)
            .collect()
    }

    pub fn set_visible(&mut self, column: ProductColumn, visible: bool) {
        if let Some(idx) = ProductColumn::ALL.iter().position(|c| *c == column) {
            self.visible[idx] = visible;
        }
    }

    pub fn show(&mut self, ui: &mut Ui, rows: &[ProductRow]) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Show Columns :");
            for (column, visible) in ProductColumn::ALL.iter().zip(self.visible.iter_mut()) {
                ui.checkbox(visible, column.header());
            }
        });

        let columns = self.visible_columns();
        if columns.is_empty() {
            ui.label("No columns selected");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(TABLE_MAX_HEIGHT)
            .columns(Column::auto().resizable(true), columns.len())
            .header(TABLE_HEADER_HEIGHT, |mut header| {
                for column in &columns {
                    header.col(|ui| {
                        ui.strong(column.header());
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, rows.len(), |mut table_row| {
                    let row = &rows[table_row.index()];
                    for column in &columns {
                        table_row.col(|ui| match (column, row.link.as_deref()) {
                            (ProductColumn::Link, Some(url)) => {
                                ui.add(egui::Hyperlink::from_label_and_url("link", url));
                            }
                            _ => {
                                ui.label(column.value(row));
                            }
                        });
                    }
                });
            });
    }
}
