use std::collections::HashMap;

use crate::core::{
    Dataset,
    PbClass,
    ProductRow,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub total_products: usize,
    pub top_products: usize,
    pub top_pb_products: usize,
}

impl SummaryMetrics {
    pub fn compute(full: &Dataset, top: &Dataset) -> Self {
        Self {
            total_products: full.len(),
            top_products: top.len(),
            top_pb_products: top.count_of(PbClass::Pb),
        }
    }

    /// Share of PB products among the top products, in percent.
    pub fn pb_ratio(&self) -> Option<f64> {
        if self.top_products == 0 {
            return None;
        }
        Some(self.top_pb_products as f64 / self.top_products as f64 * 100.0)
    }

    pub fn pb_ratio_label(&self) -> String {
        match self.pb_ratio() {
            Some(ratio) => format_percent(ratio),
            None => "-".to_string(),
        }
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub products: usize,
    pub pb_products: usize,
    pub discounted_products: usize,
}

impl CategoryBreakdown {
    fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            products: 0,
            pb_products: 0,
            discounted_products: 0,
        }
    }

    pub fn pb_share(&self) -> Option<f64> {
        if self.products == 0 {
            None
        } else {
            Some(self.pb_products as f64 / self.products as f64 * 100.0)
        }
    }
}

/// Row order for per-category views: configured categories first, then any
/// unknown category in first-seen order.
pub fn category_order(rows: &[ProductRow], configured: &[String]) -> Vec<String> {
    let mut order: Vec<String> = configured.to_vec();
    for row in rows {
        if !order.iter().any(|c| c == &row.category) {
            order.push(row.category.clone());
        }
    }
    order
}

pub fn category_breakdown(rows: &[ProductRow], configured: &[String]) -> Vec<CategoryBreakdown> {
    let order = category_order(rows, configured);
    let mut by_category: HashMap<&str, CategoryBreakdown> =
        order.iter().map(|c| (c.as_str(), CategoryBreakdown::new(c))).collect();

    for row in rows {
        if let Some(entry) = by_category.get_mut(row.category.as_str()) {
            entry.products += 1;
            if row.class == PbClass::Pb {
                entry.pb_products += 1;
            }
            if row.is_discounted() {
                entry.discounted_products += 1;
            }
        }
    }

    order.iter().filter_map(|c| by_category.remove(c.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{
        models::test_row,
        DatasetKind,
    };

    fn dataset(kind: DatasetKind, rows: Vec<ProductRow>) -> Dataset {
        Dataset { kind, source: PathBuf::from("test.csv"), rows }
    }

    #[test]
    fn test_summary_metrics() {
        let full = dataset(
            DatasetKind::Full,
            (0..12).map(|_| test_row("채소", PbClass::NotPb, None)).collect(),
        );
        let top = dataset(
            DatasetKind::Top,
            vec![
                test_row("채소", PbClass::Pb, Some("[신선한]")),
                // No hashtags, still counted as a PB product
                test_row("채소", PbClass::Pb, None),
                test_row("채소", PbClass::NotPb, Some("[국내산]")),
            ],
        );

        let metrics = SummaryMetrics::compute(&full, &top);
        assert_eq!(metrics.total_products, 12);
        assert_eq!(metrics.top_products, 3);
        assert_eq!(metrics.top_pb_products, 2);
        assert_eq!(metrics.pb_ratio_label(), "66.7%");
    }

    #[test]
    fn test_empty_top_dataset_has_no_ratio() {
        let empty = dataset(DatasetKind::Top, Vec::new());
        let metrics = SummaryMetrics::compute(&empty, &empty);
        assert_eq!(metrics.pb_ratio(), None);
        assert_eq!(metrics.pb_ratio_label(), "-");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(100.0), "100.0%");
    }

    #[test]
    fn test_category_breakdown_order_and_counts() {
        let configured = vec!["채소".to_string(), "뷰티".to_string()];
        let mut discounted = test_row("채소", PbClass::NotPb, None);
        discounted.discount_rate = Some(20.0);
        let rows = vec![
            test_row("기타", PbClass::Pb, None),
            test_row("채소", PbClass::Pb, None),
            discounted,
        ];

        let breakdown = category_breakdown(&rows, &configured);
        let names: Vec<&str> = breakdown.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["채소", "뷰티", "기타"]);

        assert_eq!(breakdown[0].products, 2);
        assert_eq!(breakdown[0].pb_products, 1);
        assert_eq!(breakdown[0].discounted_products, 1);
        assert_eq!(breakdown[0].pb_share(), Some(50.0));
        assert_eq!(breakdown[1].products, 0);
        assert_eq!(breakdown[1].pb_share(), None);
        assert_eq!(breakdown[2].pb_products, 1);
    }
}
