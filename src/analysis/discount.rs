use super::summary::category_order;
use crate::core::{
    PbClass,
    ProductRow,
};

const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary of discount rates for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let whisker_low = sorted.iter().copied().find(|v| *v >= low_fence).unwrap_or(q1);
        let whisker_high = sorted.iter().rev().copied().find(|v| *v <= high_fence).unwrap_or(q3);

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median: quantile(&sorted, 0.5),
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
        })
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDiscounts {
    pub category: String,
    pub pb: Option<BoxStats>,
    pub not_pb: Option<BoxStats>,
}

impl CategoryDiscounts {
    pub fn for_class(&self, class: PbClass) -> Option<&BoxStats> {
        match class {
            PbClass::Pb => self.pb.as_ref(),
            PbClass::NotPb => self.not_pb.as_ref(),
        }
    }
}

fn discount_rates<'a>(
    rows: &'a [ProductRow],
    category: &'a str,
    class: PbClass,
) -> impl Iterator<Item = f64> + 'a {
    rows.iter()
        .filter(move |row| row.class == class && row.category == category)
        .filter_map(|row| row.discount_rate)
}

/// Discount distributions per category and class. Categories without any
/// discount rate in either class are omitted.
pub fn discount_distributions(rows: &[ProductRow], configured: &[String]) -> Vec<CategoryDiscounts> {
    category_order(rows, configured)
        .into_iter()
        .filter_map(|category| {
            let pb: Vec<f64> = discount_rates(rows, &category, PbClass::Pb).collect();
            let not_pb: Vec<f64> = discount_rates(rows, &category, PbClass::NotPb).collect();
            let entry = CategoryDiscounts {
                pb: BoxStats::from_values(&pb),
                not_pb: BoxStats::from_values(&not_pb),
                category,
            };
            (entry.pb.is_some() || entry.not_pb.is_some()).then_some(entry)
        })
        .collect()
}

/// Largest value any box reaches, used to scale the shared axis.
pub fn max_discount(distributions: &[CategoryDiscounts]) -> f64 {
    distributions
        .iter()
        .flat_map(|d| [d.pb.as_ref(), d.not_pb.as_ref()])
        .flatten()
        .map(|stats| stats.max)
        .fold(0.0, f64::max)
}
