use super::{
    category_breakdown,
    discount_distributions,
    CategoryBreakdown,
    CategoryDiscounts,
    HashtagRanking,
    SummaryMetrics,
};
use crate::core::Dataset;

/// Everything the dashboard draws, derived from the two datasets.
/// Recomputed whenever the datasets or the requested top-N change.
#[derive(Debug, Clone)]
pub struct DashboardViews {
    pub metrics: SummaryMetrics,
    pub breakdown: Vec<CategoryBreakdown>,
    pub discounts: Vec<CategoryDiscounts>,
    pub hashtags: HashtagRanking,
}

impl DashboardViews {
    pub fn compute(full: &Dataset, top: &Dataset, categories: &[String], top_n: usize) -> Self {
        Self {
            metrics: SummaryMetrics::compute(full, top),
            breakdown: category_breakdown(&top.rows, categories),
            discounts: discount_distributions(&top.rows, categories),
            hashtags: HashtagRanking::compute(&top.rows, top_n),
        }
    }

    pub fn refresh_hashtags(&mut self, top: &Dataset, top_n: usize) {
        self.hashtags = HashtagRanking::compute(&top.rows, top_n);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::{
        models::test_row,
        DatasetKind,
        PbClass,
    };

    #[test]
    fn test_views_from_top_dataset() {
        let full = Dataset { kind: DatasetKind::Full, source: PathBuf::from("dataset.csv"), rows: Vec::new() };
        let mut discounted = test_row("채소", PbClass::NotPb, Some("[국내산, 신선한]"));
        discounted.discount_rate = Some(30.0);
        let top = Dataset {
            kind: DatasetKind::Top,
            source: PathBuf::from("top_20_df.csv"),
            rows: vec![
                test_row("채소", PbClass::Pb, Some("[맛있는, 신선한]")),
                test_row("채소", PbClass::Pb, Some("[신선한]")),
                test_row("채소", PbClass::Pb, None),
                discounted,
            ],
        };
        let categories = vec!["채소".to_string()];

        let mut views = DashboardViews::compute(&full, &top, &categories, 10);
        assert_eq!(views.metrics.top_pb_products, 3);
        assert_eq!(views.metrics.pb_ratio_label(), "75.0%");
        assert_eq!(views.breakdown[0].discounted_products, 1);
        assert_eq!(views.discounts.len(), 1);
        assert_eq!(views.hashtags.pb.get("신선한"), Some(2));
        assert_eq!(views.hashtags.not_pb.len(), 2);

        views.refresh_hashtags(&top, 1);
        assert_eq!(views.hashtags.top_n, 1);
        assert_eq!(views.hashtags.pb.len(), 1);
        assert_eq!(views.hashtags.not_pb.entries()[0].tag, "국내산");
    }
}
