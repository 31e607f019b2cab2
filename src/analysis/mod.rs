pub mod discount;
pub mod ranking;
pub mod summary;
pub mod views;

pub use discount::{
    discount_distributions,
    BoxStats,
    CategoryDiscounts,
};
pub use ranking::{
    rank_hashtags,
    FrequencyTable,
    HashtagRanking,
    TagEntry,
    DEFAULT_TOP_N,
};
pub use summary::{
    category_breakdown,
    CategoryBreakdown,
    SummaryMetrics,
};
pub use views::DashboardViews;
