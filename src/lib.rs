pub mod analysis;
pub mod config;
pub mod core;
pub mod dataset;
pub mod gui;
pub mod persistence;

pub use analysis::{
    rank_hashtags,
    FrequencyTable,
    HashtagRanking,
};
pub use config::DashboardConfig;
pub use crate::core::{
    hashtags::normalize_cell,
    DashboardError,
    PbClass,
    ProductRow,
};
