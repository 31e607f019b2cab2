pub mod app;
pub mod charts;
pub mod metrics;
pub mod product_table;
pub mod theme;

pub use app::DashboardApp;
pub use theme::Palette;
