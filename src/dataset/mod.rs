pub mod cache;
pub mod loader;

pub use cache::{
    DashboardData,
    DatasetCache,
    FileIdentity,
};
pub use loader::{
    load_dataset,
    read_dataset,
    LoadOptions,
};
