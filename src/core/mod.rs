pub mod errors;
pub mod hashtags;
pub mod models;

pub use errors::DashboardError;
pub use models::{
    partition_by_class,
    Dataset,
    DatasetKind,
    PbClass,
    ProductRow,
};
