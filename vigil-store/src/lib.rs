mod error;
mod schema;
pub mod seed;
mod store;

pub use error::StoreError;
pub use seed::{SIM_RESOURCE_PREFIX, seed_scan_details, seed_scans, seed_timeline};
pub use store::{SimStore, data_dir};
