//! Common types shared across the grid-coords crates.

pub mod error;
pub mod params;
pub mod scan;
pub mod shape;
pub mod store;

pub use error::{GridError, GridResult};
pub use params::{MapSource, ParameterSource, ParameterValue};
pub use scan::{apply_scan_order, ScanMode};
pub use shape::GridShape;
pub use store::CoordinateStore;
