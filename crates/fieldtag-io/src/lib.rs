pub mod error;
pub mod load;

pub use error::LoadError;
pub use load::{load_grid, load_grid_from_bytes};

// Re-export for convenience
pub use fieldtag_common::RawGrid;
