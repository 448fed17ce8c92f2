pub mod cell;
pub mod grid;
pub mod model;
pub mod resolve;
pub mod tag;

pub use cell::{Cell, serial_to_datetime};
pub use grid::RawGrid;
pub use model::{
    Analyte, Category, ExceedanceConfig, ModelParts, ParsedModel, ResultKey, ResultTable,
    StandardsColumn, depth_sort_value,
};
pub use resolve::{QUALIFIERS, resolve};
pub use tag::{Tag, TagRow};
