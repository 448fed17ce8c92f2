pub mod depth;
pub mod error;
pub mod layout;
pub mod parser;

pub use depth::{extract_depth, strip_leading_zeros};
pub use error::ParseError;
pub use layout::{detect_first_location_column, detect_standards_columns};
pub use parser::{ParseOptions, parse};
