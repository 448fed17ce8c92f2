pub mod assemble;
pub mod exceedance;
pub mod selection;
pub mod settings;

pub use assemble::{build_tags, tag_count};
pub use exceedance::{Exceedance, evaluate, evaluate_display};
pub use selection::SelectionKey;
pub use settings::{CustomizationSettings, DateStyle};

// Re-export for convenience
pub use fieldtag_common::{ExceedanceConfig, ParsedModel, Tag, TagRow};
