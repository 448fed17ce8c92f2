//! Meta crate that re-exports the fieldtag building blocks with sensible
//! defaults. Downstream users can depend on this crate and opt into specific
//! layers via feature flags while keeping access to the underlying crates
//! when deeper integration is required.

#[cfg(feature = "common")]
pub use fieldtag_common as common;

#[cfg(feature = "parse")]
pub use fieldtag_parse as parse;

#[cfg(feature = "engine")]
pub use fieldtag_engine as engine;

#[cfg(feature = "io")]
pub use fieldtag_io as io;

// Flat re-exports of the types most callers touch.
#[cfg(feature = "common")]
pub use fieldtag_common::{Cell, ParsedModel, RawGrid, Tag, TagRow};

#[cfg(feature = "parse")]
pub use fieldtag_parse::{ParseError, ParseOptions, parse};

#[cfg(feature = "engine")]
pub use fieldtag_engine::{CustomizationSettings, SelectionKey, build_tags};

#[cfg(feature = "io")]
pub use fieldtag_io::{LoadError, load_grid, load_grid_from_bytes};
