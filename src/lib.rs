//! Harvests the master name index of a genealogy archive and aggregates
//! first-name statistics across a fixed pool of scraping workers.
//!
//! The binary counts every first name on the paginated surname index,
//! writes the ranked counts to a file and reports likely spelling variants
//! of the most common name.

mod macros;

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod parse;
pub mod partition;
pub mod process;
pub mod request;
pub mod stats;
pub mod variants;

pub use error::{Error, Result};

/// Root of the archive hosting the paginated surname index.
pub const BASE_URL: &str = "https://www.wiltshirefamilyhistory.org";
/// Highest valid index page, `i1.htm` through `i79.htm` at the time of writing.
pub const MAX_PAGE: usize = 79;
/// Number of workers the page range is split across.
pub const WORKER_COUNT: usize = 4;
/// Keep only the part of a given name before the first space.
pub const EXCLUDE_MIDDLE_NAMES: bool = true;
/// Placeholder the archive uses when a record has no first name.
pub const UNKNOWN_NAME_MARKER: &str = "(?)";
/// Where the ranked name counts end up.
pub const OUTPUT_PATH: &str = "name_counts.txt";
/// Jaro-Winkler score a candidate has to beat to count as a spelling variant.
pub const VARIANT_THRESHOLD: f64 = 0.85;
