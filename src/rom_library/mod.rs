//! ROM library engine.
//!
//! Scans configured root directories into a catalog of games,
//! consolidating multi-disc sets and flagging romhacks,
//! and searches the library for files to copy under a cleaned-up name.

mod classify;
mod config;
mod normalize;
mod report;
mod resolve;
mod scanner;
mod search;

pub use classify::{DiscConvention, DiscKey, FilenameClassifier, SKIP_EXTENSIONS};
pub use config::{LibraryConfig, RomsConfig};
pub use normalize::suggest_name;
pub use report::{catalog_json, markdown_table, write_catalog_json, write_markdown};
pub use resolve::resolve_system_dir;
pub use scanner::{Catalog, Game, ScanRoot, Scanner};
pub use search::{DEFAULT_MAX_DEPTH, SearchOutcome, SearchResolver, SearchTier};
