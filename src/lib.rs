pub mod compact;
pub mod errors;
pub mod filter;
pub mod language;
pub mod logger;
pub mod render;
pub mod reporting;
pub mod trie;
pub mod walk;

pub use compact::{compact_project, compact_to_file, CompactSummary, CompactorConfig};
pub use errors::CompactError;
pub use filter::FilterRules;
