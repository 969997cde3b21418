//! Research-backed practice skill packages: expand a practice topic into
//! search queries, aggregate and rank the sources Tavily returns, extract
//! the most topical sentences as coaching insights, and render the bundle
//! as a skill document, research log, and JSON export.

pub mod insights;
pub mod normalize;
pub mod package;
pub mod pipeline;
pub mod queries;
pub mod rank;
pub mod text;
pub mod types;

pub use insights::extract_insights;
pub use normalize::normalize_payload;
pub use package::{write_package, PackageInput};
pub use pipeline::{run_research, Searcher};
pub use queries::build_queries;
pub use rank::dedupe_rank;
pub use text::{slugify, unique_words};
pub use types::{AnswerRecord, Research, SearchResult};
