//! AI-assisted code quality analysis.
//!
//! Pipeline for one file:
//!   1) [`validation`]: reject unsupported or blank input early;
//!   2) [`prompt`]: render the four per-file prompts;
//!   3) [`orchestrator`]: fan the prompts out to the model and wait for all;
//!   4) [`parser`]: turn each raw answer into a schema-complete value;
//!   5) [`score`]: fold the parsed answers into one number.
//!
//! [`cache::ResultStore`] bridges a prior structural parse and later
//! per-file AI requests.

pub mod cache;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod score;
pub mod validation;

pub use cache::{CacheEntry, ResultStore, StoreSnapshot};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use models::{
    AnalysisResult, Issue, PackageReport, ParsedFileRecord, SolidReport, SourceFile, StyleReport,
};
pub use orchestrator::{AnalysisOrchestrator, FileOutcome, ParseReport};
pub use parser::{ParseOutcome, Parsed, ResponseKind};
pub use score::ScoringConfig;
