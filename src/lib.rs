//! Resume understanding and scoring engine.
//!
//! Takes extracted plain text plus source metadata, classifies it into
//! sections, extracts structured entities, and produces quality, ATS, and
//! skills-gap scores with prioritized recommendations. The whole pipeline
//! is deterministic; optional AI enrichment is additive and never gates a
//! report.

pub mod analysis;
pub mod enrich;
pub mod error;
pub mod lexicon;
pub mod pipeline;

pub use analysis::types::{
    AnalysisReport, JobContext, LayoutSignals, RawDocument, SourceInfo,
};
pub use enrich::{EnrichmentConfig, InsightProvider};
pub use error::{AnalysisError, EnrichmentError};
pub use pipeline::{analyze, analyze_with_insights};
