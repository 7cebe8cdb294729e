//! Error taxonomy for the analysis core.
//!
//! Almost every bad input degrades into a partial, low-confidence result
//! rather than an error. The single fatal case is a structurally empty
//! document that is not flagged as scanned; everything else flows through
//! the pipeline as best-effort data with `available`/`confidence` flags.

use std::time::Duration;
use thiserror::Error;

/// Top-level failure of an analysis request.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The document has no extractable text and is not a scanned image.
    /// Scanned documents with empty text are handled by the ATS analyzer
    /// (forced zero score), not here.
    #[error("document contains no extractable text")]
    EmptyDocument,
}

/// Failure of the optional external enrichment call. Never propagated out
/// of the pipeline; converted to `ai_insights.available = false`.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("enrichment request timed out after {0:?}")]
    Timeout(Duration),

    #[error("enrichment service failed: {0}")]
    Service(String),

    #[error("enrichment response could not be decoded: {0}")]
    InvalidResponse(String),
}
