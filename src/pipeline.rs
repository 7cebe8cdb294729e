//! Pipeline orchestration.
//!
//! `analyze` runs the deterministic stages in order and is a pure function
//! of the document, the job context, and the lexicon version; only the
//! report metadata (id, timestamp, duration) differs between runs.
//! `analyze_with_insights` layers optional AI enrichment on top.

use std::time::Instant;

use chrono::{Datelike, Utc};
use log::info;

use crate::analysis::ats::AtsAnalyzer;
use crate::analysis::extract::FieldExtractor;
use crate::analysis::quality::QualityEngine;
use crate::analysis::recommend::RecommendationAggregator;
use crate::analysis::sections::SectionClassifier;
use crate::analysis::skills::SkillsMatcher;
use crate::analysis::types::{
    AiInsights, AnalysisMeta, AnalysisReport, JobContext, MatchAnalysis, RawDocument,
    SkillsOverview, YearMonth,
};
use crate::enrich::{self, EnrichmentConfig, InsightProvider};
use crate::error::AnalysisError;
use crate::lexicon::LEXICON_VERSION;

/// Run the full deterministic pipeline.
pub fn analyze(doc: &RawDocument, job: &JobContext) -> Result<AnalysisReport, AnalysisError> {
    let started = Instant::now();
    AnalysisReport::check_input(doc)?;

    let mut warnings: Vec<String> = Vec::new();
    if doc.source.is_scanned && doc.is_empty() {
        warnings.push(
            "Scanned document yielded no text; analysis is limited to format checks".to_string(),
        );
    }

    let today = Utc::now();
    let now = YearMonth::new(today.year(), today.month());

    let sections = SectionClassifier::classify(doc);
    let entities = FieldExtractor::extract(doc, &sections, now);

    let skills_match = job.has_skill_target().then(|| {
        SkillsMatcher::match_against(&entities.skills, &job.required_skills, &job.preferred_skills)
    });

    let ats = AtsAnalyzer::analyze(doc, &sections, &entities.contact);
    let quality = QualityEngine::score(
        doc,
        &sections,
        &entities,
        skills_match.as_ref(),
        job.target_experience_years,
        &ats,
    );
    let recommendations = RecommendationAggregator::aggregate(
        doc,
        &sections,
        &entities,
        &quality,
        &ats,
        skills_match.as_ref(),
    );

    let match_analysis = match &skills_match {
        Some(report) => MatchAnalysis {
            available: true,
            overall_match: report.overall_coverage,
            gap_analysis: Some(report.clone()),
        },
        None => MatchAnalysis::unavailable(),
    };

    let skills = SkillsOverview {
        all: entities.skills.iter().cloned().collect(),
        categorized: entities.skills_categorized.clone(),
        total_count: entities.skills.len(),
        coverage_analysis: skills_match,
    };

    let meta = AnalysisMeta {
        id: uuid::Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        duration_ms: started.elapsed().as_millis() as u64,
        lexicon_version: LEXICON_VERSION.to_string(),
        warnings,
    };

    info!(
        "analysis {} complete: quality {:.1}, ats {:.1}, {} recommendations",
        meta.id,
        quality.overall_score,
        ats.total_score,
        recommendations.critical.len()
            + recommendations.high.len()
            + recommendations.medium.len()
            + recommendations.low.len()
    );

    Ok(AnalysisReport {
        sections,
        contact_info: entities.contact,
        education: entities.education,
        experience: entities.experience,
        experience_summary: entities.experience_summary,
        skills,
        projects: entities.projects,
        certifications: entities.certifications,
        role_inference: entities.role_inference,
        quality_scores: quality,
        ats_compatibility: ats,
        match_analysis,
        recommendations,
        ai_insights: AiInsights::unavailable(),
        meta,
    })
}

/// Run the deterministic pipeline, then attach provider insights. Provider
/// failure of any kind leaves the report intact with insights marked
/// unavailable.
pub async fn analyze_with_insights(
    doc: &RawDocument,
    job: &JobContext,
    provider: &dyn InsightProvider,
    config: &EnrichmentConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let mut report = analyze(doc, job)?;
    report.ai_insights = enrich::fetch_insights(provider, &report, job, config).await;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{LayoutSignals, SourceInfo};

    fn doc(text: &str) -> RawDocument {
        RawDocument::new(
            text.to_string(),
            SourceInfo { extension: ".pdf".into(), ..Default::default() },
            LayoutSignals::default(),
        )
    }

    const SAMPLE: &str = "Jane Doe\njane@example.com 512-555-0187\n\nExperience\nEngineer at Acme\nJan 2020 - Present\n- Reduced costs by 20%\n\nEducation\nBS in Computer Science\n\nSkills\nPython, Docker";

    #[test]
    fn test_empty_document_is_the_only_fatal_input() {
        let empty = doc("   \n \n");
        assert!(matches!(analyze(&empty, &JobContext::default()), Err(AnalysisError::EmptyDocument)));
    }

    #[test]
    fn test_scanned_empty_document_degrades_instead_of_failing() {
        let scanned = RawDocument::new(
            String::new(),
            SourceInfo { extension: ".pdf".into(), is_scanned: true, ..Default::default() },
            LayoutSignals::default(),
        );
        let report = analyze(&scanned, &JobContext::default()).expect("degraded report");
        assert_eq!(report.ats_compatibility.total_score, 0.0);
        assert!(report.ats_compatibility.critical_penalty);
        assert!(!report.meta.warnings.is_empty());
    }

    #[test]
    fn test_scores_are_deterministic_across_runs() {
        let d = doc(SAMPLE);
        let a = analyze(&d, &JobContext::default()).unwrap();
        let b = analyze(&d, &JobContext::default()).unwrap();
        assert_eq!(a.quality_scores.overall_score, b.quality_scores.overall_score);
        assert_eq!(a.ats_compatibility.total_score, b.ats_compatibility.total_score);
        assert_eq!(a.skills.all, b.skills.all);
        assert_ne!(a.meta.id, b.meta.id);
    }

    #[test]
    fn test_match_analysis_only_with_target() {
        let d = doc(SAMPLE);
        let without = analyze(&d, &JobContext::default()).unwrap();
        assert!(!without.match_analysis.available);

        let job = JobContext {
            required_skills: vec!["Python".to_string(), "Go".to_string()],
            ..Default::default()
        };
        let with = analyze(&d, &job).unwrap();
        assert!(with.match_analysis.available);
        assert_eq!(with.match_analysis.overall_match, 50.0);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let d = doc(SAMPLE);
        let report = analyze(&d, &JobContext::default()).unwrap();
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("quality_scores"));
        assert!(json.contains("ats_compatibility"));
    }
}
