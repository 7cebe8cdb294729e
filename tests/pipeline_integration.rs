//! End-to-end pipeline tests over realistic resume fixtures.

use std::time::Duration;

use resume_insight::analysis::types::{
    CareerLevel, CompatibilityLevel, GapLevel, QualityLevel, SectionKind,
};
use resume_insight::enrich::{InsightFuture, RETRY_CAP};
use resume_insight::{
    analyze, analyze_with_insights, AnalysisError, AnalysisReport, EnrichmentConfig,
    InsightProvider, JobContext, LayoutSignals, RawDocument, SourceInfo,
};

const SENIOR_RESUME: &str = "\
Jane Doe
Austin, TX
jane.doe@example.com | (512) 555-0187
linkedin.com/in/janedoe

Summary
Backend engineer focused on reliable, measurable platform work.

Experience
Senior Backend Engineer at Northwind
Mar 2019 - Mar 2024
- Reduced p99 API latency by 45% across core services
- Led a team of 6 engineers through a zero-downtime platform rewrite
- Increased deployment frequency by 3x with CI/CD automation
- Built a billing pipeline processing 2,000,000 transactions daily

Backend Engineer at Contoso
Jun 2016 - Feb 2019
- Designed REST APIs serving 40,000 users
- Improved database query performance by 60%

Education
Bachelor of Science in Computer Science
State University, 2016, GPA: 3.7

Skills
Python, Django, PostgreSQL, Docker, Kubernetes, AWS, Redis, Kafka, Git, Linux

Certifications
- AWS Certified Solutions Architect, 2022";

fn pdf_doc(text: &str) -> RawDocument {
    RawDocument::new(
        text.to_string(),
        SourceInfo {
            filename: "resume.pdf".into(),
            extension: ".pdf".into(),
            size_bytes: text.len() as u64,
            is_scanned: false,
        },
        LayoutSignals::default(),
    )
}

fn backend_job() -> JobContext {
    JobContext {
        job_title: Some("Senior Backend Engineer".into()),
        job_description: None,
        required_skills: vec!["Python".into(), "PostgreSQL".into(), "Kubernetes".into()],
        preferred_skills: vec!["Kafka".into(), "Terraform".into()],
        target_experience_years: Some(8.0),
    }
}

#[test]
fn full_analysis_with_job_target() {
    let report = analyze(&pdf_doc(SENIOR_RESUME), &backend_job()).expect("analysis");

    assert_eq!(report.contact_info.name.as_deref(), Some("Jane Doe"));
    assert_eq!(report.contact_info.completeness_score, 100.0);
    assert_eq!(report.experience.len(), 2);
    // Both ranges are closed, so the union (Jun 2016 - Mar 2024, the two
    // roles abut) is fixed at 7.8 years no matter when the suite runs.
    assert!((report.experience_summary.total_years - 7.8).abs() < 1e-9);
    assert_eq!(report.experience_summary.career_level, CareerLevel::Senior);
    assert!(report.skills.total_count >= 10);

    let gap = report.match_analysis.gap_analysis.as_ref().expect("gap analysis");
    assert_eq!(gap.required_coverage, 100.0);
    assert_eq!(gap.preferred_coverage, 50.0);
    // 100 * 0.7 + 50 * 0.3
    assert!((gap.overall_coverage - 85.0).abs() < 1e-9);
    assert_eq!(gap.gap_level, GapLevel::Excellent);
    assert_eq!(gap.missing_preferred, vec!["Terraform".to_string()]);
    assert!(gap.missing_required.is_empty());

    assert!(report.quality_scores.overall_score >= 85.0);
    assert_eq!(report.quality_scores.quality_level, QualityLevel::Excellent);
    assert_eq!(report.ats_compatibility.compatibility_level, CompatibilityLevel::Excellent);
    assert!(!report.ai_insights.available);
}

#[test]
fn sections_cover_every_line_in_order() {
    let report = analyze(&pdf_doc(SENIOR_RESUME), &JobContext::default()).unwrap();
    let line_count = SENIOR_RESUME.lines().count();

    assert_eq!(report.sections.first().unwrap().start_line, 0);
    assert_eq!(report.sections.last().unwrap().end_line, line_count);
    for pair in report.sections.windows(2) {
        assert_eq!(pair[0].end_line, pair[1].start_line);
    }
    let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&SectionKind::Contact));
    assert!(kinds.contains(&SectionKind::Experience));
    assert!(kinds.contains(&SectionKind::Certifications));
}

#[test]
fn empty_document_is_rejected() {
    let doc = pdf_doc("\n  \n");
    assert!(matches!(
        analyze(&doc, &JobContext::default()),
        Err(AnalysisError::EmptyDocument)
    ));
}

#[test]
fn scanned_image_document_gets_zero_ats_not_an_error() {
    let doc = RawDocument::new(
        String::new(),
        SourceInfo {
            filename: "scan.pdf".into(),
            extension: ".pdf".into(),
            size_bytes: 5_000_000,
            is_scanned: true,
        },
        LayoutSignals::default(),
    );
    let report = analyze(&doc, &JobContext::default()).expect("degraded report");
    assert_eq!(report.ats_compatibility.total_score, 0.0);
    assert!(report.ats_compatibility.critical_penalty);
    assert_eq!(
        report.ats_compatibility.compatibility_level,
        CompatibilityLevel::CriticalIssues
    );
    assert!(report.recommendations.top_3[0].text.contains("scanned"));
    assert!(!report.meta.warnings.is_empty());
}

#[test]
fn messy_layout_drags_ats_down() {
    let doc = RawDocument::new(
        SENIOR_RESUME.to_string(),
        SourceInfo {
            filename: "resume.doc".into(),
            extension: ".doc".into(),
            size_bytes: 1,
            is_scanned: false,
        },
        LayoutSignals { multi_column: true, table_count: 5, image_count: 0 },
    );
    let clean = analyze(&pdf_doc(SENIOR_RESUME), &JobContext::default()).unwrap();
    let messy = analyze(&doc, &JobContext::default()).unwrap();
    assert!(messy.ats_compatibility.total_score < clean.ats_compatibility.total_score);
    assert!(messy
        .recommendations
        .medium
        .iter()
        .any(|r| r.contains("Multi-column")));
}

#[test]
fn no_target_means_no_match_analysis_and_capped_content_fit() {
    let report = analyze(&pdf_doc(SENIOR_RESUME), &JobContext::default()).unwrap();
    assert!(!report.match_analysis.available);
    assert!(report.match_analysis.gap_analysis.is_none());
    assert!(report.skills.coverage_analysis.is_none());
    assert!(report.quality_scores.content_fit.score <= 30.0);
}

#[test]
fn identical_inputs_produce_identical_scores() {
    let doc = pdf_doc(SENIOR_RESUME);
    let job = backend_job();
    let a = analyze(&doc, &job).unwrap();
    let b = analyze(&doc, &job).unwrap();

    assert_eq!(a.quality_scores.overall_score, b.quality_scores.overall_score);
    assert_eq!(a.ats_compatibility.total_score, b.ats_compatibility.total_score);
    assert_eq!(
        a.match_analysis.gap_analysis.as_ref().unwrap().overall_coverage,
        b.match_analysis.gap_analysis.as_ref().unwrap().overall_coverage
    );
    assert_eq!(a.skills.all, b.skills.all);
    assert_eq!(a.recommendations.top_3.len(), b.recommendations.top_3.len());
    assert_ne!(a.meta.id, b.meta.id);
}

// ============================================================
// ENRICHMENT
// ============================================================

struct CannedProvider;

impl InsightProvider for CannedProvider {
    fn generate<'a>(&'a self, report: &'a AnalysisReport, _job: &'a JobContext) -> InsightFuture<'a> {
        let level = report.quality_scores.quality_level;
        Box::pin(async move {
            Ok(resume_insight::analysis::types::AiInsights {
                available: true,
                strengths: vec![format!("Overall level: {level:?}")],
                improvements: vec!["Expand the summary".to_string()],
                recommendations: vec![],
                role_hint: Some("Backend Engineer".to_string()),
            })
        })
    }
}

struct HangingProvider;

impl InsightProvider for HangingProvider {
    fn generate<'a>(&'a self, _: &'a AnalysisReport, _: &'a JobContext) -> InsightFuture<'a> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("provider should have been timed out")
        })
    }
}

#[tokio::test]
async fn enrichment_attaches_without_changing_scores() {
    let doc = pdf_doc(SENIOR_RESUME);
    let job = backend_job();
    let plain = analyze(&doc, &job).unwrap();
    let enriched = analyze_with_insights(&doc, &job, &CannedProvider, &EnrichmentConfig::default())
        .await
        .unwrap();

    assert!(enriched.ai_insights.available);
    assert_eq!(enriched.ai_insights.role_hint.as_deref(), Some("Backend Engineer"));
    assert_eq!(
        enriched.quality_scores.overall_score,
        plain.quality_scores.overall_score
    );
    assert_eq!(
        enriched.ats_compatibility.total_score,
        plain.ats_compatibility.total_score
    );
}

#[tokio::test(start_paused = true)]
async fn enrichment_timeout_degrades_gracefully() {
    let doc = pdf_doc(SENIOR_RESUME);
    let config = EnrichmentConfig {
        timeout: Duration::from_millis(100),
        max_retries: RETRY_CAP,
    };
    let report = analyze_with_insights(&doc, &JobContext::default(), &HangingProvider, &config)
        .await
        .unwrap();
    assert!(!report.ai_insights.available);
    assert!(report.quality_scores.overall_score > 0.0);
}
