//! Core data model for the analysis pipeline.
//!
//! Every entity is created fresh per analysis request and treated as
//! read-only by downstream stages. All report types serialize to the JSON
//! shape consumed by the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::AnalysisError;

// ============================================================
// INPUT DOCUMENT
// ============================================================

/// Source metadata supplied by the external extraction layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceInfo {
    pub filename: String,
    /// Lowercased extension including the dot, e.g. ".pdf".
    pub extension: String,
    pub size_bytes: u64,
    /// True when the extractor detected an image-only (scanned) document.
    pub is_scanned: bool,
}

/// Layout signals supplied by the external extraction layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutSignals {
    pub multi_column: bool,
    pub table_count: u32,
    pub image_count: u32,
}

/// Normalized plain text plus its provenance. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    pub text: String,
    pub line_count: usize,
    pub word_count: usize,
    pub source: SourceInfo,
    pub layout: LayoutSignals,
}

impl RawDocument {
    pub fn new(text: String, source: SourceInfo, layout: LayoutSignals) -> Self {
        let line_count = text.lines().count();
        let word_count = text.split_whitespace().count();
        Self { text, line_count, word_count, source, layout }
    }

    /// True when there is no non-blank line at all.
    pub fn is_empty(&self) -> bool {
        self.text.lines().all(|l| l.trim().is_empty())
    }
}

/// Optional target-role context passed alongside the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobContext {
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    pub target_experience_years: Option<f64>,
}

impl JobContext {
    /// Whether any target skill set was supplied at all.
    pub fn has_skill_target(&self) -> bool {
        !self.required_skills.is_empty() || !self.preferred_skills.is_empty()
    }
}

// ============================================================
// SECTIONS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Other,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Other => "other",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, contiguous span of document lines. Sections are ordered
/// and jointly cover every line of the document exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    /// Inclusive zero-based start line.
    pub start_line: usize,
    /// Exclusive end line.
    pub end_line: usize,
    pub confidence: f64,
    pub word_count: usize,
}

// ============================================================
// CONTACT
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Linkedin,
    Github,
    Portfolio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub kind: LinkKind,
    pub url: String,
}

/// Extracted contact details. `completeness_score` counts how many of the
/// five expected fields (name, email, phone, location, at least one link)
/// were found, as a percentage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub links: Vec<ProfileLink>,
    pub completeness_score: f64,
}

impl ContactInfo {
    pub fn compute_completeness(&mut self) {
        let present = [
            self.name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
            self.location.is_some(),
            !self.links.is_empty(),
        ]
        .iter()
        .filter(|p| **p)
        .count();
        self.completeness_score = present as f64 / 5.0 * 100.0;
    }

    /// Minimum an ATS needs: a name plus at least one way to reach out.
    pub fn is_reachable(&self) -> bool {
        self.name.is_some() && (self.email.is_some() || self.phone.is_some())
    }
}

// ============================================================
// EXPERIENCE
// ============================================================

/// Month-granularity date used for employment ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12.
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month: month.clamp(1, 12) }
    }

    /// Total months since year zero, for interval arithmetic.
    pub fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

/// An employment date range. `end == None` means the role is current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: YearMonth,
    pub end: Option<YearMonth>,
}

impl DateRange {
    /// Duration in whole months, using `now` for open ranges. Inclusive of
    /// the starting month.
    pub fn duration_months(&self, now: YearMonth) -> u32 {
        let end = self.end.unwrap_or(now);
        (end.index() - self.start.index() + 1).max(0) as u32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub range: Option<DateRange>,
    pub is_current: bool,
    pub duration_months: u32,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerLevel {
    Junior,
    Mid,
    Senior,
    Principal,
}

impl CareerLevel {
    /// Bucket thresholds: junior <2, mid 2-5, senior 5-10, principal 10+.
    pub fn from_years(years: f64) -> Self {
        if years >= 10.0 {
            CareerLevel::Principal
        } else if years >= 5.0 {
            CareerLevel::Senior
        } else if years >= 2.0 {
            CareerLevel::Mid
        } else {
            CareerLevel::Junior
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceSummary {
    /// Union-of-intervals total, so concurrent roles are not double counted.
    pub total_years: f64,
    pub career_level: CareerLevel,
    pub most_recent_role: Option<String>,
}

impl Default for ExperienceSummary {
    fn default() -> Self {
        Self { total_years: 0.0, career_level: CareerLevel::Junior, most_recent_role: None }
    }
}

// ============================================================
// EDUCATION
// ============================================================

/// Fixed degree ontology, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeRank {
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub rank: Option<DegreeRank>,
    pub institution: Option<String>,
    pub year: Option<i32>,
    pub gpa: Option<f64>,
    pub honors: Option<String>,
}

// ============================================================
// SKILLS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    ProgrammingLanguage,
    Framework,
    Tool,
    SoftSkill,
    Other,
}

/// Deduplicated, case/whitespace-insensitive set of canonical skill names.
/// Iteration order is deterministic (sorted by normalized key).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSet {
    names: BTreeSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalization key shared with the matcher: lowercase, punctuation
    /// and whitespace stripped.
    pub fn normalize(name: &str) -> String {
        name.chars()
            .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#')
            .collect::<String>()
            .to_lowercase()
    }

    pub fn insert(&mut self, canonical: &str) {
        if !canonical.trim().is_empty()
            && !self.names.iter().any(|n| Self::normalize(n) == Self::normalize(canonical))
        {
            self.names.insert(canonical.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = Self::normalize(name);
        self.names.iter().any(|n| Self::normalize(n) == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl GapLevel {
    pub fn from_coverage(percent: f64) -> Self {
        if percent >= 80.0 {
            GapLevel::Excellent
        } else if percent >= 60.0 {
            GapLevel::Good
        } else if percent >= 40.0 {
            GapLevel::Fair
        } else {
            GapLevel::Poor
        }
    }
}

/// Skills-gap comparison against a target role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsMatchReport {
    pub matched: Vec<String>,
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub bonus: Vec<String>,
    /// Percentages in [0, 100].
    pub required_coverage: f64,
    pub preferred_coverage: f64,
    pub overall_coverage: f64,
    pub gap_level: GapLevel,
}

// ============================================================
// PROJECTS & CERTIFICATIONS
// ============================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<i32>,
}

// ============================================================
// ROLE INFERENCE
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleInference {
    pub primary_role: Option<String>,
    pub confidence: f64,
    pub supporting_keywords: Vec<String>,
}

impl Default for RoleInference {
    fn default() -> Self {
        Self { primary_role: None, confidence: 0.0, supporting_keywords: Vec::new() }
    }
}

// ============================================================
// SCORING
// ============================================================

/// One scored rubric category. Constructor clamps so the
/// `0 <= score <= max_possible` invariant always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreCategory {
    pub score: f64,
    pub max_possible: f64,
    pub percentage: f64,
    pub details: Vec<String>,
}

impl ScoreCategory {
    pub fn new(score: f64, max_possible: f64, details: Vec<String>) -> Self {
        let score = score.clamp(0.0, max_possible);
        let percentage = if max_possible > 0.0 { score / max_possible * 100.0 } else { 0.0 };
        Self { score, max_possible, percentage, details }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Excellent,
    Good,
    Average,
    BelowAverage,
    NeedsImprovement,
}

impl QualityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            QualityLevel::Excellent
        } else if score >= 75.0 {
            QualityLevel::Good
        } else if score >= 65.0 {
            QualityLevel::Average
        } else if score >= 50.0 {
            QualityLevel::BelowAverage
        } else {
            QualityLevel::NeedsImprovement
        }
    }
}

/// The four-category weighted quality rubric plus the combined score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub content_fit: ScoreCategory,
    pub clarity_quantification: ScoreCategory,
    pub structure_readability: ScoreCategory,
    pub ats_friendliness: ScoreCategory,
    pub overall_score: f64,
    pub quality_level: QualityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    CriticalIssues,
}

impl CompatibilityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            CompatibilityLevel::Excellent
        } else if score >= 70.0 {
            CompatibilityLevel::Good
        } else if score >= 55.0 {
            CompatibilityLevel::Fair
        } else if score >= 40.0 {
            CompatibilityLevel::Poor
        } else {
            CompatibilityLevel::CriticalIssues
        }
    }
}

/// ATS sub-score breakdown, each component in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub file_format: f64,
    pub layout: f64,
    pub content: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub total_score: f64,
    pub compatibility_level: CompatibilityLevel,
    pub breakdown: AtsBreakdown,
    /// Set when a scanned, text-free document forced the score to zero.
    pub critical_penalty: bool,
    pub priority_issues: Vec<String>,
}

// ============================================================
// RECOMMENDATIONS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// The pipeline stage that raised a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    Sections,
    Extraction,
    Skills,
    Quality,
    Ats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub text: String,
    pub priority: Priority,
    pub source: IssueSource,
}

impl RecommendationItem {
    pub fn new(text: impl Into<String>, priority: Priority, source: IssueSource) -> Self {
        Self { text: text.into(), priority, source }
    }
}

/// Deduplicated, priority-ordered action list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub top_3: Vec<RecommendationItem>,
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

// ============================================================
// MATCH ANALYSIS & AI INSIGHTS
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub available: bool,
    /// Overall target-match percentage when a target was supplied.
    pub overall_match: f64,
    pub gap_analysis: Option<SkillsMatchReport>,
}

impl MatchAnalysis {
    pub fn unavailable() -> Self {
        Self { available: false, overall_match: 0.0, gap_analysis: None }
    }
}

/// Output of the optional external enrichment service. The deterministic
/// report never depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiInsights {
    pub available: bool,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
    pub role_hint: Option<String>,
}

impl AiInsights {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            strengths: Vec::new(),
            improvements: Vec::new(),
            recommendations: Vec::new(),
            role_hint: None,
        }
    }
}

// ============================================================
// AGGREGATE REPORT
// ============================================================

/// All structured entities produced by the field extractor; read-only
/// input to every scoring stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub contact: ContactInfo,
    pub experience: Vec<ExperienceEntry>,
    pub experience_summary: ExperienceSummary,
    pub education: Vec<EducationEntry>,
    pub highest_degree: Option<DegreeRank>,
    pub skills: SkillSet,
    pub skills_categorized: BTreeMap<SkillCategory, Vec<String>>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub role_inference: RoleInference,
}

/// Skills block of the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsOverview {
    pub all: Vec<String>,
    pub categorized: BTreeMap<SkillCategory, Vec<String>>,
    pub total_count: usize,
    pub coverage_analysis: Option<SkillsMatchReport>,
}

/// Per-report metadata, mirroring nothing of the scores: recomputing the
/// same document yields identical scores with fresh metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMeta {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub lexicon_version: String,
    pub warnings: Vec<String>,
}

/// The complete structured assessment returned to the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sections: Vec<Section>,
    pub contact_info: ContactInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub experience_summary: ExperienceSummary,
    pub skills: SkillsOverview,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub role_inference: RoleInference,
    pub quality_scores: QualityReport,
    pub ats_compatibility: AtsReport,
    pub match_analysis: MatchAnalysis,
    pub recommendations: Recommendations,
    pub ai_insights: AiInsights,
    pub meta: AnalysisMeta,
}

impl AnalysisReport {
    /// Guard used by the pipeline entry points: an empty, non-scanned
    /// document is the one fatal input.
    pub fn check_input(doc: &RawDocument) -> Result<(), AnalysisError> {
        if doc.is_empty() && !doc.source.is_scanned {
            return Err(AnalysisError::EmptyDocument);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_completeness_all_five_fields() {
        let mut contact = ContactInfo {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("555-123-4567".into()),
            location: Some("Austin, TX".into()),
            links: vec![ProfileLink {
                kind: LinkKind::Linkedin,
                url: "linkedin.com/in/janedoe".into(),
            }],
            completeness_score: 0.0,
        };
        contact.compute_completeness();
        assert_eq!(contact.completeness_score, 100.0);
    }

    #[test]
    fn test_contact_completeness_partial() {
        let mut contact = ContactInfo {
            email: Some("jane@example.com".into()),
            phone: Some("555-123-4567".into()),
            ..Default::default()
        };
        contact.compute_completeness();
        assert_eq!(contact.completeness_score, 40.0);
    }

    #[test]
    fn test_score_category_clamps_to_max() {
        let cat = ScoreCategory::new(50.0, 40.0, vec![]);
        assert_eq!(cat.score, 40.0);
        assert_eq!(cat.percentage, 100.0);

        let neg = ScoreCategory::new(-3.0, 10.0, vec![]);
        assert_eq!(neg.score, 0.0);
    }

    #[test]
    fn test_career_level_buckets() {
        assert_eq!(CareerLevel::from_years(1.5), CareerLevel::Junior);
        assert_eq!(CareerLevel::from_years(2.0), CareerLevel::Mid);
        assert_eq!(CareerLevel::from_years(6.0), CareerLevel::Senior);
        assert_eq!(CareerLevel::from_years(12.0), CareerLevel::Principal);
    }

    #[test]
    fn test_degree_rank_ordering() {
        assert!(DegreeRank::Doctorate > DegreeRank::Master);
        assert!(DegreeRank::Master > DegreeRank::Bachelor);
        assert!(DegreeRank::Bachelor > DegreeRank::Associate);
    }

    #[test]
    fn test_skill_set_dedup_is_case_and_punct_insensitive() {
        let mut set = SkillSet::new();
        set.insert("Node.js");
        set.insert("node js");
        set.insert("NODEJS");
        assert_eq!(set.len(), 1);
        assert!(set.contains("nodejs"));
    }

    #[test]
    fn test_date_range_duration() {
        let range = DateRange {
            start: YearMonth::new(2020, 1),
            end: Some(YearMonth::new(2020, 12)),
        };
        assert_eq!(range.duration_months(YearMonth::new(2025, 6)), 12);

        let open = DateRange { start: YearMonth::new(2024, 7), end: None };
        assert_eq!(open.duration_months(YearMonth::new(2025, 6)), 12);
    }

    #[test]
    fn test_quality_level_buckets() {
        assert_eq!(QualityLevel::from_score(90.0), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(85.0), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(76.0), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(49.9), QualityLevel::NeedsImprovement);
    }

    #[test]
    fn test_empty_document_guard() {
        let doc = RawDocument::new(
            "  \n\n ".to_string(),
            SourceInfo { is_scanned: false, ..Default::default() },
            LayoutSignals::default(),
        );
        assert!(AnalysisReport::check_input(&doc).is_err());

        let scanned = RawDocument::new(
            String::new(),
            SourceInfo { is_scanned: true, ..Default::default() },
            LayoutSignals::default(),
        );
        assert!(AnalysisReport::check_input(&scanned).is_ok());
    }
}
