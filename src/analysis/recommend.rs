//! Recommendation aggregation.
//!
//! Collects actionable findings from every scoring stage into one
//! deduplicated, priority-ordered list. Aggregation adds no new analysis;
//! it only rephrases and ranks what the stages already found.

use crate::analysis::types::{
    AtsReport, ExtractedEntities, IssueSource, Priority, QualityReport, RawDocument,
    Recommendations, RecommendationItem, Section, SectionKind, SkillsMatchReport,
};

/// Word-count window outside which length guidance is emitted.
const MIN_COMFORTABLE_WORDS: usize = 300;
const MAX_COMFORTABLE_WORDS: usize = 1000;

const REQUIRED_SECTIONS: &[SectionKind] = &[
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Contact,
];

pub struct RecommendationAggregator;

impl RecommendationAggregator {
    pub fn aggregate(
        doc: &RawDocument,
        sections: &[Section],
        entities: &ExtractedEntities,
        quality: &QualityReport,
        ats: &AtsReport,
        skills_match: Option<&SkillsMatchReport>,
    ) -> Recommendations {
        let mut items: Vec<RecommendationItem> = Vec::new();

        // ATS findings first; a hard penalty outranks everything else.
        if ats.critical_penalty {
            items.push(RecommendationItem::new(
                "Replace the scanned document with a text-based export; nothing in it \
                 can currently be parsed",
                Priority::Critical,
                IssueSource::Ats,
            ));
        }
        for issue in &ats.priority_issues {
            let priority = if ats.critical_penalty {
                Priority::Critical
            } else {
                Priority::Medium
            };
            items.push(RecommendationItem::new(issue.clone(), priority, IssueSource::Ats));
        }

        // Structural gaps.
        for kind in REQUIRED_SECTIONS {
            if !sections.iter().any(|s| s.kind == *kind) {
                items.push(RecommendationItem::new(
                    format!("Add a clearly labeled {kind} section"),
                    Priority::High,
                    IssueSource::Sections,
                ));
            }
        }

        // Contact gaps.
        if entities.contact.email.is_none() && entities.contact.phone.is_none() {
            items.push(RecommendationItem::new(
                "Add an email address and phone number so recruiters can reach you",
                Priority::Critical,
                IssueSource::Extraction,
            ));
        } else if !entities.contact.is_reachable() {
            items.push(RecommendationItem::new(
                "Put your full name prominently at the top of the document",
                Priority::High,
                IssueSource::Extraction,
            ));
        }
        if !entities.contact.links.iter().any(|l| {
            matches!(l.kind, crate::analysis::types::LinkKind::Linkedin)
        }) {
            items.push(RecommendationItem::new(
                "Add a LinkedIn profile link",
                Priority::Low,
                IssueSource::Extraction,
            ));
        }

        // Target-match gaps.
        if let Some(report) = skills_match {
            if !report.missing_required.is_empty() {
                items.push(RecommendationItem::new(
                    format!(
                        "Add or demonstrate these required skills: {}",
                        report.missing_required.join(", ")
                    ),
                    Priority::High,
                    IssueSource::Skills,
                ));
            }
            if !report.missing_preferred.is_empty() {
                items.push(RecommendationItem::new(
                    format!(
                        "Consider covering preferred skills: {}",
                        report.missing_preferred.join(", ")
                    ),
                    Priority::Low,
                    IssueSource::Skills,
                ));
            }
        }

        // Writing quality.
        if quality.clarity_quantification.percentage < 50.0 {
            items.push(RecommendationItem::new(
                "Quantify more bullet points with concrete numbers, percentages, or outcomes",
                Priority::Medium,
                IssueSource::Quality,
            ));
        }
        for detail in &quality.clarity_quantification.details {
            if detail.contains("weak phrase") {
                items.push(RecommendationItem::new(
                    "Rewrite bullets that open with phrases like 'responsible for' to lead \
                     with an action verb",
                    Priority::Medium,
                    IssueSource::Quality,
                ));
            }
        }
        if quality.structure_readability.percentage < 50.0 {
            items.push(RecommendationItem::new(
                "Improve structure: use standard section headings and shorter sentences",
                Priority::Medium,
                IssueSource::Quality,
            ));
        }

        // Length guidance is advisory only and never affects a score.
        if doc.word_count > 0 && doc.word_count < MIN_COMFORTABLE_WORDS {
            items.push(RecommendationItem::new(
                format!(
                    "At {} words the resume reads thin; expand accomplishments with detail",
                    doc.word_count
                ),
                Priority::Medium,
                IssueSource::Quality,
            ));
        } else if doc.word_count > MAX_COMFORTABLE_WORDS {
            items.push(RecommendationItem::new(
                format!(
                    "At {} words the resume runs long; trim to the most relevant material",
                    doc.word_count
                ),
                Priority::Low,
                IssueSource::Quality,
            ));
        }

        Self::finalize(items)
    }

    /// Dedup by text (case-insensitive, first occurrence wins), then order
    /// by priority with insertion order preserved inside each band.
    fn finalize(items: Vec<RecommendationItem>) -> Recommendations {
        let mut seen: Vec<String> = Vec::new();
        let mut unique: Vec<RecommendationItem> = Vec::new();
        for item in items {
            let key = item.text.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                unique.push(item);
            }
        }
        unique.sort_by_key(|i| i.priority.rank());

        let bucket = |p: Priority| {
            unique
                .iter()
                .filter(|i| i.priority == p)
                .map(|i| i.text.clone())
                .collect::<Vec<_>>()
        };

        Recommendations {
            top_3: unique.iter().take(3).cloned().collect(),
            critical: bucket(Priority::Critical),
            high: bucket(Priority::High),
            medium: bucket(Priority::Medium),
            low: bucket(Priority::Low),
        }
    }
}
