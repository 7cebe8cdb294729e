//! Quality scoring.
//!
//! Four weighted rubric categories totalling 100 points: content fit (40),
//! clarity and quantification (25), structure and readability (20), and ATS
//! friendliness (15). Every sub-score is derived only from the document,
//! the extracted entities, and the already-computed ATS total.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::types::{
    AtsReport, ExtractedEntities, QualityLevel, QualityReport, RawDocument, ScoreCategory,
    Section, SectionKind, SkillsMatchReport,
};
use crate::lexicon::{BULLET_RE, METRIC_PATTERNS, MODERATE_VERBS, STRONG_VERBS, WEAK_PHRASES};

const CONTENT_FIT_MAX: f64 = 40.0;
const CLARITY_MAX: f64 = 25.0;
const STRUCTURE_MAX: f64 = 20.0;
const ATS_MAX: f64 = 15.0;

/// Diversity fallback cap when no target skills were supplied; a target
/// match is the only way to earn the full 30 skill points.
const SKILLS_DIVERSITY_CAP: f64 = 20.0;

/// Words per sentence beyond which a sentence counts as long.
const LONG_SENTENCE_WORDS: usize = 25;

static PASSIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:was|were|been|being|is|are)\s+\w+ed\b").expect("passive pattern")
});

const REQUIRED_SECTIONS: &[SectionKind] = &[
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Contact,
];

pub struct QualityEngine;

impl QualityEngine {
    pub fn score(
        doc: &RawDocument,
        sections: &[Section],
        entities: &ExtractedEntities,
        skills_match: Option<&SkillsMatchReport>,
        target_years: Option<f64>,
        ats: &AtsReport,
    ) -> QualityReport {
        let content_fit = Self::score_content_fit(entities, skills_match, target_years);
        let clarity = Self::score_clarity(doc);
        let structure = Self::score_structure(doc, sections);
        let ats_cat = ScoreCategory::new(
            ats.total_score / 100.0 * ATS_MAX,
            ATS_MAX,
            vec![format!("ATS compatibility {:.0}/100", ats.total_score)],
        );

        let overall =
            content_fit.score + clarity.score + structure.score + ats_cat.score;
        let overall_score = (overall * 10.0).round() / 10.0;

        debug!(
            "quality overall={overall_score} (content={}, clarity={}, structure={}, ats={})",
            content_fit.score, clarity.score, structure.score, ats_cat.score
        );

        QualityReport {
            content_fit,
            clarity_quantification: clarity,
            structure_readability: structure,
            ats_friendliness: ats_cat,
            overall_score,
            quality_level: QualityLevel::from_score(overall_score),
        }
    }

    // ============================================================
    // CONTENT FIT (40 = skills 30 + experience 10)
    // ============================================================

    fn score_content_fit(
        entities: &ExtractedEntities,
        skills_match: Option<&SkillsMatchReport>,
        target_years: Option<f64>,
    ) -> ScoreCategory {
        let mut details = Vec::new();

        let skills_points = match skills_match {
            Some(report) => {
                details.push(format!(
                    "Target skill coverage {:.0}%",
                    report.overall_coverage
                ));
                report.overall_coverage / 100.0 * 30.0
            }
            None => {
                let count = entities.skills.len();
                details.push(format!("{count} recognized skills, no target to compare"));
                (count as f64 * 2.0).min(SKILLS_DIVERSITY_CAP)
            }
        };

        let years = entities.experience_summary.total_years;
        let experience_points = match target_years {
            Some(target) if target > 0.0 => {
                let alignment = (1.0 - (years - target).abs() / target).clamp(0.0, 1.0);
                details.push(format!(
                    "{years:.1} years of experience against a {target:.1} year target"
                ));
                alignment * 10.0
            }
            _ => {
                details.push(format!("{years:.1} years of experience"));
                if years >= 7.0 {
                    10.0
                } else if years >= 3.0 {
                    8.0
                } else if years >= 1.0 {
                    6.0
                } else {
                    4.0
                }
            }
        };

        ScoreCategory::new(skills_points + experience_points, CONTENT_FIT_MAX, details)
    }

    // ============================================================
    // CLARITY & QUANTIFICATION (25 = metrics 15 + verbs 10)
    // ============================================================

    fn score_clarity(doc: &RawDocument) -> ScoreCategory {
        let bullets: Vec<String> = doc
            .text
            .lines()
            .filter_map(|l| BULLET_RE.find(l.trim()).map(|m| l.trim()[m.end()..].to_string()))
            .collect();

        if bullets.is_empty() {
            return ScoreCategory::new(
                0.0,
                CLARITY_MAX,
                vec!["No bullet points found to assess".to_string()],
            );
        }

        let mut details = Vec::new();
        let total = bullets.len() as f64;

        let quantified = bullets
            .iter()
            .filter(|b| METRIC_PATTERNS.iter().any(|re| re.is_match(b)))
            .count();
        let metric_points = quantified as f64 / total * 15.0;
        details.push(format!("{quantified} of {} bullets carry a metric", bullets.len()));

        let first_word = |b: &str| {
            b.split_whitespace()
                .next()
                .map(|w| w.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase())
                .unwrap_or_default()
        };
        let strong = bullets.iter().filter(|b| STRONG_VERBS.contains(&first_word(b).as_str())).count();
        let moderate =
            bullets.iter().filter(|b| MODERATE_VERBS.contains(&first_word(b).as_str())).count();
        let weak = bullets
            .iter()
            .filter(|b| {
                let head = b.to_lowercase();
                WEAK_PHRASES.iter().any(|p| head.starts_with(p))
            })
            .count();

        let verb_points =
            (strong as f64 / total * 10.0 + moderate as f64 / total * 6.0).min(10.0);
        details.push(format!(
            "{strong} strong and {moderate} moderate opening verbs across {} bullets",
            bullets.len()
        ));
        if weak > 0 {
            details.push(format!("{weak} bullets open with a weak phrase"));
        }

        ScoreCategory::new(metric_points + verb_points, CLARITY_MAX, details)
    }

    // ============================================================
    // STRUCTURE & READABILITY (20 = sections 10 + readability 10)
    // ============================================================

    fn score_structure(doc: &RawDocument, sections: &[Section]) -> ScoreCategory {
        let mut details = Vec::new();

        let found = REQUIRED_SECTIONS
            .iter()
            .filter(|kind| sections.iter().any(|s| s.kind == **kind))
            .count();
        let section_points = found as f64 / REQUIRED_SECTIONS.len() as f64 * 10.0;
        details.push(format!("{found} of {} expected sections present", REQUIRED_SECTIONS.len()));

        let sentences: Vec<&str> = doc
            .text
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let readability_points = if sentences.is_empty() {
            details.push("No sentences found to assess readability".to_string());
            0.0
        } else {
            let mut points: f64 = 10.0;
            let total = sentences.len() as f64;

            let long_ratio = sentences
                .iter()
                .filter(|s| s.split_whitespace().count() > LONG_SENTENCE_WORDS)
                .count() as f64
                / total;
            if long_ratio > 0.3 {
                points -= 3.0;
                details.push("Over 30% of sentences run long; tighten them".to_string());
            } else if long_ratio > 0.2 {
                points -= 2.0;
                details.push("Over 20% of sentences run long".to_string());
            }

            let passive_ratio =
                sentences.iter().filter(|s| PASSIVE_RE.is_match(s)).count() as f64 / total;
            if passive_ratio > 0.3 {
                points -= 4.0;
                details.push("Heavy passive voice; rewrite in active voice".to_string());
            } else if passive_ratio > 0.2 {
                points -= 2.0;
                details.push("Noticeable passive voice".to_string());
            }

            let avg_len = sentences
                .iter()
                .map(|s| s.split_whitespace().count())
                .sum::<usize>() as f64
                / total;
            if !(5.0..=20.0).contains(&avg_len) {
                points -= 2.0;
                details.push(format!(
                    "Average sentence length {avg_len:.0} words is outside the 5-20 range"
                ));
            }

            points.max(0.0)
        };

        ScoreCategory::new(section_points + readability_points, STRUCTURE_MAX, details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ats::AtsAnalyzer;
    use crate::analysis::extract::FieldExtractor;
    use crate::analysis::sections::SectionClassifier;
    use crate::analysis::skills::SkillsMatcher;
    use crate::analysis::types::{LayoutSignals, SourceInfo, YearMonth};

    const NOW: YearMonth = YearMonth { year: 2025, month: 6 };

    fn pipeline(text: &str) -> (RawDocument, Vec<Section>, ExtractedEntities, AtsReport) {
        let doc = RawDocument::new(
            text.to_string(),
            SourceInfo { extension: ".pdf".into(), ..Default::default() },
            LayoutSignals::default(),
        );
        let sections = SectionClassifier::classify(&doc);
        let entities = FieldExtractor::extract(&doc, &sections, NOW);
        let ats = AtsAnalyzer::analyze(&doc, &sections, &entities.contact);
        (doc, sections, entities, ats)
    }

    const STRONG_RESUME: &str = "\
Jane Doe
jane@example.com 512-555-0187

Summary
Backend engineer with a record of measurable wins.

Experience
Senior Engineer at Acme
Jan 2018 - Present
- Reduced API latency by 45% across core services
- Led a team of 8 engineers through a platform rewrite
- Increased deployment frequency by 3x with CI/CD automation
- Built a billing pipeline processing 2,000,000 transactions daily

Education
Bachelor of Science in Computer Science
State University, 2016

Skills
Python, Django, PostgreSQL, Docker, Kubernetes, AWS, Redis, Kafka, Git, Linux";

    #[test]
    fn test_category_maxima_hold() {
        let (doc, sections, entities, ats) = pipeline(STRONG_RESUME);
        let report = QualityEngine::score(&doc, &sections, &entities, None, None, &ats);
        assert!(report.content_fit.score <= 40.0);
        assert!(report.clarity_quantification.score <= 25.0);
        assert!(report.structure_readability.score <= 20.0);
        assert!(report.ats_friendliness.score <= 15.0);
        assert!(report.overall_score <= 100.0);
        assert!(report.overall_score >= 0.0);
    }

    #[test]
    fn test_strong_resume_scores_high() {
        let (doc, sections, entities, ats) = pipeline(STRONG_RESUME);
        // Full-coverage target lifts the skills component to its maximum.
        let matched = SkillsMatcher::match_against(
            &entities.skills,
            &["Python".to_string(), "Django".to_string(), "PostgreSQL".to_string()],
            &[],
        );
        let report =
            QualityEngine::score(&doc, &sections, &entities, Some(&matched), Some(7.0), &ats);
        assert!(report.overall_score >= 85.0, "got {}", report.overall_score);
        assert_eq!(report.quality_level, QualityLevel::Excellent);
    }

    #[test]
    fn test_weak_resume_scores_low() {
        let (doc, sections, entities, ats) =
            pipeline("stuff I did\nvarious things at places\nno dates anywhere");
        let report = QualityEngine::score(&doc, &sections, &entities, None, None, &ats);
        assert!(report.overall_score < 50.0);
        assert_eq!(report.quality_level, QualityLevel::NeedsImprovement);
    }

    #[test]
    fn test_experience_alignment_with_target() {
        let (doc, sections, entities, ats) = pipeline(STRONG_RESUME);
        // ~7.4 actual years against a 20 year target gives low alignment.
        let far = QualityEngine::score(&doc, &sections, &entities, None, Some(20.0), &ats);
        let near = QualityEngine::score(&doc, &sections, &entities, None, Some(7.0), &ats);
        assert!(near.content_fit.score > far.content_fit.score);
    }

    #[test]
    fn test_skills_without_target_are_capped() {
        let (doc, sections, entities, ats) = pipeline(STRONG_RESUME);
        let report = QualityEngine::score(&doc, &sections, &entities, None, None, &ats);
        // 10 points of experience ladder at most, plus the 20 point
        // diversity cap, bounds content fit at 30 without a target.
        assert!(report.content_fit.score <= 30.0);
    }

    #[test]
    fn test_missing_sections_reduce_structure_proportionally() {
        let (doc, sections, _, _) = pipeline(STRONG_RESUME);
        let full = QualityEngine::score_structure(&doc, &sections);
        assert!(full.details[0].starts_with("4 of 4"));

        // Same document text, but education and skills unrecognized:
        // 2 of 4 expected sections is a five point swing on the ten
        // point section component while readability stays put.
        let pruned: Vec<Section> = sections
            .iter()
            .filter(|s| !matches!(s.kind, SectionKind::Education | SectionKind::Skills))
            .cloned()
            .collect();
        let partial = QualityEngine::score_structure(&doc, &pruned);
        assert!(partial.details[0].starts_with("2 of 4"));
        assert!((full.score - partial.score - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_bullets_means_zero_clarity() {
        let (doc, sections, entities, ats) =
            pipeline("Experience\nworked on things without any bullet formatting");
        let report = QualityEngine::score(&doc, &sections, &entities, None, None, &ats);
        assert_eq!(report.clarity_quantification.score, 0.0);
    }
}
