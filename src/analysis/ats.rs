//! ATS compatibility scoring.
//!
//! Three weighted sub-scores in [0, 100]: file format, layout, and
//! parseable content. A scanned document with no extracted text is the one
//! hard failure and zeroes the whole score.

use log::debug;

use crate::analysis::types::{
    AtsBreakdown, AtsReport, CompatibilityLevel, ContactInfo, RawDocument, Section, SectionKind,
};
use crate::lexicon::PROBLEMATIC_SYMBOLS;

const FILE_FORMAT_WEIGHT: f64 = 0.3;
const LAYOUT_WEIGHT: f64 = 0.3;
const CONTENT_WEIGHT: f64 = 0.4;

/// Sections an ATS parser expects to locate.
const EXPECTED_SECTIONS: &[SectionKind] = &[
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Contact,
];

pub struct AtsAnalyzer;

impl AtsAnalyzer {
    pub fn analyze(doc: &RawDocument, sections: &[Section], contact: &ContactInfo) -> AtsReport {
        let mut issues: Vec<String> = Vec::new();

        // Image-only documents give an ATS nothing to parse at all.
        if doc.source.is_scanned && doc.is_empty() {
            issues.push(
                "Document appears to be a scanned image with no extractable text; \
                 an ATS cannot read any of it"
                    .to_string(),
            );
            return AtsReport {
                total_score: 0.0,
                compatibility_level: CompatibilityLevel::CriticalIssues,
                breakdown: AtsBreakdown { file_format: 0.0, layout: 0.0, content: 0.0 },
                critical_penalty: true,
                priority_issues: issues,
            };
        }

        let file_format = Self::score_file_format(doc, &mut issues);
        let layout = Self::score_layout(doc, &mut issues);
        let content = Self::score_content(doc, sections, contact, &mut issues);

        let total = (file_format * FILE_FORMAT_WEIGHT
            + layout * LAYOUT_WEIGHT
            + content * CONTENT_WEIGHT)
            .clamp(0.0, 100.0);
        let total_score = (total * 10.0).round() / 10.0;

        debug!(
            "ats total={total_score} (format={file_format}, layout={layout}, content={content})"
        );

        AtsReport {
            total_score,
            compatibility_level: CompatibilityLevel::from_score(total_score),
            breakdown: AtsBreakdown { file_format, layout, content },
            critical_penalty: false,
            priority_issues: issues,
        }
    }

    fn score_file_format(doc: &RawDocument, issues: &mut Vec<String>) -> f64 {
        if doc.source.is_scanned {
            issues.push("Scanned source file; export a text-based version instead".to_string());
            return 0.0;
        }
        match doc.source.extension.as_str() {
            ".pdf" => 100.0,
            ".docx" => 90.0,
            ".doc" => {
                issues.push(
                    "Legacy .doc format; save as .docx or PDF for reliable parsing".to_string(),
                );
                70.0
            }
            ".txt" | "" => 100.0, // plain text input carries no format risk
            other => {
                issues.push(format!(
                    "Uncommon file format '{other}'; prefer PDF or DOCX"
                ));
                30.0
            }
        }
    }

    fn score_layout(doc: &RawDocument, issues: &mut Vec<String>) -> f64 {
        let mut score: f64 = 100.0;
        if doc.layout.multi_column {
            score -= 40.0;
            issues.push(
                "Multi-column layout detected; ATS parsers read columns out of order".to_string(),
            );
        }
        if doc.layout.table_count > 3 {
            score -= 30.0;
            issues.push(format!(
                "{} tables detected; table contents are often dropped by ATS parsers",
                doc.layout.table_count
            ));
        }
        if doc.layout.image_count > 2 {
            score -= 30.0;
            issues.push(format!(
                "{} images detected; images are invisible to an ATS",
                doc.layout.image_count
            ));
        }
        score.max(0.0)
    }

    fn score_content(
        doc: &RawDocument,
        sections: &[Section],
        contact: &ContactInfo,
        issues: &mut Vec<String>,
    ) -> f64 {
        // Expected sections: up to 45 points.
        let found = EXPECTED_SECTIONS
            .iter()
            .filter(|kind| sections.iter().any(|s| s.kind == **kind))
            .count();
        let section_points = found as f64 / EXPECTED_SECTIONS.len() as f64 * 45.0;
        for kind in EXPECTED_SECTIONS {
            if !sections.iter().any(|s| s.kind == *kind) {
                issues.push(format!("No clearly labeled {kind} section found"));
            }
        }

        // Reachable contact details: up to 35 points.
        let contact_points = if contact.is_reachable() {
            35.0
        } else if contact.email.is_some() || contact.phone.is_some() {
            issues.push("Candidate name could not be identified near the top".to_string());
            20.0
        } else {
            issues.push("No email address or phone number found".to_string());
            0.0
        };

        // Decorative symbols: 20 points clean, 10 with a few, 0 beyond.
        let symbol_count = doc
            .text
            .chars()
            .filter(|c| PROBLEMATIC_SYMBOLS.contains(c))
            .count();
        let symbol_points = match symbol_count {
            0 => 20.0,
            1..=5 => {
                issues.push(format!(
                    "{symbol_count} decorative symbols found; replace with plain bullets"
                ));
                10.0
            }
            _ => {
                issues.push(format!(
                    "{symbol_count} decorative symbols found; they frequently corrupt ATS parsing"
                ));
                0.0
            }
        };

        section_points + contact_points + symbol_points
    }
}
