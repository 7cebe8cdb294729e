//! Section classification.
//!
//! Splits the document into an ordered list of labeled sections that covers
//! every line exactly once. Recognition is heading-driven with a keyword
//! fallback for blocks that carry no heading at all.

use log::debug;

use crate::analysis::types::{RawDocument, Section, SectionKind};
use crate::lexicon::{EMAIL_RE, PHONE_RE, SECTION_HEADINGS, SECTION_KEYWORDS};

/// Heading lines longer than this are treated as body text.
const MAX_HEADING_LEN: usize = 60;

const HEADING_BASE_CONFIDENCE: f64 = 0.7;
const KEYWORD_CONFIDENCE_BOOST: f64 = 0.05;
/// Cap for sections recognized without a heading.
const INFERRED_MAX_CONFIDENCE: f64 = 0.6;
const INFERRED_BASE_CONFIDENCE: f64 = 0.3;
/// Minimum keyword hits before a headingless block gets a real label.
const INFERRED_MIN_HITS: usize = 2;

pub struct SectionClassifier;

impl SectionClassifier {
    /// Classify the document into ordered, non-overlapping sections whose
    /// line ranges jointly cover `0..doc.line_count`.
    pub fn classify(doc: &RawDocument) -> Vec<Section> {
        let lines: Vec<&str> = doc.text.lines().collect();
        if lines.is_empty() {
            return Vec::new();
        }

        // Block boundaries: each recognized heading opens a new block.
        let mut blocks: Vec<(SectionKind, String, usize)> = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if let Some((kind, title)) = Self::match_heading(line) {
                blocks.push((kind, title, i));
            }
        }

        let mut sections: Vec<Section> = Vec::new();

        // Leading block before any heading is inferred from content.
        let first_heading = blocks.first().map(|(_, _, i)| *i).unwrap_or(lines.len());
        if first_heading > 0 {
            sections.push(Self::infer_block(&lines, 0, first_heading));
        }

        for (idx, (kind, title, start)) in blocks.iter().enumerate() {
            let (kind, title) = (*kind, title.clone());
            let end = blocks.get(idx + 1).map(|(_, _, i)| *i).unwrap_or(lines.len());
            let body = &lines[*start..end];
            let confidence = Self::heading_confidence(kind, body);

            // A heading of the same kind immediately after the open section
            // extends it; a distant re-open stays its own segment.
            if let Some(last) = sections.last_mut() {
                if last.kind == kind && last.end_line == *start {
                    last.end_line = end;
                    last.word_count += Self::word_count(body);
                    last.confidence = last.confidence.max(confidence);
                    continue;
                }
            }

            sections.push(Section {
                kind,
                title,
                start_line: *start,
                end_line: end,
                confidence,
                word_count: Self::word_count(body),
            });
        }

        debug!(
            "classified {} sections over {} lines",
            sections.len(),
            lines.len()
        );
        sections
    }

    /// Recognize a heading line: short, non-blank, and matching one of the
    /// known heading phrases after normalization.
    fn match_heading(line: &str) -> Option<(SectionKind, String)> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.len() >= MAX_HEADING_LEN {
            return None;
        }
        let normalized = trimmed.trim_end_matches(':').trim().to_lowercase();
        for (kind, phrases) in SECTION_HEADINGS {
            if phrases.iter().any(|p| *p == normalized) {
                return Some((*kind, trimmed.to_string()));
            }
        }
        None
    }

    fn heading_confidence(kind: SectionKind, body: &[&str]) -> f64 {
        let hits = Self::keyword_hits(kind, body);
        (HEADING_BASE_CONFIDENCE + hits as f64 * KEYWORD_CONFIDENCE_BOOST).min(1.0)
    }

    /// Label a block that has no recognized heading, by keyword density.
    fn infer_block(lines: &[&str], start: usize, end: usize) -> Section {
        let body = &lines[start..end];
        let mut best: Option<(SectionKind, usize)> = None;
        for (kind, _) in SECTION_KEYWORDS {
            let hits = Self::keyword_hits(*kind, body);
            if best.map(|(_, h)| hits > h).unwrap_or(hits > 0) {
                best = Some((*kind, hits));
            }
        }
        // Contact details rarely sit under a heading; regex evidence counts.
        let contact_hits = Self::contact_hits(body);
        if best.map(|(_, h)| contact_hits > h).unwrap_or(contact_hits > 0) {
            best = Some((SectionKind::Contact, contact_hits));
        }

        let (kind, confidence) = match best {
            Some((kind, hits)) if hits >= INFERRED_MIN_HITS => (
                kind,
                (INFERRED_BASE_CONFIDENCE + hits as f64 * KEYWORD_CONFIDENCE_BOOST)
                    .min(INFERRED_MAX_CONFIDENCE),
            ),
            _ => (SectionKind::Other, INFERRED_BASE_CONFIDENCE),
        };

        Section {
            kind,
            title: String::new(),
            start_line: start,
            end_line: end,
            confidence,
            word_count: Self::word_count(body),
        }
    }

    fn keyword_hits(kind: SectionKind, body: &[&str]) -> usize {
        let keywords = SECTION_KEYWORDS
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, kw)| *kw)
            .unwrap_or(&[]);
        let text = body.join(" ").to_lowercase();
        keywords.iter().filter(|kw| text.contains(*kw)).count()
    }

    fn contact_hits(body: &[&str]) -> usize {
        body.iter()
            .map(|l| EMAIL_RE.find_iter(l).count() + PHONE_RE.find_iter(l).count())
            .sum()
    }

    fn word_count(body: &[&str]) -> usize {
        body.iter().map(|l| l.split_whitespace().count()).sum()
    }
}
