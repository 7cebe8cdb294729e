//! Field extraction.
//!
//! Turns classified sections into structured entities: contact details,
//! employment history, education, skills, projects, certifications, and an
//! inferred primary role. Extraction is lexicon-driven and never consults
//! anything outside the document text.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::types::{
    CareerLevel, CertificationEntry, ContactInfo, DateRange, EducationEntry, ExperienceEntry,
    ExperienceSummary, ExtractedEntities, LinkKind, ProfileLink, ProjectEntry, RawDocument,
    RoleInference, Section, SectionKind, SkillSet, YearMonth,
};
use crate::lexicon::{
    BULLET_RE, CERTIFICATION_PROVIDERS, DATE_RANGE_RE, DEGREE_PATTERNS, EMAIL_RE, GITHUB_RE,
    GPA_RE, HONORS_KEYWORDS, LINKEDIN_RE, LOCATION_RE, PHONE_RE, ROLE_KEYWORDS, SKILL_TAXONOMY,
    URL_RE, YEAR_RE,
};

/// Minimum digits before a phone-shaped match is accepted. Filters out
/// year ranges like "2020 - 2022" that satisfy the raw pattern.
const PHONE_MIN_DIGITS: usize = 9;

/// Boundary-aware matchers for every taxonomy spelling, compiled once.
/// Spellings of one or two characters are matched case-sensitively so "R"
/// and "Go" do not fire on ordinary prose.
static SKILL_MATCHERS: Lazy<Vec<(usize, Regex)>> = Lazy::new(|| {
    let mut matchers = Vec::new();
    for (idx, row) in SKILL_TAXONOMY.iter().enumerate() {
        for spelling in std::iter::once(&row.canonical).chain(row.aliases.iter()) {
            let escaped = regex::escape(spelling);
            let pattern = if spelling.len() <= 2 {
                format!(r"(?:^|[^A-Za-z0-9+#]){escaped}(?:$|[^A-Za-z0-9+#])")
            } else {
                format!(r"(?i)(?:^|[^A-Za-z0-9+#]){escaped}(?:$|[^A-Za-z0-9+#])")
            };
            matchers.push((idx, Regex::new(&pattern).expect("skill matcher")));
        }
    }
    matchers
});

pub struct FieldExtractor;

impl FieldExtractor {
    pub fn extract(doc: &RawDocument, sections: &[Section], now: YearMonth) -> ExtractedEntities {
        let lines: Vec<&str> = doc.text.lines().collect();

        let mut entities = ExtractedEntities {
            contact: Self::extract_contact(&lines, sections),
            experience: Self::extract_experience(&lines, sections, now),
            education: Self::extract_education(&lines, sections),
            ..Default::default()
        };
        entities.experience_summary = Self::summarize_experience(&entities.experience, now);
        entities.highest_degree = entities.education.iter().filter_map(|e| e.rank).max();
        entities.skills = Self::extract_skills(&doc.text);
        for name in entities.skills.iter() {
            if let Some(row) = SKILL_TAXONOMY
                .iter()
                .find(|r| SkillSet::normalize(r.canonical) == SkillSet::normalize(name))
            {
                entities
                    .skills_categorized
                    .entry(row.category)
                    .or_default()
                    .push(name.clone());
            }
        }
        entities.projects = Self::extract_projects(&lines, sections);
        entities.certifications = Self::extract_certifications(&lines, sections);
        entities.role_inference = Self::infer_role(&doc.text);

        debug!(
            "extracted {} skills, {} experience entries, {} education entries",
            entities.skills.len(),
            entities.experience.len(),
            entities.education.len()
        );
        entities
    }

    // ============================================================
    // CONTACT
    // ============================================================

    fn extract_contact(lines: &[&str], sections: &[Section]) -> ContactInfo {
        // Contact details live in the contact section when one exists,
        // otherwise anywhere in the document.
        let scan: Vec<&str> = match sections.iter().find(|s| s.kind == SectionKind::Contact) {
            Some(s) => lines[s.start_line..s.end_line].to_vec(),
            None => lines.to_vec(),
        };
        let joined = scan.join("\n");

        let mut contact = ContactInfo {
            email: EMAIL_RE.find(&joined).map(|m| m.as_str().to_string()),
            ..Default::default()
        };

        contact.phone = PHONE_RE
            .find_iter(&joined)
            .map(|m| m.as_str().trim().to_string())
            .find(|p| p.chars().filter(|c| c.is_ascii_digit()).count() >= PHONE_MIN_DIGITS);

        if let Some(m) = LINKEDIN_RE.find(&joined) {
            contact.links.push(ProfileLink {
                kind: LinkKind::Linkedin,
                url: m.as_str().trim_end_matches('/').to_string(),
            });
        }
        if let Some(m) = GITHUB_RE.find(&joined) {
            contact.links.push(ProfileLink {
                kind: LinkKind::Github,
                url: m.as_str().trim_end_matches('/').to_string(),
            });
        }
        for m in URL_RE.find_iter(&joined) {
            let url = m.as_str();
            if !LINKEDIN_RE.is_match(url) && !GITHUB_RE.is_match(url) {
                contact.links.push(ProfileLink {
                    kind: LinkKind::Portfolio,
                    url: url.trim_end_matches('/').to_string(),
                });
                break;
            }
        }

        contact.location = scan
            .iter()
            .map(|l| l.trim())
            .find(|l| LOCATION_RE.is_match(l) && !EMAIL_RE.is_match(l))
            .map(|l| l.to_string());

        contact.name = Self::guess_name(lines);
        contact.compute_completeness();
        contact
    }

    /// Name heuristic: the first short line near the top that is plain
    /// words, before any line that looks like contact data or a heading.
    fn guess_name(lines: &[&str]) -> Option<String> {
        for line in lines.iter().take(5) {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if EMAIL_RE.is_match(trimmed)
                || URL_RE.is_match(trimmed)
                || trimmed.chars().any(|c| c.is_ascii_digit())
            {
                continue;
            }
            let words: Vec<&str> = trimmed.split_whitespace().collect();
            let looks_like_name = (2..=4).contains(&words.len())
                && trimmed.len() < 40
                && words.iter().all(|w| w.chars().next().map(|c| c.is_uppercase()).unwrap_or(false));
            if looks_like_name {
                return Some(trimmed.to_string());
            }
            // First substantial line was not a name; stop looking.
            if words.len() > 6 {
                return None;
            }
        }
        None
    }

    // ============================================================
    // EXPERIENCE
    // ============================================================

    fn extract_experience(lines: &[&str], sections: &[Section], now: YearMonth) -> Vec<ExperienceEntry> {
        let mut entries: Vec<ExperienceEntry> = Vec::new();
        let mut current: Option<ExperienceEntry> = None;
        let mut pending_header: Option<String> = None;

        for section in sections.iter().filter(|s| s.kind == SectionKind::Experience) {
            for line in &lines[section.start_line..section.end_line] {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if let Some(m) = DATE_RANGE_RE.find(trimmed) {
                    if let Some(prev) = current.take() {
                        entries.push(prev);
                    }
                    let range = Self::parse_date_range(m.as_str());
                    let remainder = format!("{}{}", &trimmed[..m.start()], &trimmed[m.end()..]);
                    let header = {
                        let r = remainder.trim_matches(|c: char| c.is_whitespace() || "|,-()".contains(c));
                        if r.is_empty() { pending_header.take() } else { Some(r.to_string()) }
                    };
                    let (title, company) = Self::split_header(header);
                    let is_current = range.as_ref().map(|r| r.end.is_none()).unwrap_or(false);
                    let duration_months =
                        range.as_ref().map(|r| r.duration_months(now)).unwrap_or(0);
                    current = Some(ExperienceEntry {
                        company,
                        title,
                        range,
                        is_current,
                        duration_months,
                        responsibilities: Vec::new(),
                    });
                } else if let Some(m) = BULLET_RE.find(trimmed) {
                    let text = trimmed[m.end()..].trim().to_string();
                    match current.as_mut() {
                        Some(entry) => entry.responsibilities.push(text),
                        None => {
                            // Bullets before any dated header form an
                            // undated entry.
                            let (title, company) = Self::split_header(pending_header.take());
                            current = Some(ExperienceEntry {
                                company,
                                title,
                                range: None,
                                is_current: false,
                                duration_months: 0,
                                responsibilities: vec![text],
                            });
                        }
                    }
                } else {
                    pending_header = Some(trimmed.to_string());
                }
            }
        }
        if let Some(entry) = current {
            entries.push(entry);
        }
        entries
    }

    /// "Senior Engineer at Acme" or "Senior Engineer | Acme" style headers.
    fn split_header(header: Option<String>) -> (Option<String>, Option<String>) {
        let header = match header {
            Some(h) => h,
            None => return (None, None),
        };
        for sep in [" at ", " | ", " - ", ", "] {
            if let Some(pos) = header.find(sep) {
                let title = header[..pos].trim().to_string();
                let company = header[pos + sep.len()..].trim().to_string();
                if !title.is_empty() && !company.is_empty() {
                    return (Some(title), Some(company));
                }
            }
        }
        (Some(header), None)
    }

    fn parse_date_range(text: &str) -> Option<DateRange> {
        let caps = DATE_RANGE_RE.captures(text)?;
        let start_year: i32 = caps.get(2)?.as_str().parse().ok()?;
        let start_month = caps.get(1).map(|m| Self::month_number(m.as_str())).unwrap_or(1);
        let start = YearMonth::new(start_year, start_month);

        let end_text = caps.get(4)?.as_str().to_lowercase();
        let end = if matches!(end_text.as_str(), "present" | "current" | "now") {
            None
        } else {
            let year: i32 = end_text.parse().ok()?;
            let month = caps.get(3).map(|m| Self::month_number(m.as_str())).unwrap_or(12);
            Some(YearMonth::new(year, month))
        };
        Some(DateRange { start, end })
    }

    fn month_number(name: &str) -> u32 {
        match name.to_lowercase().get(..3) {
            Some("jan") => 1,
            Some("feb") => 2,
            Some("mar") => 3,
            Some("apr") => 4,
            Some("may") => 5,
            Some("jun") => 6,
            Some("jul") => 7,
            Some("aug") => 8,
            Some("sep") => 9,
            Some("oct") => 10,
            Some("nov") => 11,
            Some("dec") => 12,
            _ => 1,
        }
    }

    /// Total years via union of month intervals, so overlapping roles are
    /// counted once.
    fn summarize_experience(entries: &[ExperienceEntry], now: YearMonth) -> ExperienceSummary {
        let mut intervals: Vec<(i64, i64)> = entries
            .iter()
            .filter_map(|e| e.range.as_ref())
            .map(|r| (r.start.index(), r.end.unwrap_or(now).index()))
            .filter(|(s, e)| e >= s)
            .collect();
        intervals.sort_unstable();

        let mut total_months: i64 = 0;
        let mut open: Option<(i64, i64)> = None;
        for (start, end) in intervals {
            match open {
                Some((os, oe)) if start <= oe + 1 => open = Some((os, oe.max(end))),
                Some((os, oe)) => {
                    total_months += oe - os + 1;
                    open = Some((start, end));
                }
                None => open = Some((start, end)),
            }
        }
        if let Some((os, oe)) = open {
            total_months += oe - os + 1;
        }

        let total_years = (total_months as f64 / 12.0 * 10.0).round() / 10.0;
        let most_recent_role = entries
            .iter()
            .max_by_key(|e| {
                (
                    e.is_current,
                    e.range.as_ref().map(|r| r.start.index()).unwrap_or(i64::MIN),
                )
            })
            .and_then(|e| e.title.clone());

        ExperienceSummary {
            total_years,
            career_level: CareerLevel::from_years(total_years),
            most_recent_role,
        }
    }

    // ============================================================
    // EDUCATION
    // ============================================================

    fn extract_education(lines: &[&str], sections: &[Section]) -> Vec<EducationEntry> {
        let mut entries: Vec<EducationEntry> = Vec::new();

        for section in sections.iter().filter(|s| s.kind == SectionKind::Education) {
            for line in &lines[section.start_line..section.end_line] {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let lower = trimmed.to_lowercase();

                let degree = DEGREE_PATTERNS.iter().find(|(p, _)| lower.contains(p));
                let institution = ["university", "college", "institute", "school", "academy"]
                    .iter()
                    .any(|kw| lower.contains(kw))
                    .then(|| trimmed.to_string());

                if let Some((pattern, rank)) = degree {
                    entries.push(EducationEntry {
                        degree: Some(Self::degree_phrase(trimmed, pattern)),
                        rank: Some(*rank),
                        institution,
                        year: YEAR_RE
                            .find_iter(trimmed)
                            .last()
                            .and_then(|m| m.as_str().parse().ok()),
                        gpa: GPA_RE
                            .captures(trimmed)
                            .and_then(|c| c.get(1))
                            .and_then(|m| m.as_str().parse().ok()),
                        honors: HONORS_KEYWORDS
                            .iter()
                            .find(|h| lower.contains(*h))
                            .map(|h| h.to_string()),
                    });
                } else if let Some(last) = entries.last_mut() {
                    // Detail lines after a degree enrich that entry.
                    if last.institution.is_none() {
                        last.institution = institution;
                    }
                    if last.year.is_none() {
                        last.year = YEAR_RE
                            .find_iter(trimmed)
                            .last()
                            .and_then(|m| m.as_str().parse().ok());
                    }
                    if last.gpa.is_none() {
                        last.gpa = GPA_RE
                            .captures(trimmed)
                            .and_then(|c| c.get(1))
                            .and_then(|m| m.as_str().parse().ok());
                    }
                    if last.honors.is_none() {
                        last.honors = HONORS_KEYWORDS
                            .iter()
                            .find(|h| lower.contains(*h))
                            .map(|h| h.to_string());
                    }
                }
            }
        }
        entries
    }

    /// Expand the matched pattern to the full phrase on the line, e.g.
    /// "bachelor" on "Bachelor of Science in CS" yields the whole phrase up
    /// to the first delimiter.
    fn degree_phrase(line: &str, pattern: &str) -> String {
        let lower = line.to_lowercase();
        let start = lower.find(pattern).unwrap_or(0);
        // Lowercasing is length-preserving for ASCII; fall back to the
        // whole line if the offset lands off a char boundary.
        let rest = line.get(start..).unwrap_or(line);
        let end = rest.find([',', '|', '(']).unwrap_or(rest.len());
        rest[..end].trim().to_string()
    }

    // ============================================================
    // SKILLS
    // ============================================================

    fn extract_skills(text: &str) -> SkillSet {
        let mut set = SkillSet::new();
        for (idx, matcher) in SKILL_MATCHERS.iter() {
            if matcher.is_match(text) {
                set.insert(SKILL_TAXONOMY[*idx].canonical);
            }
        }
        set
    }

    // ============================================================
    // PROJECTS & CERTIFICATIONS
    // ============================================================

    fn extract_projects(lines: &[&str], sections: &[Section]) -> Vec<ProjectEntry> {
        let mut projects: Vec<ProjectEntry> = Vec::new();

        for section in sections.iter().filter(|s| s.kind == SectionKind::Projects) {
            // Skip the heading line when there is one; inferred sections
            // start with content.
            let start = if section.title.is_empty() {
                section.start_line
            } else {
                section.start_line + 1
            };
            for line in &lines[start..section.end_line] {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if let Some(m) = BULLET_RE.find(trimmed) {
                    if let Some(project) = projects.last_mut() {
                        if !project.description.is_empty() {
                            project.description.push(' ');
                        }
                        project.description.push_str(trimmed[m.end()..].trim());
                    }
                } else {
                    projects.push(ProjectEntry {
                        title: trimmed.to_string(),
                        description: String::new(),
                        technologies: Vec::new(),
                    });
                }
            }
        }

        for project in &mut projects {
            let full = format!("{} {}", project.title, project.description);
            project.technologies = Self::extract_skills(&full).iter().cloned().collect();
        }
        projects
    }

    fn extract_certifications(lines: &[&str], sections: &[Section]) -> Vec<CertificationEntry> {
        let mut certs: Vec<CertificationEntry> = Vec::new();

        for section in sections.iter().filter(|s| s.kind == SectionKind::Certifications) {
            let start = if section.title.is_empty() {
                section.start_line
            } else {
                section.start_line + 1
            };
            for line in &lines[start..section.end_line] {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let name = BULLET_RE
                    .find(trimmed)
                    .map(|m| trimmed[m.end()..].trim())
                    .unwrap_or(trimmed);
                certs.push(CertificationEntry {
                    name: name.to_string(),
                    issuer: CERTIFICATION_PROVIDERS
                        .iter()
                        .find(|p| name.to_lowercase().contains(&p.to_lowercase()))
                        .map(|p| p.to_string()),
                    year: YEAR_RE
                        .find_iter(name)
                        .last()
                        .and_then(|m| m.as_str().parse().ok()),
                });
            }
        }
        certs
    }

    // ============================================================
    // ROLE INFERENCE
    // ============================================================

    fn infer_role(text: &str) -> RoleInference {
        let lower = text.to_lowercase();
        let mut best: Option<(&str, Vec<String>)> = None;

        for (role, keywords) in ROLE_KEYWORDS {
            let hits: Vec<String> = keywords
                .iter()
                .filter(|kw| lower.contains(*kw))
                .map(|kw| kw.to_string())
                .collect();
            let better = match &best {
                Some((_, prev)) => hits.len() > prev.len(),
                None => hits.len() >= 2,
            };
            if better {
                best = Some((role, hits));
            }
        }

        match best {
            Some((role, hits)) => {
                let total = ROLE_KEYWORDS
                    .iter()
                    .find(|(r, _)| *r == role)
                    .map(|(_, kw)| kw.len())
                    .unwrap_or(1);
                RoleInference {
                    primary_role: Some(role.to_string()),
                    confidence: (hits.len() as f64 / total as f64).min(1.0),
                    supporting_keywords: hits,
                }
            }
            None => RoleInference::default(),
        }
    }
}
