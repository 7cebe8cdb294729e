//! Static heuristic data tables.
//!
//! All keyword dictionaries, verb lexicons, skill taxonomies and regex
//! patterns used by the pipeline live here as versioned, immutable tables.
//! They are compiled once at first use and shared read-only across all
//! concurrent analysis requests; no request may mutate them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::types::{DegreeRank, SectionKind, SkillCategory};

/// Bumped whenever a table changes in a way that shifts scores.
pub const LEXICON_VERSION: &str = "2025.2";

// ============================================================
// SECTION HEADINGS & KEYWORDS
// ============================================================

/// Heading phrases that open a section of the given kind. Matched against
/// normalized heading lines (lowercased, trailing ':' stripped). Order
/// within a kind is irrelevant; across kinds, first match wins.
pub const SECTION_HEADINGS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Contact,
        &[
            "contact",
            "contact information",
            "contact details",
            "personal details",
            "personal information",
        ],
    ),
    (
        SectionKind::Summary,
        &[
            "summary",
            "professional summary",
            "career summary",
            "summary of qualifications",
            "executive summary",
            "profile",
            "objective",
            "career objective",
            "about me",
        ],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "career history",
            "work history",
        ],
    ),
    (
        SectionKind::Education,
        &[
            "education",
            "academic background",
            "educational background",
            "qualifications",
            "academic qualifications",
        ],
    ),
    (
        SectionKind::Skills,
        &[
            "skills",
            "technical skills",
            "core competencies",
            "skills and abilities",
            "key skills",
            "competencies",
            "technologies",
        ],
    ),
    (
        SectionKind::Projects,
        &[
            "projects",
            "key projects",
            "notable projects",
            "personal projects",
            "project experience",
        ],
    ),
    (
        SectionKind::Certifications,
        &[
            "certifications",
            "certificates",
            "professional certifications",
            "licenses and certifications",
            "courses and certifications",
        ],
    ),
];

/// In-body keywords used for confidence boosts and headingless inference.
pub const SECTION_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Experience,
        &["worked", "responsible", "managed", "developed", "led", "achieved", "company"],
    ),
    (
        SectionKind::Education,
        &["university", "college", "degree", "bachelor", "master", "phd", "gpa"],
    ),
    (
        SectionKind::Skills,
        &["proficient", "experienced", "knowledge", "familiar", "programming"],
    ),
    (
        SectionKind::Projects,
        &["project", "built", "created", "implemented", "designed"],
    ),
    (
        SectionKind::Certifications,
        &["certified", "license", "credential", "certification"],
    ),
];

// ============================================================
// ACTION VERBS (clarity scoring)
// ============================================================

pub const STRONG_VERBS: &[&str] = &[
    "achieved", "built", "created", "designed", "developed", "directed", "established",
    "generated", "implemented", "improved", "increased", "launched", "led", "managed",
    "optimized", "organized", "produced", "reduced", "restructured", "solved",
    "streamlined", "transformed", "upgraded",
];

pub const MODERATE_VERBS: &[&str] = &[
    "administered", "analyzed", "assisted", "collaborated", "coordinated", "delivered",
    "executed", "facilitated", "maintained", "operated", "participated", "performed",
    "processed", "provided", "supported", "utilized", "worked",
];

/// Weak leading phrases; matched as substrings of the bullet head.
pub const WEAK_PHRASES: &[&str] = &[
    "responsible for", "duties included", "involved in", "helped with", "tasked with",
];

// ============================================================
// QUANTIFICATION PATTERNS
// ============================================================

/// Patterns that mark a bullet line as carrying a quantified metric.
pub static METRIC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b\d+(?:\.\d+)?%",                                        // percentages
        r"\$\d[\d,]*(?:\.\d+)?[kmbKMB]?",                           // money
        r"\b\d[\d,]*\+?\s*(?:users?|customers?|clients?)",          // user counts
        r"\b\d[\d,]*\s*(?:ms|seconds?|minutes?|hours?|days?)",      // time
        r"\b\d[\d,]*x\b",                                           // multipliers
        r"\b\d[\d,]*\s*(?:GB|MB|TB)",                               // data sizes
        r"\b\d[\d,]*\s*(?:requests?|transactions?|operations?)",    // volume
        r"(?i)\b(?:improved|increased|reduced|decreased)\s+(?:by\s+)?\d+",
        r"\b\d[\d,]*\s*(?:lines?|functions?|components?|features?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("metric pattern"))
    .collect()
});

/// Bullet markers recognized at the start of a line.
pub static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[•\-\*▪▫◦]|\d+[\.\)])\s+").expect("bullet pattern"));

// ============================================================
// CONTACT PATTERNS
// ============================================================

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email"));

pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-\s\(\)\.]{7,15}\d").expect("phone"));

pub static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/(?:in|pub)/[\w\-]+/?").expect("linkedin")
});

pub static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[\w\-]+/?").expect("github")
});

pub static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bhttps?://[\w\-]+(?:\.[\w\-]+)+(?:/[\w\-./]*)?").expect("url")
});

/// "City, ST" or "City, Country" style location line.
pub static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z .'\-]+,\s*[A-Z][A-Za-z .'\-]*$").expect("location")
});

// ============================================================
// DATE & EDUCATION PATTERNS
// ============================================================

/// "Jan 2020 - Mar 2022", "2019 – Present", "January 2021 — current".
pub static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\s+)?((?:19|20)\d{2})\s*[-–—]\s*(?:(Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\s+)?((?:19|20)\d{2}|present|current|now)",
    )
    .expect("date range")
});

pub static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year"));

pub static GPA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bGPA\s*[:\-]?\s*(\d\.\d{1,2})").expect("gpa"));

/// Longest phrases first so "magna cum laude" wins over "cum laude".
pub const HONORS_KEYWORDS: &[&str] =
    &["summa cum laude", "magna cum laude", "cum laude", "distinction", "first class", "honors"];

/// Degree phrase patterns with their ontology rank. Longer phrases first so
/// "master of science" wins over "ms".
pub const DEGREE_PATTERNS: &[(&str, DegreeRank)] = &[
    ("doctor of philosophy", DegreeRank::Doctorate),
    ("ph.d", DegreeRank::Doctorate),
    ("phd", DegreeRank::Doctorate),
    ("doctorate", DegreeRank::Doctorate),
    ("master of science", DegreeRank::Master),
    ("master of arts", DegreeRank::Master),
    ("master of business administration", DegreeRank::Master),
    ("m.tech", DegreeRank::Master),
    ("m.sc", DegreeRank::Master),
    ("msc", DegreeRank::Master),
    ("mba", DegreeRank::Master),
    ("mca", DegreeRank::Master),
    ("m.s.", DegreeRank::Master),
    ("master", DegreeRank::Master),
    ("bachelor of science", DegreeRank::Bachelor),
    ("bachelor of arts", DegreeRank::Bachelor),
    ("bachelor of engineering", DegreeRank::Bachelor),
    ("b.tech", DegreeRank::Bachelor),
    ("b.sc", DegreeRank::Bachelor),
    ("bsc", DegreeRank::Bachelor),
    ("b.e.", DegreeRank::Bachelor),
    ("b.s.", DegreeRank::Bachelor),
    ("bachelor", DegreeRank::Bachelor),
    ("associate degree", DegreeRank::Associate),
    ("associate of", DegreeRank::Associate),
    ("a.a.", DegreeRank::Associate),
    ("a.s.", DegreeRank::Associate),
];

// ============================================================
// SKILLS TAXONOMY
// ============================================================

/// One row of the canonical skill taxonomy: canonical name, category, and
/// alias spellings (all matched case/punctuation-insensitively).
pub struct SkillRow {
    pub canonical: &'static str,
    pub category: SkillCategory,
    pub aliases: &'static [&'static str],
}

macro_rules! skill {
    ($name:literal, $cat:expr) => {
        SkillRow { canonical: $name, category: $cat, aliases: &[] }
    };
    ($name:literal, $cat:expr, $($alias:literal),+) => {
        SkillRow { canonical: $name, category: $cat, aliases: &[$($alias),+] }
    };
}

pub static SKILL_TAXONOMY: &[SkillRow] = &[
    // programming languages
    skill!("Python", SkillCategory::ProgrammingLanguage),
    skill!("JavaScript", SkillCategory::ProgrammingLanguage, "js", "ecmascript"),
    skill!("TypeScript", SkillCategory::ProgrammingLanguage, "ts"),
    skill!("Java", SkillCategory::ProgrammingLanguage),
    skill!("C++", SkillCategory::ProgrammingLanguage, "cpp"),
    skill!("C#", SkillCategory::ProgrammingLanguage, "csharp"),
    skill!("Go", SkillCategory::ProgrammingLanguage, "golang"),
    skill!("Rust", SkillCategory::ProgrammingLanguage),
    skill!("Swift", SkillCategory::ProgrammingLanguage),
    skill!("Kotlin", SkillCategory::ProgrammingLanguage),
    skill!("PHP", SkillCategory::ProgrammingLanguage),
    skill!("Ruby", SkillCategory::ProgrammingLanguage),
    skill!("Scala", SkillCategory::ProgrammingLanguage),
    skill!("R", SkillCategory::ProgrammingLanguage),
    skill!("SQL", SkillCategory::ProgrammingLanguage),
    skill!("Shell", SkillCategory::ProgrammingLanguage, "bash", "shell scripting"),
    // frameworks
    skill!("React", SkillCategory::Framework, "react.js", "reactjs"),
    skill!("Vue.js", SkillCategory::Framework, "vue", "vuejs"),
    skill!("Angular", SkillCategory::Framework, "angularjs"),
    skill!("Node.js", SkillCategory::Framework, "node", "nodejs"),
    skill!("Express.js", SkillCategory::Framework, "express"),
    skill!("Django", SkillCategory::Framework),
    skill!("Flask", SkillCategory::Framework),
    skill!("FastAPI", SkillCategory::Framework),
    skill!("Spring Boot", SkillCategory::Framework, "spring"),
    skill!("Ruby on Rails", SkillCategory::Framework, "rails"),
    skill!("Next.js", SkillCategory::Framework, "nextjs"),
    skill!("Svelte", SkillCategory::Framework),
    skill!(".NET", SkillCategory::Framework, "asp.net", "dotnet"),
    skill!("TensorFlow", SkillCategory::Framework),
    skill!("PyTorch", SkillCategory::Framework),
    skill!("Pandas", SkillCategory::Framework),
    skill!("NumPy", SkillCategory::Framework),
    // tools & platforms
    skill!("Docker", SkillCategory::Tool),
    skill!("Kubernetes", SkillCategory::Tool, "k8s"),
    skill!("Git", SkillCategory::Tool),
    skill!("GitHub", SkillCategory::Tool),
    skill!("GitLab", SkillCategory::Tool),
    skill!("Jenkins", SkillCategory::Tool),
    skill!("Terraform", SkillCategory::Tool),
    skill!("Ansible", SkillCategory::Tool),
    skill!("AWS", SkillCategory::Tool, "amazon web services"),
    skill!("Azure", SkillCategory::Tool, "microsoft azure"),
    skill!("Google Cloud", SkillCategory::Tool, "gcp"),
    skill!("Linux", SkillCategory::Tool),
    skill!("PostgreSQL", SkillCategory::Tool, "postgres"),
    skill!("MySQL", SkillCategory::Tool),
    skill!("MongoDB", SkillCategory::Tool, "mongo"),
    skill!("Redis", SkillCategory::Tool),
    skill!("Elasticsearch", SkillCategory::Tool),
    skill!("Kafka", SkillCategory::Tool, "apache kafka"),
    skill!("GraphQL", SkillCategory::Tool),
    skill!("REST API", SkillCategory::Tool, "rest", "restful"),
    skill!("CI/CD", SkillCategory::Tool, "cicd", "continuous integration"),
    skill!("Nginx", SkillCategory::Tool),
    skill!("Figma", SkillCategory::Tool),
    // soft skills
    skill!("Leadership", SkillCategory::SoftSkill),
    skill!("Communication", SkillCategory::SoftSkill),
    skill!("Teamwork", SkillCategory::SoftSkill, "team work", "team player"),
    skill!("Problem Solving", SkillCategory::SoftSkill, "problem-solving"),
    skill!("Project Management", SkillCategory::SoftSkill),
    skill!("Agile", SkillCategory::SoftSkill),
    skill!("Scrum", SkillCategory::SoftSkill),
    skill!("Time Management", SkillCategory::SoftSkill),
    skill!("Critical Thinking", SkillCategory::SoftSkill),
    skill!("Mentoring", SkillCategory::SoftSkill, "mentorship"),
];

// ============================================================
// ROLE INFERENCE KEYWORDS
// ============================================================

pub const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Backend Engineer",
        &["backend", "api", "database", "server", "microservices", "rest", "graphql", "django", "flask", "spring"],
    ),
    (
        "Frontend Engineer",
        &["frontend", "react", "vue", "angular", "javascript", "typescript", "css", "html", "ui", "ux"],
    ),
    (
        "Full Stack Engineer",
        &["fullstack", "full-stack", "full stack", "mern", "mean", "end-to-end"],
    ),
    (
        "Mobile Developer",
        &["android", "ios", "flutter", "react native", "swift", "kotlin", "mobile"],
    ),
    (
        "Data Scientist",
        &["data science", "machine learning", "statistics", "pandas", "numpy", "tensorflow", "pytorch", "modeling"],
    ),
    (
        "DevOps Engineer",
        &["devops", "kubernetes", "docker", "aws", "azure", "gcp", "jenkins", "ci/cd", "terraform"],
    ),
    (
        "QA Engineer",
        &["testing", "automation", "selenium", "cypress", "qa", "quality assurance"],
    ),
    (
        "Data Engineer",
        &["data engineering", "etl", "spark", "hadoop", "kafka", "data pipeline", "big data"],
    ),
];

// ============================================================
// CERTIFICATION PROVIDERS & ATS SYMBOLS
// ============================================================

pub const CERTIFICATION_PROVIDERS: &[&str] = &[
    "AWS", "Microsoft", "Google", "Oracle", "Cisco", "IBM", "Salesforce", "Adobe",
    "Coursera", "Udemy", "edX", "Pluralsight", "LinkedIn Learning", "Udacity",
    "CompTIA", "PMI", "Scrum.org", "HashiCorp",
];

/// Decorative symbols that commonly break ATS parsers.
pub const PROBLEMATIC_SYMBOLS: &[char] = &[
    '★', '☆', '●', '◆', '▲', '▼', '♦', '♠', '♥', '♣', '✓', '✗', '→', '←', '↑', '↓',
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_tables_cover_all_primary_kinds() {
        let kinds: Vec<SectionKind> = SECTION_HEADINGS.iter().map(|(k, _)| *k).collect();
        assert!(kinds.contains(&SectionKind::Experience));
        assert!(kinds.contains(&SectionKind::Education));
        assert!(kinds.contains(&SectionKind::Skills));
        assert!(kinds.contains(&SectionKind::Contact));
    }

    #[test]
    fn test_metric_patterns_match_common_metrics() {
        let hits = |s: &str| METRIC_PATTERNS.iter().any(|re| re.is_match(s));
        assert!(hits("reduced latency by 40%"));
        assert!(hits("saved $1.2M annually"));
        assert!(hits("served 50,000 users"));
        assert!(hits("cut build time to 90 seconds"));
        assert!(!hits("worked on the payments team"));
    }

    #[test]
    fn test_date_range_regex() {
        assert!(DATE_RANGE_RE.is_match("Jan 2020 - Mar 2022"));
        assert!(DATE_RANGE_RE.is_match("2019 – Present"));
        assert!(DATE_RANGE_RE.is_match("September 2021 — current"));
        assert!(!DATE_RANGE_RE.is_match("since a while ago"));
    }

    #[test]
    fn test_taxonomy_has_no_duplicate_canonicals() {
        let mut seen = std::collections::HashSet::new();
        for row in SKILL_TAXONOMY {
            assert!(seen.insert(row.canonical.to_lowercase()), "dup: {}", row.canonical);
        }
    }
}
