//! Skills-gap matching against a target role.
//!
//! Set comparison between the candidate's skills and the required plus
//! preferred skill lists of a target, all under the shared normalization
//! rule so "Node.js" and "nodejs" compare equal.

use crate::analysis::types::{GapLevel, SkillSet, SkillsMatchReport};

/// Weight of required-skill coverage in the overall percentage.
pub const REQUIRED_WEIGHT: f64 = 0.70;
/// Weight of preferred-skill coverage in the overall percentage.
pub const PREFERRED_WEIGHT: f64 = 0.30;

pub struct SkillsMatcher;

impl SkillsMatcher {
    pub fn match_against(
        skills: &SkillSet,
        required: &[String],
        preferred: &[String],
    ) -> SkillsMatchReport {
        let required = Self::dedup(required);
        let preferred = Self::dedup(preferred);

        let matched_required: Vec<String> =
            required.iter().filter(|s| skills.contains(s)).cloned().collect();
        let matched_preferred: Vec<String> =
            preferred.iter().filter(|s| skills.contains(s)).cloned().collect();

        let missing_required: Vec<String> =
            required.iter().filter(|s| !skills.contains(s)).cloned().collect();
        let missing_preferred: Vec<String> =
            preferred.iter().filter(|s| !skills.contains(s)).cloned().collect();

        let in_target = |name: &str| {
            required.iter().chain(preferred.iter()).any(|t| {
                SkillSet::normalize(t) == SkillSet::normalize(name)
            })
        };
        let bonus: Vec<String> = skills.iter().filter(|s| !in_target(s)).cloned().collect();

        let mut matched = matched_required.clone();
        for skill in &matched_preferred {
            if !matched.iter().any(|m| SkillSet::normalize(m) == SkillSet::normalize(skill)) {
                matched.push(skill.clone());
            }
        }

        // An empty target list scores zero coverage rather than a vacuous
        // hundred, so callers cannot mistake "nothing asked" for "all met".
        let required_coverage = if required.is_empty() {
            0.0
        } else {
            matched_required.len() as f64 / required.len() as f64 * 100.0
        };
        let preferred_coverage = if preferred.is_empty() {
            0.0
        } else {
            matched_preferred.len() as f64 / preferred.len() as f64 * 100.0
        };

        let overall_coverage = match (required.is_empty(), preferred.is_empty()) {
            (true, true) => 0.0,
            (false, true) => required_coverage,
            (true, false) => preferred_coverage,
            (false, false) => {
                required_coverage * REQUIRED_WEIGHT + preferred_coverage * PREFERRED_WEIGHT
            }
        };

        SkillsMatchReport {
            matched,
            missing_required,
            missing_preferred,
            bonus,
            required_coverage,
            preferred_coverage,
            overall_coverage,
            gap_level: GapLevel::from_coverage(overall_coverage),
        }
    }

    /// Order-preserving dedup under the normalization rule.
    fn dedup(names: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            if name.trim().is_empty() {
                continue;
            }
            if !out.iter().any(|n| SkillSet::normalize(n) == SkillSet::normalize(name)) {
                out.push(name.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_set(names: &[&str]) -> SkillSet {
        let mut set = SkillSet::new();
        for name in names {
            set.insert(name);
        }
        set
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_partition() {
        let skills = skill_set(&["Python", "Django", "Docker", "Git"]);
        let report = SkillsMatcher::match_against(
            &skills,
            &strings(&["Python", "Kubernetes"]),
            &strings(&["Django", "Terraform"]),
        );
        assert_eq!(report.matched, vec!["Python", "Django"]);
        assert_eq!(report.missing_required, vec!["Kubernetes"]);
        assert_eq!(report.missing_preferred, vec!["Terraform"]);
        assert_eq!(report.bonus, vec!["Docker", "Git"]);
        assert_eq!(report.required_coverage, 50.0);
        assert_eq!(report.preferred_coverage, 50.0);
        assert!((report.overall_coverage - 50.0).abs() < 1e-9);
        assert_eq!(report.gap_level, GapLevel::Fair);
    }

    #[test]
    fn test_weighted_overall() {
        let skills = skill_set(&["Python", "SQL"]);
        let report = SkillsMatcher::match_against(
            &skills,
            &strings(&["Python", "SQL"]),
            &strings(&["Docker", "AWS"]),
        );
        // 100% required, 0% preferred.
        assert!((report.overall_coverage - 70.0).abs() < 1e-9);
        assert_eq!(report.gap_level, GapLevel::Good);
    }

    #[test]
    fn test_only_preferred_target() {
        let skills = skill_set(&["Docker"]);
        let report =
            SkillsMatcher::match_against(&skills, &[], &strings(&["Docker", "AWS"]));
        assert_eq!(report.required_coverage, 0.0);
        assert_eq!(report.preferred_coverage, 50.0);
        // A single-sided target uses that side's coverage directly.
        assert_eq!(report.overall_coverage, 50.0);
    }

    #[test]
    fn test_empty_targets_score_zero() {
        let skills = skill_set(&["Python"]);
        let report = SkillsMatcher::match_against(&skills, &[], &[]);
        assert_eq!(report.required_coverage, 0.0);
        assert_eq!(report.overall_coverage, 0.0);
        assert_eq!(report.gap_level, GapLevel::Poor);
        assert_eq!(report.bonus, vec!["Python"]);
    }

    #[test]
    fn test_large_required_gap_is_poor() {
        let skills = skill_set(&["Python", "Vue.js"]);
        let report = SkillsMatcher::match_against(
            &skills,
            &strings(&["Python", "React", "AWS"]),
            &[],
        );
        assert_eq!(report.matched, vec!["Python"]);
        assert_eq!(report.missing_required, vec!["React", "AWS"]);
        assert!((report.required_coverage - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.bonus, vec!["Vue.js"]);
        assert_eq!(report.gap_level, GapLevel::Poor);
    }

    #[test]
    fn test_normalized_comparison() {
        let skills = skill_set(&["Node.js"]);
        let report =
            SkillsMatcher::match_against(&skills, &strings(&["nodejs"]), &[]);
        assert_eq!(report.required_coverage, 100.0);
        assert!(report.missing_required.is_empty());
        assert_eq!(report.gap_level, GapLevel::Excellent);
    }

    #[test]
    fn test_duplicate_targets_counted_once() {
        let skills = skill_set(&["Python"]);
        let report = SkillsMatcher::match_against(
            &skills,
            &strings(&["Python", "python", "PYTHON"]),
            &[],
        );
        assert_eq!(report.required_coverage, 100.0);
        assert_eq!(report.matched.len(), 1);
    }
}
