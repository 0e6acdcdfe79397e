//! ROME reference data (Répertoire Opérationnel des Métiers et des Emplois)
//! for the job families the certification covers, and result-to-job matching.

use serde::Serialize;

use crate::certification::questions::fold_accents;
use crate::certification::roles::RoleId;

const ROLE_WEIGHT: f64 = 0.7;
const RIASEC_WEIGHT: f64 = 0.3;
const SECONDARY_ROLE_AFFINITY: f64 = 0.6;
pub const MAX_JOB_MATCHES: usize = 5;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RomeEntry {
    pub code: &'static str,
    pub title: &'static str,
    pub family: &'static str,
    pub roles: &'static [RoleId],
    /// Holland letters typical of the job, strongest first.
    pub riasec: &'static str,
}

const SUPPORT: &str = "M - Support à l'entreprise";
const MEDIA: &str = "E - Communication, média et multimédia";

pub static ROME_CATALOGUE: [RomeEntry; 9] = [
    RomeEntry {
        code: "M1801",
        title: "Administration de systèmes d'information",
        family: SUPPORT,
        roles: &[RoleId::Sysadmin, RoleId::Devops],
        riasec: "RCI",
    },
    RomeEntry {
        code: "M1802",
        title: "Expertise et support en systèmes d'information",
        family: SUPPORT,
        roles: &[RoleId::CyberAnalyst, RoleId::Pentester, RoleId::Sysadmin],
        riasec: "ICR",
    },
    RomeEntry {
        code: "M1803",
        title: "Direction des systèmes d'information",
        family: SUPPORT,
        roles: &[RoleId::ProjectLead],
        riasec: "ECS",
    },
    RomeEntry {
        code: "M1804",
        title: "Études et développement de réseaux de télécoms",
        family: SUPPORT,
        roles: &[RoleId::Sysadmin, RoleId::Devops],
        riasec: "RIC",
    },
    RomeEntry {
        code: "M1805",
        title: "Études et développement informatique",
        family: SUPPORT,
        roles: &[RoleId::Developer, RoleId::DataEngineer],
        riasec: "IRC",
    },
    RomeEntry {
        code: "M1806",
        title: "Conseil et maîtrise d'ouvrage en systèmes d'information",
        family: SUPPORT,
        roles: &[RoleId::ProjectLead, RoleId::DataAnalyst],
        riasec: "EIC",
    },
    RomeEntry {
        code: "M1810",
        title: "Production et exploitation de systèmes d'information",
        family: SUPPORT,
        roles: &[RoleId::Devops, RoleId::Sysadmin],
        riasec: "RCI",
    },
    RomeEntry {
        code: "M1403",
        title: "Études et prospectives socio-économiques",
        family: SUPPORT,
        roles: &[RoleId::DataAnalyst, RoleId::DataEngineer],
        riasec: "ICE",
    },
    RomeEntry {
        code: "E1205",
        title: "Réalisation de contenus multimédias",
        family: MEDIA,
        roles: &[RoleId::Developer],
        riasec: "AIR",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RomeMatch {
    pub code: String,
    pub title: String,
    pub family: String,
    /// 0–1.
    pub score: f64,
}

pub fn lookup(code: &str) -> Option<&'static RomeEntry> {
    let code = code.trim();
    ROME_CATALOGUE
        .iter()
        .find(|e| e.code.eq_ignore_ascii_case(code))
}

/// Case- and accent-insensitive search on code and title. An empty query lists everything.
pub fn search(query: &str) -> Vec<&'static RomeEntry> {
    let needle = fold_accents(&query.trim().to_lowercase());
    ROME_CATALOGUE
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.code.to_lowercase().contains(&needle)
                || fold_accents(&e.title.to_lowercase()).contains(&needle)
        })
        .collect()
}

fn role_affinity(entry: &RomeEntry, primary: RoleId, secondary: Option<RoleId>) -> f64 {
    if entry.roles.contains(&primary) {
        1.0
    } else if secondary.is_some_and(|s| entry.roles.contains(&s)) {
        SECONDARY_ROLE_AFFINITY
    } else {
        0.0
    }
}

/// Share of the job's Holland letters present in the candidate's code.
fn riasec_overlap(entry: &RomeEntry, holland_code: &str) -> f64 {
    if entry.riasec.is_empty() {
        return 0.0;
    }
    let hits = entry
        .riasec
        .chars()
        .filter(|c| holland_code.contains(*c))
        .count();
    hits as f64 / entry.riasec.chars().count() as f64
}

/// Ranks ROME entries for a scored candidate. Without a Holland code the
/// ranking relies on role affinity alone.
pub fn match_jobs(
    primary: RoleId,
    secondary: Option<RoleId>,
    holland_code: Option<&str>,
) -> Vec<RomeMatch> {
    let mut scored: Vec<(f64, &RomeEntry)> = ROME_CATALOGUE
        .iter()
        .map(|entry| {
            let roles = role_affinity(entry, primary, secondary);
            let score = match holland_code {
                Some(code) => ROLE_WEIGHT * roles + RIASEC_WEIGHT * riasec_overlap(entry, code),
                None => roles,
            };
            (score, entry)
        })
        .filter(|(score, _)| *score > 0.0)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_JOB_MATCHES)
        .map(|(score, entry)| RomeMatch {
            code: entry.code.to_string(),
            title: entry.title.to_string(),
            family: entry.family.to_string(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_well_formed() {
        let codes: HashSet<&str> = ROME_CATALOGUE.iter().map(|e| e.code).collect();
        assert_eq!(codes.len(), ROME_CATALOGUE.len());
        for entry in ROME_CATALOGUE.iter() {
            assert_eq!(entry.code.len(), 5);
            assert!(entry.code.chars().next().unwrap().is_ascii_uppercase());
            assert!(entry.code[1..].chars().all(|c| c.is_ascii_digit()));
            assert!(!entry.roles.is_empty());
        }
    }

    #[test]
    fn test_every_role_has_a_job() {
        for role in crate::certification::roles::ROLE_CATALOGUE.iter() {
            assert!(
                ROME_CATALOGUE.iter().any(|e| e.roles.contains(&role.id)),
                "{:?} has no ROME entry",
                role.id
            );
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("m1805").unwrap().code, "M1805");
        assert_eq!(lookup(" M1801 ").unwrap().code, "M1801");
        assert!(lookup("Z9999").is_none());
    }

    #[test]
    fn test_search_ignores_accents() {
        let hits = search("etudes");
        let codes: Vec<&str> = hits.iter().map(|e| e.code).collect();
        assert!(codes.contains(&"M1805"));
        assert!(codes.contains(&"M1804"));
        assert!(codes.contains(&"M1403"));
        assert_eq!(search("").len(), ROME_CATALOGUE.len());
        assert!(search("boulangerie").is_empty());
    }

    #[test]
    fn test_match_jobs_primary_role_first() {
        let matches = match_jobs(RoleId::Developer, Some(RoleId::Devops), None);
        assert_eq!(matches[0].code, "M1805");
        assert_eq!(matches[0].score, 1.0);
        let secondary: Vec<_> = matches.iter().filter(|m| m.score == 0.6).collect();
        assert!(!secondary.is_empty());
        assert!(matches.len() <= MAX_JOB_MATCHES);
    }

    #[test]
    fn test_holland_code_reorders_jobs_outside_the_role() {
        // DevOps jobs score 0.7 + 0.3 × 1/3; E1205 ("AIR") shares two letters with "IAS"
        // and outranks the one-letter overlaps.
        let matches = match_jobs(RoleId::Devops, None, Some("IAS"));
        assert_eq!(matches.len(), MAX_JOB_MATCHES);
        assert!(matches[..3].iter().all(|m| (m.score - 0.8).abs() < 1e-9));
        assert_eq!(matches[3].code, "E1205");
        assert!((matches[3].score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_holland_code_surfaces_unrelated_jobs_with_low_score() {
        let matches = match_jobs(RoleId::ProjectLead, None, Some("ASE"));
        assert_eq!(matches[0].code, "M1803");
        assert!(matches.iter().any(|m| m.code == "E1205" && m.score < 0.3));
    }
}
