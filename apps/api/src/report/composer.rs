//! Report composition: turns a scored certification (plus the optional
//! profile and job matches) into ordered, templated sections.
//!
//! Composition is pure and deterministic. A `ReportWriter` may later replace
//! section bodies with LLM prose; headings and highlights stay as composed here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::certification::scoring::{CertificationResult, DomainScore};
use crate::profile::riasec::{ProfileResult, RiasecDimension};
use crate::rome::catalog::RomeMatch;

/// Number of weakest answered domains listed in the development plan.
const DEVELOPMENT_DOMAINS: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    DomainScores,
    Coherence,
    Profile,
    CareerPaths,
    DevelopmentPlan,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::DomainScores => "domain_scores",
            SectionKind::Coherence => "coherence",
            SectionKind::Profile => "profile",
            SectionKind::CareerPaths => "career_paths",
            SectionKind::DevelopmentPlan => "development_plan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub heading: String,
    pub body: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub title: String,
    pub user_id: Uuid,
    pub result_id: Uuid,
    pub level: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ReportSection>,
    /// "template" | "llm"
    pub writer_backend: String,
    /// True only when at least one section body came from the LLM.
    pub ai_generated: bool,
}

impl AssessmentReport {
    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Everything a report is built from.
pub struct ReportInput<'a> {
    pub user_id: Uuid,
    pub result_id: Uuid,
    pub result: &'a CertificationResult,
    pub profile: Option<&'a ProfileResult>,
    pub jobs: &'a [RomeMatch],
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

pub fn compose_report(input: ReportInput<'_>, generated_at: DateTime<Utc>) -> AssessmentReport {
    let result = input.result;

    let mut sections = vec![
        summary_section(result),
        domain_scores_section(result),
        coherence_section(result),
    ];
    if let Some(profile) = input.profile {
        sections.push(profile_section(profile));
    }
    sections.push(career_paths_section(result, input.jobs));
    sections.push(development_plan_section(result));

    AssessmentReport {
        title: format!("Bilan PERSPECTA : niveau {}", result.level.label()),
        user_id: input.user_id,
        result_id: input.result_id,
        level: result.level.as_str().to_string(),
        generated_at,
        sections,
        writer_backend: "template".to_string(),
        ai_generated: false,
    }
}

fn summary_section(result: &CertificationResult) -> ReportSection {
    let mut body = format!(
        "Niveau {} avec un score effectif de {:.0}/100 ({:.0} % du test complété). \
         Profil le plus proche : {} ({} %).",
        result.level.label(),
        result.effective_score,
        result.completion_rate * 100.0,
        result.primary_role.label,
        result.primary_role.match_percent,
    );
    if let Some(secondary) = &result.secondary_role {
        body.push_str(&format!(
            " Profil secondaire : {} ({} %).",
            secondary.label, secondary.match_percent
        ));
    }

    let certification = if result.certifiable {
        "Certifiable".to_string()
    } else {
        "Non certifiable en l'état".to_string()
    };

    ReportSection {
        kind: SectionKind::Summary,
        heading: "Synthèse".to_string(),
        body,
        highlights: vec![
            format!("Niveau : {}", result.level.label()),
            format!("Rôle principal : {}", result.primary_role.label),
            certification,
        ],
    }
}

fn domain_scores_section(result: &CertificationResult) -> ReportSection {
    let lines: Vec<String> = result
        .domain_scores
        .iter()
        .map(|d| {
            if d.answered == 0 {
                format!("{} : non évalué", d.domain.label())
            } else {
                format!(
                    "{} : {:.0}/100 ({}/{} questions)",
                    d.domain.label(),
                    d.score,
                    d.answered,
                    d.total
                )
            }
        })
        .collect();

    let strongest = answered(result)
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score));

    let body = match strongest {
        Some(d) => format!(
            "Votre domaine le plus solide est {} avec {:.0}/100.{}",
            d.domain.label(),
            d.score,
            if result.profile_blended {
                " Les scores intègrent votre profil d'intérêts."
            } else {
                ""
            }
        ),
        None => "Aucun domaine n'a été évalué.".to_string(),
    };

    ReportSection {
        kind: SectionKind::DomainScores,
        heading: "Scores par domaine".to_string(),
        body,
        highlights: lines,
    }
}

fn coherence_section(result: &CertificationResult) -> ReportSection {
    let coherence = &result.coherence;
    let body = if coherence.pairs_checked == 0 {
        "Aucune paire de contrôle n'a été renseignée ; la cohérence n'a pas pu être vérifiée."
            .to_string()
    } else if coherence.coherent {
        format!(
            "Vos réponses sont cohérentes ({:.0} %).",
            coherence.score * 100.0
        )
    } else {
        format!(
            "Vos réponses présentent des contradictions ({:.0} %) : \
             le niveau a été abaissé d'un cran.",
            coherence.score * 100.0
        )
    };

    let highlights = coherence
        .inconsistencies
        .iter()
        .map(|i| {
            format!(
                "Questions {} et {} : réponses {} et {}",
                i.question_a, i.question_b, i.answer_a, i.answer_b
            )
        })
        .collect();

    ReportSection {
        kind: SectionKind::Coherence,
        heading: "Cohérence des réponses".to_string(),
        body,
        highlights,
    }
}

fn profile_section(profile: &ProfileResult) -> ReportSection {
    let mut sentences = Vec::new();
    let mut highlights = Vec::new();

    if let Some(code) = profile.interest_code() {
        let letters: Vec<&str> = code
            .chars()
            .filter_map(|c| RiasecDimension::ALL.into_iter().find(|d| d.letter() == c))
            .map(|d| d.label())
            .collect();
        sentences.push(format!("Code Holland {code} ({}).", letters.join(", ")));
        highlights = RiasecDimension::ALL
            .iter()
            .map(|d| format!("{} : {:.0}/100", d.label(), profile.riasec.get(*d)))
            .collect();
    }
    if profile.has_cognitive() {
        sentences.push(format!(
            "Style cognitif dominant : {}.",
            profile.dominant_style.label()
        ));
    }

    ReportSection {
        kind: SectionKind::Profile,
        heading: "Profil d'intérêts".to_string(),
        body: sentences.join(" "),
        highlights,
    }
}

fn career_paths_section(result: &CertificationResult, jobs: &[RomeMatch]) -> ReportSection {
    let body = if jobs.is_empty() {
        format!(
            "Aucune fiche ROME ne correspond directement au profil {}.",
            result.primary_role.label
        )
    } else {
        format!(
            "{} métiers du ROME correspondent à votre profil, à commencer par « {} ».",
            jobs.len(),
            jobs[0].title
        )
    };

    ReportSection {
        kind: SectionKind::CareerPaths,
        heading: "Pistes métiers".to_string(),
        body,
        highlights: jobs
            .iter()
            .map(|j| format!("{} {} ({:.0} %)", j.code, j.title, j.score * 100.0))
            .collect(),
    }
}

fn development_plan_section(result: &CertificationResult) -> ReportSection {
    let mut weakest = answered(result);
    weakest.sort_by(|a, b| a.score.total_cmp(&b.score));
    weakest.truncate(DEVELOPMENT_DOMAINS);

    let body = if weakest.is_empty() {
        "Complétez le test pour obtenir un plan de progression.".to_string()
    } else {
        let names: Vec<&str> = weakest.iter().map(|d| d.domain.label()).collect();
        format!("Axes de progression prioritaires : {}.", names.join(" et "))
    };

    ReportSection {
        kind: SectionKind::DevelopmentPlan,
        heading: "Plan de progression".to_string(),
        body,
        highlights: weakest
            .iter()
            .map(|d| format!("{} : {:.0}/100", d.domain.label(), d.score))
            .collect(),
    }
}

fn answered(result: &CertificationResult) -> Vec<&DomainScore> {
    result
        .domain_scores
        .iter()
        .filter(|d| d.answered > 0)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Markdown rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the report as the Markdown snapshot stored in S3.
pub fn render_report_to_md(report: &AssessmentReport) -> String {
    let mut md = format!("# {}\n\n", report.title);
    md.push_str(&format!("- **Résultat :** {}\n", report.result_id));
    md.push_str(&format!(
        "- **Généré le :** {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    md.push_str(&format!("- **Rédaction :** {}\n\n", report.writer_backend));

    for section in &report.sections {
        md.push_str(&format!("## {}\n\n", section.heading));
        md.push_str(section.body.trim());
        md.push_str("\n\n");
        for highlight in &section.highlights {
            md.push_str(&format!("- {highlight}\n"));
        }
        if !section.highlights.is_empty() {
            md.push('\n');
        }
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certification::answers::{Answer, AnswerValue};
    use crate::certification::blend::ProfileInputs;
    use crate::certification::questions::{question_bank, Domain, QuestionKind};
    use crate::certification::scoring::score_certification;
    use crate::profile::riasec::{CognitiveDimension, CognitiveScores, RiasecScores};
    use crate::rome::catalog::match_jobs;

    /// Answers every question in `domains` with its best possible value.
    fn strong_answers(domains: &[Domain]) -> Vec<Answer> {
        question_bank()
            .iter()
            .filter(|q| domains.contains(&q.domain))
            .map(|q| {
                let value = match &q.kind {
                    QuestionKind::Likert { reversed: false } => AnswerValue::Likert(5),
                    QuestionKind::Likert { reversed: true } => AnswerValue::Likert(1),
                    QuestionKind::Scenario { options } => {
                        let best = options
                            .iter()
                            .enumerate()
                            .max_by_key(|(_, o)| o.points)
                            .map(|(i, _)| i)
                            .unwrap();
                        AnswerValue::Choice(best)
                    }
                    QuestionKind::Open { keywords } => AnswerValue::Text(keywords.join(" ")),
                };
                Answer {
                    question_id: q.id,
                    value,
                }
            })
            .collect()
    }

    fn sample_profile() -> ProfileResult {
        ProfileResult {
            riasec: RiasecScores {
                realistic: 40.0,
                investigative: 90.0,
                artistic: 20.0,
                social: 30.0,
                enterprising: 50.0,
                conventional: 70.0,
            },
            cognitive: CognitiveScores {
                analytical: 80.0,
                creative: 40.0,
                practical: 60.0,
                relational: 30.0,
            },
            holland_code: "ICE".to_string(),
            differentiation: 70.0,
            dominant_style: CognitiveDimension::Analytical,
            answered: 26,
            total: 26,
            riasec_answered: 18,
            cognitive_answered: 8,
        }
    }

    fn compose(result: &CertificationResult, profile: Option<&ProfileResult>) -> AssessmentReport {
        let jobs = match_jobs(
            result.primary_role.role,
            result.secondary_role.as_ref().map(|r| r.role),
            profile.and_then(|p| p.interest_code()),
        );
        compose_report(
            ReportInput {
                user_id: Uuid::nil(),
                result_id: Uuid::nil(),
                result,
                profile,
                jobs: &jobs,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_sections_are_ordered_and_profile_is_optional() {
        let result =
            score_certification(&strong_answers(&Domain::ALL), &ProfileInputs::default()).unwrap();

        let without = compose(&result, None);
        let kinds: Vec<SectionKind> = without.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Summary,
                SectionKind::DomainScores,
                SectionKind::Coherence,
                SectionKind::CareerPaths,
                SectionKind::DevelopmentPlan,
            ]
        );
        assert_eq!(without.writer_backend, "template");
        assert!(!without.ai_generated);

        let profile = sample_profile();
        let with = compose(&result, Some(&profile));
        assert_eq!(with.sections[3].kind, SectionKind::Profile);
        assert!(with.sections[3].body.contains("ICE"));
    }

    #[test]
    fn test_profile_section_skips_unanswered_interests() {
        let result =
            score_certification(&strong_answers(&Domain::ALL), &ProfileInputs::default()).unwrap();
        let profile = ProfileResult {
            holland_code: String::new(),
            riasec_answered: 0,
            ..sample_profile()
        };
        let report = compose(&result, Some(&profile));
        let section = report.section(SectionKind::Profile).unwrap();

        assert!(!section.body.contains("Holland"));
        assert!(section.body.contains(CognitiveDimension::Analytical.label()));
        assert!(section.highlights.is_empty());
    }

    #[test]
    fn test_development_plan_lists_two_weakest_answered_domains() {
        // Only Dev and Data answered; the three unanswered domains must not appear.
        let result = score_certification(
            &strong_answers(&[Domain::Dev, Domain::Data]),
            &ProfileInputs::default(),
        )
        .unwrap();
        let report = compose(&result, None);
        let plan = report.section(SectionKind::DevelopmentPlan).unwrap();

        assert_eq!(plan.highlights.len(), 2);
        assert!(plan.highlights.iter().all(|h| {
            h.starts_with(Domain::Dev.label()) || h.starts_with(Domain::Data.label())
        }));
    }

    #[test]
    fn test_development_plan_without_answers() {
        let result = score_certification(
            &[Answer {
                question_id: 30,
                value: AnswerValue::Likert(3),
            }],
            &ProfileInputs::default(),
        )
        .unwrap();
        let report = compose(&result, None);
        let plan = report.section(SectionKind::DevelopmentPlan).unwrap();
        assert_eq!(plan.highlights.len(), 1);
        assert!(plan.highlights[0].starts_with(Domain::Cross.label()));
    }

    #[test]
    fn test_unanswered_domains_are_marked_in_scores() {
        let result =
            score_certification(&strong_answers(&[Domain::Cyber]), &ProfileInputs::default())
                .unwrap();
        let report = compose(&result, None);
        let scores = report.section(SectionKind::DomainScores).unwrap();
        assert_eq!(scores.highlights.len(), Domain::ALL.len());
        assert!(scores
            .highlights
            .iter()
            .any(|h| h == &format!("{} : non évalué", Domain::Dev.label())));
    }

    #[test]
    fn test_render_markdown_contains_every_heading() {
        let result =
            score_certification(&strong_answers(&Domain::ALL), &ProfileInputs::default()).unwrap();
        let report = compose(&result, None);
        let md = render_report_to_md(&report);

        assert!(md.starts_with(&format!("# {}", report.title)));
        for section in &report.sections {
            assert!(md.contains(&format!("## {}", section.heading)));
        }
    }
}
