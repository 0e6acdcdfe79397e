//! Certification scoring engine.
//!
//! Pipeline:
//! 1. validate + normalize answers against the question bank
//! 2. weighted per-domain scores (0–100)
//! 3. coherence check over antagonist pairs
//! 4. optional blend with RIASEC / cognitive profile
//! 5. nearest-role matching on the blended domain vector
//! 6. level from average × completion, lowered one step when incoherent

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::certification::answers::{Answer, AnswerValue, ScoringError};
use crate::certification::blend::{blend_domain_score, ProfileInputs};
use crate::certification::questions::{
    antagonist_pairs, find_question, question_bank, total_questions, Domain,
};
use crate::certification::roles::{best_roles, RoleMatch};

/// Minimum share of antagonist pairs answered consistently.
pub const COHERENCE_THRESHOLD: f64 = 0.6;
/// `|a + b − 6|` at or above this marks a pair as contradictory.
pub const INCONSISTENCY_DEVIATION: u8 = 3;
/// Likert sum expected from a perfectly coherent antagonist pair.
const COHERENT_PAIR_SUM: i16 = 6;
pub const MIN_CERTIFIABLE_COMPLETION: f64 = 0.8;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debutant,
    Junior,
    Intermediaire,
    Confirme,
    Expert,
}

impl Level {
    pub fn from_effective_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => Level::Expert,
            s if s >= 65.0 => Level::Confirme,
            s if s >= 45.0 => Level::Intermediaire,
            s if s >= 25.0 => Level::Junior,
            _ => Level::Debutant,
        }
    }

    pub fn downgraded(self) -> Self {
        match self {
            Level::Expert => Level::Confirme,
            Level::Confirme => Level::Intermediaire,
            Level::Intermediaire => Level::Junior,
            Level::Junior | Level::Debutant => Level::Debutant,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debutant => "debutant",
            Level::Junior => "junior",
            Level::Intermediaire => "intermediaire",
            Level::Confirme => "confirme",
            Level::Expert => "expert",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Debutant => "Débutant",
            Level::Junior => "Junior",
            Level::Intermediaire => "Intermédiaire",
            Level::Confirme => "Confirmé",
            Level::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub domain: Domain,
    /// Quiz-only score.
    pub raw_score: f64,
    /// Score after profile blending; equals `raw_score` without a profile.
    pub score: f64,
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inconsistency {
    pub question_a: u8,
    pub question_b: u8,
    pub answer_a: u8,
    pub answer_b: u8,
    pub deviation: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceReport {
    pub score: f64,
    pub pairs_checked: usize,
    pub inconsistencies: Vec<Inconsistency>,
    pub coherent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationResult {
    /// One entry per domain, in `Domain::ALL` order.
    pub domain_scores: Vec<DomainScore>,
    pub coherence: CoherenceReport,
    pub primary_role: RoleMatch,
    pub secondary_role: Option<RoleMatch>,
    pub average_score: f64,
    pub completion_rate: f64,
    pub effective_score: f64,
    pub level: Level,
    pub certifiable: bool,
    pub profile_blended: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Normalized answers keyed by question id, plus raw Likert values for the coherence check.
#[derive(Debug, Default)]
pub struct NormalizedAnswers {
    pub scores: BTreeMap<u8, f64>,
    pub likert: HashMap<u8, u8>,
}

/// Checks every answer against the bank and converts it to a [0, 1] score.
/// Blank open answers are dropped.
pub fn normalize_answers(answers: &[Answer]) -> Result<NormalizedAnswers, ScoringError> {
    let mut normalized = NormalizedAnswers::default();
    let mut seen = std::collections::HashSet::new();

    for answer in answers {
        let question = find_question(answer.question_id)
            .ok_or(ScoringError::UnknownQuestion(answer.question_id))?;
        if !seen.insert(answer.question_id) {
            return Err(ScoringError::DuplicateAnswer(answer.question_id));
        }
        if let Some(score) = question.normalize(&answer.value)? {
            normalized.scores.insert(question.id, score);
            if let AnswerValue::Likert(v) = answer.value {
                normalized.likert.insert(question.id, v);
            }
        }
    }

    Ok(normalized)
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring steps
// ────────────────────────────────────────────────────────────────────────────

/// Weighted mean per domain over answered questions, scaled to 0–100.
pub fn compute_domain_scores(answers: &NormalizedAnswers) -> Vec<DomainScore> {
    Domain::ALL
        .iter()
        .map(|&domain| {
            let mut weighted = 0.0;
            let mut weights = 0.0;
            let mut answered = 0;
            let mut total = 0;

            for q in question_bank().iter().filter(|q| q.domain == domain) {
                total += 1;
                if let Some(score) = answers.scores.get(&q.id) {
                    weighted += q.weight.factor() * score;
                    weights += q.weight.factor();
                    answered += 1;
                }
            }

            let raw_score = if weights > 0.0 {
                weighted / weights * 100.0
            } else {
                0.0
            };

            DomainScore {
                domain,
                raw_score,
                score: raw_score,
                answered,
                total,
            }
        })
        .collect()
}

/// Flags antagonist pairs answered in the same direction.
pub fn check_coherence(likert: &HashMap<u8, u8>) -> CoherenceReport {
    let mut pairs_checked = 0;
    let mut inconsistencies = Vec::new();

    for (a, b) in antagonist_pairs() {
        let (Some(&answer_a), Some(&answer_b)) = (likert.get(&a), likert.get(&b)) else {
            continue;
        };
        pairs_checked += 1;
        let deviation =
            (i16::from(answer_a) + i16::from(answer_b) - COHERENT_PAIR_SUM).unsigned_abs() as u8;
        if deviation >= INCONSISTENCY_DEVIATION {
            inconsistencies.push(Inconsistency {
                question_a: a,
                question_b: b,
                answer_a,
                answer_b,
                deviation,
            });
        }
    }

    let score = if pairs_checked == 0 {
        1.0
    } else {
        1.0 - inconsistencies.len() as f64 / pairs_checked as f64
    };

    CoherenceReport {
        score,
        pairs_checked,
        inconsistencies,
        coherent: score >= COHERENCE_THRESHOLD,
    }
}

/// Seniority from the effective score, gated by coherence.
pub fn determine_level(effective_score: f64, coherent: bool) -> Level {
    let level = Level::from_effective_score(effective_score);
    if coherent {
        level
    } else {
        level.downgraded()
    }
}

pub fn is_certifiable(level: Level, completion_rate: f64, coherent: bool) -> bool {
    coherent && completion_rate >= MIN_CERTIFIABLE_COMPLETION && level >= Level::Junior
}

/// Runs the full scoring pipeline.
pub fn score_certification(
    answers: &[Answer],
    profile: &ProfileInputs,
) -> Result<CertificationResult, ScoringError> {
    let normalized = normalize_answers(answers)?;

    let mut domain_scores = compute_domain_scores(&normalized);
    for ds in domain_scores.iter_mut().filter(|ds| ds.answered > 0) {
        ds.score = blend_domain_score(ds.domain, ds.raw_score, profile);
    }

    let coherence = check_coherence(&normalized.likert);

    let mut vector = [0.0; 5];
    for ds in &domain_scores {
        vector[ds.domain.index()] = ds.score / 100.0;
    }
    let (primary_role, secondary_role) = best_roles(&vector);

    let average_score =
        domain_scores.iter().map(|d| d.score).sum::<f64>() / domain_scores.len() as f64;
    let completion_rate = normalized.scores.len() as f64 / total_questions() as f64;
    let effective_score = average_score * completion_rate;
    let level = determine_level(effective_score, coherence.coherent);
    let certifiable = is_certifiable(level, completion_rate, coherence.coherent);

    Ok(CertificationResult {
        domain_scores,
        primary_role,
        secondary_role,
        average_score,
        completion_rate,
        effective_score,
        level,
        certifiable,
        profile_blended: !profile.is_empty(),
        coherence,
    })
}
