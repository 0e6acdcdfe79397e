//! RIASEC + cognitive profiling quiz.
//!
//! 18 interest items (three per Holland letter) and 8 thinking-style items
//! (two per cognitive dimension), all answered on a 1–5 scale.
//! Scores are 0–100 per dimension; unanswered dimensions score 0.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::certification::answers::{normalize_likert, Answer, AnswerValue, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiasecDimension {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl RiasecDimension {
    /// Holland order, also the tie-break order.
    pub const ALL: [RiasecDimension; 6] = [
        RiasecDimension::Realistic,
        RiasecDimension::Investigative,
        RiasecDimension::Artistic,
        RiasecDimension::Social,
        RiasecDimension::Enterprising,
        RiasecDimension::Conventional,
    ];

    pub fn letter(self) -> char {
        match self {
            RiasecDimension::Realistic => 'R',
            RiasecDimension::Investigative => 'I',
            RiasecDimension::Artistic => 'A',
            RiasecDimension::Social => 'S',
            RiasecDimension::Enterprising => 'E',
            RiasecDimension::Conventional => 'C',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiasecDimension::Realistic => "Réaliste",
            RiasecDimension::Investigative => "Investigateur",
            RiasecDimension::Artistic => "Artistique",
            RiasecDimension::Social => "Social",
            RiasecDimension::Enterprising => "Entreprenant",
            RiasecDimension::Conventional => "Conventionnel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveDimension {
    Analytical,
    Creative,
    Practical,
    Relational,
}

impl CognitiveDimension {
    pub const ALL: [CognitiveDimension; 4] = [
        CognitiveDimension::Analytical,
        CognitiveDimension::Creative,
        CognitiveDimension::Practical,
        CognitiveDimension::Relational,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CognitiveDimension::Analytical => "Analytique",
            CognitiveDimension::Creative => "Créatif",
            CognitiveDimension::Practical => "Pragmatique",
            CognitiveDimension::Relational => "Relationnel",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiasecScores {
    pub realistic: f64,
    pub investigative: f64,
    pub artistic: f64,
    pub social: f64,
    pub enterprising: f64,
    pub conventional: f64,
}

impl RiasecScores {
    pub fn get(&self, dim: RiasecDimension) -> f64 {
        match dim {
            RiasecDimension::Realistic => self.realistic,
            RiasecDimension::Investigative => self.investigative,
            RiasecDimension::Artistic => self.artistic,
            RiasecDimension::Social => self.social,
            RiasecDimension::Enterprising => self.enterprising,
            RiasecDimension::Conventional => self.conventional,
        }
    }

    fn set(&mut self, dim: RiasecDimension, value: f64) {
        match dim {
            RiasecDimension::Realistic => self.realistic = value,
            RiasecDimension::Investigative => self.investigative = value,
            RiasecDimension::Artistic => self.artistic = value,
            RiasecDimension::Social => self.social = value,
            RiasecDimension::Enterprising => self.enterprising = value,
            RiasecDimension::Conventional => self.conventional = value,
        }
    }

    /// Top three letters by score; ties keep R-I-A-S-E-C order.
    pub fn holland_code(&self) -> String {
        let mut dims = RiasecDimension::ALL.to_vec();
        // stable sort keeps Holland order among equal scores
        dims.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        dims.iter().take(3).map(|d| d.letter()).collect()
    }

    /// Spread between strongest and weakest interest.
    pub fn differentiation(&self) -> f64 {
        let values = RiasecDimension::ALL.map(|d| self.get(d));
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        max - min
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CognitiveScores {
    pub analytical: f64,
    pub creative: f64,
    pub practical: f64,
    pub relational: f64,
}

impl CognitiveScores {
    pub fn get(&self, dim: CognitiveDimension) -> f64 {
        match dim {
            CognitiveDimension::Analytical => self.analytical,
            CognitiveDimension::Creative => self.creative,
            CognitiveDimension::Practical => self.practical,
            CognitiveDimension::Relational => self.relational,
        }
    }

    fn set(&mut self, dim: CognitiveDimension, value: f64) {
        match dim {
            CognitiveDimension::Analytical => self.analytical = value,
            CognitiveDimension::Creative => self.creative = value,
            CognitiveDimension::Practical => self.practical = value,
            CognitiveDimension::Relational => self.relational = value,
        }
    }

    pub fn dominant(&self) -> CognitiveDimension {
        let mut best = CognitiveDimension::ALL[0];
        for dim in CognitiveDimension::ALL.into_iter().skip(1) {
            if self.get(dim) > self.get(best) {
                best = dim;
            }
        }
        best
    }
}

/// Scored profiling quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResult {
    pub riasec: RiasecScores,
    pub cognitive: CognitiveScores,
    /// Empty when no interest item was answered.
    pub holland_code: String,
    pub differentiation: f64,
    pub dominant_style: CognitiveDimension,
    pub answered: usize,
    pub total: usize,
    #[serde(default)]
    pub riasec_answered: usize,
    #[serde(default)]
    pub cognitive_answered: usize,
}

impl ProfileResult {
    pub fn has_riasec(&self) -> bool {
        self.riasec_answered > 0
    }

    pub fn has_cognitive(&self) -> bool {
        self.cognitive_answered > 0
    }

    /// Holland code for job matching; `None` when the interest axis is empty.
    pub fn interest_code(&self) -> Option<&str> {
        self.has_riasec().then_some(self.holland_code.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Question bank
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileAxis {
    Riasec(RiasecDimension),
    Cognitive(CognitiveDimension),
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileQuestion {
    pub id: u8,
    pub axis: ProfileAxis,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicProfileQuestion {
    pub id: u8,
    pub text: &'static str,
}

pub fn profile_questions() -> &'static [ProfileQuestion] {
    &PROFILE_QUESTIONS
}

pub fn public_profile_questions() -> Vec<PublicProfileQuestion> {
    PROFILE_QUESTIONS
        .iter()
        .map(|q| PublicProfileQuestion {
            id: q.id,
            text: q.text,
        })
        .collect()
}

use CognitiveDimension as Cog;
use RiasecDimension as Ri;

const fn riasec(id: u8, dim: RiasecDimension, text: &'static str) -> ProfileQuestion {
    ProfileQuestion {
        id,
        axis: ProfileAxis::Riasec(dim),
        text,
    }
}

const fn cognitive(id: u8, dim: CognitiveDimension, text: &'static str) -> ProfileQuestion {
    ProfileQuestion {
        id,
        axis: ProfileAxis::Cognitive(dim),
        text,
    }
}

#[rustfmt::skip]
static PROFILE_QUESTIONS: [ProfileQuestion; 26] = [
    riasec(1, Ri::Realistic, "J'aime manipuler du matériel, des outils ou des machines."),
    riasec(2, Ri::Realistic, "Je préfère les activités concrètes aux discussions abstraites."),
    riasec(3, Ri::Realistic, "Monter, réparer ou installer un équipement me plaît."),
    riasec(4, Ri::Investigative, "J'aime comprendre comment les choses fonctionnent en profondeur."),
    riasec(5, Ri::Investigative, "Résoudre une énigme ou un problème logique me motive."),
    riasec(6, Ri::Investigative, "Je lis volontiers des articles scientifiques ou techniques."),
    riasec(7, Ri::Artistic, "J'ai besoin de créer ou d'imaginer dans mon travail."),
    riasec(8, Ri::Artistic, "Je suis attentif·ve à l'esthétique de ce que je produis."),
    riasec(9, Ri::Artistic, "J'aime proposer des idées originales, hors des sentiers battus."),
    riasec(10, Ri::Social, "Aider les autres à progresser me donne de l'énergie."),
    riasec(11, Ri::Social, "J'aime former, accompagner ou conseiller des personnes."),
    riasec(12, Ri::Social, "Le travail en équipe est essentiel à ma motivation."),
    riasec(13, Ri::Enterprising, "J'aime convaincre et prendre des décisions."),
    riasec(14, Ri::Enterprising, "Diriger un projet ou une équipe m'attire."),
    riasec(15, Ri::Enterprising, "Je me fixe des objectifs ambitieux et mesurables."),
    riasec(16, Ri::Conventional, "J'aime que les choses soient organisées et documentées."),
    riasec(17, Ri::Conventional, "Suivre une procédure précise me rassure."),
    riasec(18, Ri::Conventional, "Je vérifie soigneusement les détails et les chiffres."),
    cognitive(19, Cog::Analytical, "Face à un problème, je commence par le décomposer en étapes."),
    cognitive(20, Cog::Analytical, "Je m'appuie sur des données avant de trancher."),
    cognitive(21, Cog::Creative, "Je trouve facilement plusieurs solutions à un même problème."),
    cognitive(22, Cog::Creative, "J'aime expérimenter des approches nouvelles."),
    cognitive(23, Cog::Practical, "Je préfère une solution simple qui fonctionne tout de suite."),
    cognitive(24, Cog::Practical, "J'apprends mieux en faisant qu'en lisant."),
    cognitive(25, Cog::Relational, "Je perçois rapidement l'humeur d'un groupe."),
    cognitive(26, Cog::Relational, "Je réfléchis mieux en discutant avec d'autres."),
];

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores the profiling quiz. Partial submissions are accepted.
pub fn score_profile(answers: &[Answer]) -> Result<ProfileResult, ScoringError> {
    let mut seen = HashSet::new();
    let mut sums: HashMap<ProfileAxis, (f64, usize)> = HashMap::new();
    let mut riasec_answered = 0;
    let mut cognitive_answered = 0;

    for answer in answers {
        let question = PROFILE_QUESTIONS
            .iter()
            .find(|q| q.id == answer.question_id)
            .ok_or(ScoringError::UnknownQuestion(answer.question_id))?;
        if !seen.insert(answer.question_id) {
            return Err(ScoringError::DuplicateAnswer(answer.question_id));
        }
        let value = match &answer.value {
            AnswerValue::Likert(v) => normalize_likert(question.id, *v)?,
            other => {
                return Err(ScoringError::KindMismatch {
                    question_id: question.id,
                    expected: "likert",
                    got: other.kind_str(),
                })
            }
        };
        let entry = sums.entry(question.axis).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
        match question.axis {
            ProfileAxis::Riasec(_) => riasec_answered += 1,
            ProfileAxis::Cognitive(_) => cognitive_answered += 1,
        }
    }

    let mean = |axis: ProfileAxis| -> f64 {
        match sums.get(&axis) {
            Some((sum, n)) if *n > 0 => sum / *n as f64 * 100.0,
            _ => 0.0,
        }
    };

    let mut riasec = RiasecScores::default();
    for dim in RiasecDimension::ALL {
        riasec.set(dim, mean(ProfileAxis::Riasec(dim)));
    }
    let mut cognitive = CognitiveScores::default();
    for dim in CognitiveDimension::ALL {
        cognitive.set(dim, mean(ProfileAxis::Cognitive(dim)));
    }

    let holland_code = if riasec_answered > 0 {
        riasec.holland_code()
    } else {
        String::new()
    };

    Ok(ProfileResult {
        holland_code,
        differentiation: riasec.differentiation(),
        dominant_style: cognitive.dominant(),
        riasec,
        cognitive,
        answered: seen.len(),
        total: PROFILE_QUESTIONS.len(),
        riasec_answered,
        cognitive_answered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likert_answers(values: &[(u8, u8)]) -> Vec<Answer> {
        values
            .iter()
            .map(|(id, v)| Answer {
                question_id: *id,
                value: AnswerValue::Likert(*v),
            })
            .collect()
    }

    #[test]
    fn test_bank_covers_every_dimension() {
        assert_eq!(profile_questions().len(), 26);
        for dim in RiasecDimension::ALL {
            let n = profile_questions()
                .iter()
                .filter(|q| q.axis == ProfileAxis::Riasec(dim))
                .count();
            assert_eq!(n, 3, "{dim:?}");
        }
        for dim in CognitiveDimension::ALL {
            let n = profile_questions()
                .iter()
                .filter(|q| q.axis == ProfileAxis::Cognitive(dim))
                .count();
            assert_eq!(n, 2, "{dim:?}");
        }
    }

    #[test]
    fn test_investigative_conventional_profile() {
        // I = 5,5,5 ; C = 5,5,3 ; R = 3,3,3 ; others 1
        let mut pairs = vec![(4, 5), (5, 5), (6, 5), (16, 5), (17, 5), (18, 3)];
        pairs.extend([(1, 3), (2, 3), (3, 3)]);
        pairs.extend((7..=15).map(|id| (id, 1)));
        let result = score_profile(&likert_answers(&pairs)).unwrap();

        assert_eq!(result.riasec.investigative, 100.0);
        assert!((result.riasec.conventional - 250.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.riasec.realistic, 50.0);
        assert_eq!(result.holland_code, "ICR");
        assert_eq!(result.differentiation, 100.0);
    }

    #[test]
    fn test_holland_ties_follow_riasec_order() {
        let scores = RiasecScores {
            realistic: 50.0,
            investigative: 50.0,
            artistic: 50.0,
            social: 50.0,
            enterprising: 50.0,
            conventional: 50.0,
        };
        assert_eq!(scores.holland_code(), "RIA");
        assert_eq!(scores.differentiation(), 0.0);
    }

    #[test]
    fn test_unanswered_dimensions_score_zero() {
        let result = score_profile(&likert_answers(&[(19, 5), (20, 4)])).unwrap();
        assert!((result.cognitive.analytical - 87.5).abs() < 1e-9);
        assert_eq!(result.cognitive.creative, 0.0);
        assert_eq!(result.dominant_style, CognitiveDimension::Analytical);
        assert_eq!(result.answered, 2);
        assert_eq!(result.total, 26);
    }

    #[test]
    fn test_axis_counts_track_partial_quizzes() {
        let interests: Vec<(u8, u8)> = (1..=18).map(|id| (id, 5)).collect();
        let result = score_profile(&likert_answers(&interests)).unwrap();
        assert_eq!(result.riasec_answered, 18);
        assert_eq!(result.cognitive_answered, 0);
        assert!(result.has_riasec());
        assert!(!result.has_cognitive());

        let style_only = score_profile(&likert_answers(&[(19, 5), (25, 2)])).unwrap();
        assert!(!style_only.has_riasec());
        assert_eq!(style_only.holland_code, "");
        assert_eq!(style_only.interest_code(), None);
    }

    #[test]
    fn test_rejects_unknown_duplicate_and_non_likert() {
        assert_eq!(
            score_profile(&likert_answers(&[(99, 3)])),
            Err(ScoringError::UnknownQuestion(99))
        );
        assert_eq!(
            score_profile(&likert_answers(&[(1, 3), (1, 4)])),
            Err(ScoringError::DuplicateAnswer(1))
        );
        let text = vec![Answer {
            question_id: 1,
            value: AnswerValue::Text("oui".into()),
        }];
        assert!(matches!(
            score_profile(&text),
            Err(ScoringError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_dominant_style_ties_keep_first() {
        let scores = CognitiveScores {
            analytical: 40.0,
            creative: 70.0,
            practical: 70.0,
            relational: 10.0,
        };
        assert_eq!(scores.dominant(), CognitiveDimension::Creative);
    }
}
