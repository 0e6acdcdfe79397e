//! Certification question bank — 35 items across five competency domains.
//!
//! Each question carries a domain, a weight, an answer kind and optionally the
//! id of its antagonist: a question phrased so that an honest candidate answers
//! the two in opposite directions. Antagonist pairs feed the coherence check.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::certification::answers::{normalize_likert, AnswerValue, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Dev,
    Data,
    Cyber,
    Infra,
    Cross,
}

impl Domain {
    /// Canonical order, also the axis order of role vectors.
    pub const ALL: [Domain; 5] = [
        Domain::Dev,
        Domain::Data,
        Domain::Cyber,
        Domain::Infra,
        Domain::Cross,
    ];

    pub fn index(self) -> usize {
        match self {
            Domain::Dev => 0,
            Domain::Data => 1,
            Domain::Cyber => 2,
            Domain::Infra => 3,
            Domain::Cross => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Domain::Dev => "Développement",
            Domain::Data => "Data",
            Domain::Cyber => "Cybersécurité",
            Domain::Infra => "Infrastructure & cloud",
            Domain::Cross => "Compétences transverses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    High,
    Medium,
    Low,
}

impl Weight {
    pub fn factor(self) -> f64 {
        match self {
            Weight::High => 3.0,
            Weight::Medium => 2.0,
            Weight::Low => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioOption {
    pub label: &'static str,
    /// 0–3, hidden from candidates.
    pub points: u8,
}

pub const SCENARIO_MAX_POINTS: u8 = 3;

/// Number of distinct keywords that earns an open answer the full score.
pub const OPEN_KEYWORD_TARGET: usize = 3;

#[derive(Debug, Clone, Copy)]
pub enum QuestionKind {
    Likert { reversed: bool },
    Scenario { options: &'static [ScenarioOption] },
    Open { keywords: &'static [&'static str] },
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Likert { .. } => "likert",
            QuestionKind::Scenario { .. } => "choice",
            QuestionKind::Open { .. } => "text",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: u8,
    pub domain: Domain,
    pub weight: Weight,
    pub kind: QuestionKind,
    pub text: &'static str,
    pub antagonist: Option<u8>,
}

impl Question {
    /// Converts a raw answer into a [0, 1] score.
    ///
    /// Returns `Ok(None)` for a blank open answer, which counts as unanswered.
    pub fn normalize(&self, value: &AnswerValue) -> Result<Option<f64>, ScoringError> {
        match (&self.kind, value) {
            (QuestionKind::Likert { reversed }, AnswerValue::Likert(v)) => {
                let n = normalize_likert(self.id, *v)?;
                Ok(Some(if *reversed { 1.0 - n } else { n }))
            }
            (QuestionKind::Scenario { options }, AnswerValue::Choice(index)) => {
                let option = options.get(*index).ok_or(ScoringError::ChoiceOutOfRange {
                    question_id: self.id,
                    index: *index,
                })?;
                Ok(Some(
                    f64::from(option.points) / f64::from(SCENARIO_MAX_POINTS),
                ))
            }
            (QuestionKind::Open { keywords }, AnswerValue::Text(text)) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Some(score_open_text(text, keywords)))
            }
            (kind, other) => Err(ScoringError::KindMismatch {
                question_id: self.id,
                expected: kind.as_str(),
                got: other.kind_str(),
            }),
        }
    }
}

/// Keywords at least this long also match longer words sharing their stem
/// ("refactor" in "refactoring"). Shorter ones need the whole word.
const STEM_MATCH_MIN_CHARS: usize = 6;

fn score_open_text(text: &str, keywords: &[&str]) -> f64 {
    let words = tokenize(text);
    let hits = keywords
        .iter()
        .filter(|kw| contains_phrase(&words, &tokenize(kw)))
        .count();
    (hits as f64 / OPEN_KEYWORD_TARGET as f64).min(1.0)
}

/// Lowercased, accent-folded words; any non-alphanumeric character separates words.
fn tokenize(text: &str) -> Vec<String> {
    fold_accents(&text.to_lowercase())
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn word_matches(word: &str, keyword: &str) -> bool {
    match word.strip_prefix(keyword) {
        Some("") | Some("s") | Some("x") => true,
        Some(_) => keyword.chars().count() >= STEM_MATCH_MIN_CHARS,
        None => false,
    }
}

/// True when `phrase` occurs as consecutive words of `words`.
fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty()
        && words.windows(phrase.len()).any(|window| {
            window
                .iter()
                .zip(phrase)
                .all(|(word, keyword)| word_matches(word, keyword))
        })
}

/// Strips French diacritics; case is preserved.
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Î' | 'Ï' => 'I',
            'Ô' | 'Ö' => 'O',
            'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Public view (no scoring data)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: u8,
    pub domain: Domain,
    pub kind: &'static str,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        let options = match q.kind {
            QuestionKind::Scenario { options } => options.iter().map(|o| o.label).collect(),
            _ => Vec::new(),
        };
        PublicQuestion {
            id: q.id,
            domain: q.domain,
            kind: q.kind.as_str(),
            text: q.text,
            options,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

pub fn question_bank() -> &'static [Question] {
    &QUESTION_BANK
}

pub fn find_question(id: u8) -> Option<&'static Question> {
    QUESTION_BANK.iter().find(|q| q.id == id)
}

pub fn questions_for_domain(domain: Domain) -> impl Iterator<Item = &'static Question> {
    QUESTION_BANK.iter().filter(move |q| q.domain == domain)
}

/// Every antagonist pair once, lower id first.
pub fn antagonist_pairs() -> Vec<(u8, u8)> {
    let mut seen = HashSet::new();
    let mut pairs = Vec::new();
    for q in QUESTION_BANK.iter() {
        if let Some(other) = q.antagonist {
            let pair = (q.id.min(other), q.id.max(other));
            if seen.insert(pair) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

pub fn total_questions() -> usize {
    QUESTION_BANK.len()
}

// ────────────────────────────────────────────────────────────────────────────
// Bank
// ────────────────────────────────────────────────────────────────────────────

const fn likert(
    id: u8,
    domain: Domain,
    weight: Weight,
    text: &'static str,
    antagonist: Option<u8>,
) -> Question {
    Question {
        id,
        domain,
        weight,
        kind: QuestionKind::Likert { reversed: false },
        text,
        antagonist,
    }
}

const fn reversed(
    id: u8,
    domain: Domain,
    weight: Weight,
    text: &'static str,
    antagonist: Option<u8>,
) -> Question {
    Question {
        id,
        domain,
        weight,
        kind: QuestionKind::Likert { reversed: true },
        text,
        antagonist,
    }
}

const fn scenario(
    id: u8,
    domain: Domain,
    weight: Weight,
    text: &'static str,
    options: &'static [ScenarioOption],
) -> Question {
    Question {
        id,
        domain,
        weight,
        kind: QuestionKind::Scenario { options },
        text,
        antagonist: None,
    }
}

const fn open(
    id: u8,
    domain: Domain,
    weight: Weight,
    text: &'static str,
    keywords: &'static [&'static str],
) -> Question {
    Question {
        id,
        domain,
        weight,
        kind: QuestionKind::Open { keywords },
        text,
        antagonist: None,
    }
}

macro_rules! opt {
    ($label:expr, $points:expr) => {
        ScenarioOption {
            label: $label,
            points: $points,
        }
    };
}

use Domain::{Cross, Cyber, Data, Dev, Infra};
use Weight::{High, Low, Medium};

#[rustfmt::skip]
static QUESTION_BANK: [Question; 35] = [
    // Développement
    likert(1, Dev, High, "J'aime décomposer un problème complexe en fonctions et modules réutilisables.", Some(2)),
    reversed(2, Dev, Medium, "Structurer du code en modules me semble une perte de temps.", Some(1)),
    likert(3, Dev, High, "J'écris des tests automatisés pour le code que je produis.", None),
    scenario(4, Dev, High, "Un bug n'apparaît en production que sous forte charge. Que faites-vous en premier ?", &[
        opt!("Je redémarre le serveur", 0),
        opt!("J'ajoute des traces et je reproduis le problème avec un test de charge", 3),
        opt!("Je réécris le module concerné", 1),
        opt!("J'attends un nouveau signalement", 0),
    ]),
    likert(5, Dev, Medium, "J'utilise un système de gestion de versions (Git) au quotidien.", None),
    likert(6, Dev, Low, "Je suis l'actualité des langages et frameworks de programmation.", None),
    open(7, Dev, Medium, "Décrivez un projet de développement dont vous êtes fier·e.", &[
        "api", "test", "git", "refactor", "architecture", "déploiement", "framework", "base de données",
    ]),
    scenario(8, Dev, Medium, "Une revue de code révèle une fonction de 300 lignes. Vous…", &[
        opt!("La découpez en fonctions plus petites et testées", 3),
        opt!("Ajoutez des commentaires", 1),
        opt!("La laissez telle quelle si elle fonctionne", 0),
        opt!("La réécrivez entièrement sans tests", 1),
    ]),
    // Data
    likert(9, Data, High, "J'aime explorer un jeu de données pour y trouver des tendances.", Some(10)),
    reversed(10, Data, Medium, "Les tableaux de chiffres m'ennuient rapidement.", Some(9)),
    likert(11, Data, High, "J'écris sans difficulté des requêtes SQL avec jointures et agrégations.", None),
    scenario(12, Data, High, "Un indicateur clé chute de 30 % du jour au lendemain. Première action ?", &[
        opt!("Alerter immédiatement la direction", 1),
        opt!("Vérifier la qualité et la fraîcheur des données sources", 3),
        opt!("Supprimer les valeurs aberrantes", 0),
        opt!("Relancer le tableau de bord", 1),
    ]),
    likert(13, Data, Medium, "Je sais choisir une visualisation adaptée au message à transmettre.", None),
    likert(14, Data, Low, "Je maîtrise les bases des statistiques (moyenne, écart-type, corrélation).", None),
    open(15, Data, Medium, "Comment garantiriez-vous la qualité d'un pipeline de données ?", &[
        "validation", "test", "monitoring", "schéma", "doublon", "qualité", "traçabilité", "alerte",
    ]),
    // Cybersécurité
    likert(16, Cyber, High, "Je vérifie systématiquement la sécurité des outils et services que j'utilise.", Some(17)),
    reversed(17, Cyber, Medium, "La sécurité informatique est l'affaire des autres équipes.", Some(16)),
    likert(18, Cyber, High, "Je connais les principales vulnérabilités web (injection, XSS, CSRF).", None),
    scenario(19, Cyber, High, "Un e-mail vous demande de réinitialiser votre mot de passe via un lien inconnu. Vous…", &[
        opt!("Cliquez pour vérifier", 0),
        opt!("Signalez l'e-mail à l'équipe sécurité sans cliquer", 3),
        opt!("Le supprimez sans rien dire", 1),
        opt!("Le transférez à vos collègues pour avis", 0),
    ]),
    likert(20, Cyber, Medium, "J'applique le principe du moindre privilège.", None),
    scenario(21, Cyber, Medium, "Un serveur présente une activité réseau anormale la nuit. Vous…", &[
        opt!("L'isolez et analysez les journaux", 3),
        opt!("Le redémarrez", 1),
        opt!("Ignorez l'alerte si le service fonctionne", 0),
        opt!("Changez uniquement le mot de passe administrateur", 1),
    ]),
    likert(22, Cyber, Low, "Je suis les bulletins de sécurité (CVE, CERT-FR).", None),
    // Infrastructure
    likert(23, Infra, High, "J'aime automatiser l'installation et la configuration de serveurs.", Some(24)),
    reversed(24, Infra, Medium, "Je préfère configurer les machines à la main, une par une.", Some(23)),
    likert(25, Infra, High, "Je comprends le fonctionnement des réseaux (IP, DNS, routage).", None),
    scenario(26, Infra, High, "Un déploiement échoue à mi-parcours en production. Vous…", &[
        opt!("Revenez à la version précédente puis analysez", 3),
        opt!("Corrigez directement en production", 1),
        opt!("Relancez le déploiement jusqu'à ce qu'il passe", 0),
        opt!("Attendez le lendemain", 0),
    ]),
    likert(27, Infra, Medium, "J'ai déjà utilisé des conteneurs (Docker) ou un orchestrateur.", None),
    likert(28, Infra, Low, "Je connais au moins un fournisseur cloud (AWS, Azure, GCP, OVH).", None),
    open(29, Infra, Medium, "Décrivez comment vous surveilleriez la santé d'une infrastructure.", &[
        "monitoring", "métrique", "alerte", "log", "supervision", "sauvegarde", "disponibilité", "dashboard",
    ]),
    // Transverse
    likert(30, Cross, High, "J'explique facilement des sujets techniques à un public non technique.", Some(31)),
    reversed(31, Cross, Medium, "J'ai du mal à vulgariser mon travail auprès de collègues non techniques.", Some(30)),
    likert(32, Cross, Medium, "Je sais organiser mon travail par priorités et respecter des délais.", None),
    scenario(33, Cross, Medium, "Deux collègues sont en désaccord sur un choix technique bloquant. Vous…", &[
        opt!("Tranchez seul·e", 1),
        opt!("Organisez un échange factuel avec des critères de décision", 3),
        opt!("Laissez la situation se régler d'elle-même", 0),
        opt!("Escaladez immédiatement au manager", 1),
    ]),
    likert(34, Cross, Low, "J'apprends régulièrement de nouvelles compétences en autonomie.", None),
    open(35, Cross, Low, "Quel est votre projet professionnel à trois ans ?", &[
        "objectif", "formation", "certification", "équipe", "responsabilité", "expertise", "projet", "évolution",
    ]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_has_35_unique_ids() {
        assert_eq!(question_bank().len(), 35);
        let ids: HashSet<u8> = question_bank().iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 35);
        assert!(ids.iter().all(|id| (1..=35).contains(id)));
    }

    #[test]
    fn test_every_domain_is_populated() {
        for domain in Domain::ALL {
            assert!(
                questions_for_domain(domain).count() >= 5,
                "{domain:?} has too few questions"
            );
        }
    }

    #[test]
    fn test_antagonists_are_symmetric_likert_pairs() {
        for q in question_bank() {
            if let Some(other_id) = q.antagonist {
                let other = find_question(other_id).expect("antagonist exists");
                assert_eq!(other.antagonist, Some(q.id), "pair {}↔{}", q.id, other_id);
                assert!(matches!(q.kind, QuestionKind::Likert { .. }));
                assert!(matches!(other.kind, QuestionKind::Likert { .. }));
            }
        }
        let pairs = antagonist_pairs();
        assert_eq!(pairs.len(), 5);
        assert!(pairs.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn test_scenario_options_non_empty_and_bounded() {
        for q in question_bank() {
            if let QuestionKind::Scenario { options } = q.kind {
                assert!(!options.is_empty());
                assert!(options.iter().all(|o| o.points <= SCENARIO_MAX_POINTS));
                assert!(options.iter().any(|o| o.points == SCENARIO_MAX_POINTS));
            }
        }
    }

    #[test]
    fn test_reversed_likert_inverts_score() {
        let q = find_question(2).unwrap();
        assert_eq!(q.normalize(&AnswerValue::Likert(5)).unwrap(), Some(0.0));
        assert_eq!(q.normalize(&AnswerValue::Likert(1)).unwrap(), Some(1.0));
    }

    #[test]
    fn test_scenario_choice_scores_points() {
        let q = find_question(4).unwrap();
        assert_eq!(q.normalize(&AnswerValue::Choice(1)).unwrap(), Some(1.0));
        assert_eq!(q.normalize(&AnswerValue::Choice(0)).unwrap(), Some(0.0));
        assert_eq!(
            q.normalize(&AnswerValue::Choice(9)),
            Err(ScoringError::ChoiceOutOfRange {
                question_id: 4,
                index: 9
            })
        );
    }

    #[test]
    fn test_open_answer_keyword_hits_are_accent_insensitive() {
        let q = find_question(29).unwrap();
        let score = q
            .normalize(&AnswerValue::Text(
                "Du monitoring, des metriques et une alerte".to_string(),
            ))
            .unwrap()
            .unwrap();
        assert_eq!(score, 1.0);

        let partial = q
            .normalize(&AnswerValue::Text("Je lirais les logs".to_string()))
            .unwrap()
            .unwrap();
        assert!((partial - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_keywords_match_whole_words_only() {
        // "api" inside "capital" and "log" inside "technologie" are not hits.
        let dev = find_question(7).unwrap();
        let score = dev
            .normalize(&AnswerValue::Text(
                "Un capital de technologies et une base de donnees".to_string(),
            ))
            .unwrap()
            .unwrap();
        assert!((score - 1.0 / 3.0).abs() < 1e-9, "got {score}");

        let infra = find_question(29).unwrap();
        let score = infra
            .normalize(&AnswerValue::Text("Une approche technologique".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_long_keywords_match_their_stem() {
        let dev = find_question(7).unwrap();
        let score = dev
            .normalize(&AnswerValue::Text(
                "Refactoring, tests et APIs REST".to_string(),
            ))
            .unwrap()
            .unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_blank_open_answer_is_unanswered() {
        let q = find_question(7).unwrap();
        assert_eq!(q.normalize(&AnswerValue::Text("   ".into())).unwrap(), None);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let q = find_question(1).unwrap();
        assert_eq!(
            q.normalize(&AnswerValue::Choice(0)),
            Err(ScoringError::KindMismatch {
                question_id: 1,
                expected: "likert",
                got: "choice"
            })
        );
    }

    #[test]
    fn test_public_view_hides_points() {
        let view = PublicQuestion::from(find_question(4).unwrap());
        assert_eq!(view.options.len(), 4);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("points"));
    }
}
