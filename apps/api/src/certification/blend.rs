//! Blends profiling-quiz results into certification domain scores.
//!
//! A candidate who took the RIASEC / cognitive quiz gets each answered domain
//! nudged toward the affinity their profile shows for it:
//! `blended = quiz × (1 − wr − wc) + riasec_affinity × wr + cognitive_affinity × wc`.

use serde::{Deserialize, Serialize};

use crate::certification::questions::Domain;
use crate::profile::riasec::{CognitiveDimension, CognitiveScores, RiasecDimension, RiasecScores};

pub const RIASEC_BLEND_WEIGHT: f64 = 0.15;
pub const COGNITIVE_BLEND_WEIGHT: f64 = 0.10;

/// Optional profile data supplied alongside certification answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInputs {
    pub riasec: Option<RiasecScores>,
    pub cognitive: Option<CognitiveScores>,
}

impl ProfileInputs {
    pub fn is_empty(&self) -> bool {
        self.riasec.is_none() && self.cognitive.is_none()
    }
}

fn riasec_weights(domain: Domain) -> &'static [(RiasecDimension, f64)] {
    use RiasecDimension::*;
    match domain {
        Domain::Dev => &[(Investigative, 0.4), (Realistic, 0.3), (Artistic, 0.3)],
        Domain::Data => &[(Investigative, 0.5), (Conventional, 0.4), (Artistic, 0.1)],
        Domain::Cyber => &[(Investigative, 0.4), (Conventional, 0.3), (Realistic, 0.3)],
        Domain::Infra => &[(Realistic, 0.5), (Conventional, 0.4), (Investigative, 0.1)],
        Domain::Cross => &[(Social, 0.4), (Enterprising, 0.4), (Artistic, 0.2)],
    }
}

fn cognitive_weights(domain: Domain) -> &'static [(CognitiveDimension, f64)] {
    use CognitiveDimension::*;
    match domain {
        Domain::Dev => &[(Analytical, 0.4), (Creative, 0.3), (Practical, 0.3)],
        Domain::Data => &[(Analytical, 0.7), (Creative, 0.3)],
        Domain::Cyber => &[(Analytical, 0.6), (Practical, 0.4)],
        Domain::Infra => &[(Practical, 0.7), (Analytical, 0.3)],
        Domain::Cross => &[(Relational, 0.7), (Creative, 0.3)],
    }
}

/// Weighted mean of the RIASEC dimensions relevant to `domain`, 0–100.
pub fn riasec_affinity(domain: Domain, scores: &RiasecScores) -> f64 {
    riasec_weights(domain)
        .iter()
        .map(|(dim, w)| scores.get(*dim).clamp(0.0, 100.0) * w)
        .sum()
}

/// Weighted mean of the cognitive dimensions relevant to `domain`, 0–100.
pub fn cognitive_affinity(domain: Domain, scores: &CognitiveScores) -> f64 {
    cognitive_weights(domain)
        .iter()
        .map(|(dim, w)| scores.get(*dim).clamp(0.0, 100.0) * w)
        .sum()
}

/// Blends a 0–100 quiz score with whatever profile data is present.
pub fn blend_domain_score(domain: Domain, quiz_score: f64, profile: &ProfileInputs) -> f64 {
    let mut quiz_share = 1.0;
    let mut blended = 0.0;

    if let Some(riasec) = &profile.riasec {
        quiz_share -= RIASEC_BLEND_WEIGHT;
        blended += riasec_affinity(domain, riasec) * RIASEC_BLEND_WEIGHT;
    }
    if let Some(cognitive) = &profile.cognitive {
        quiz_share -= COGNITIVE_BLEND_WEIGHT;
        blended += cognitive_affinity(domain, cognitive) * COGNITIVE_BLEND_WEIGHT;
    }

    (blended + quiz_score * quiz_share).clamp(0.0, 100.0)
}
