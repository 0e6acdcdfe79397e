//! Professional role catalogue and nearest-role matching.

use serde::{Deserialize, Serialize};

use crate::certification::questions::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    Developer,
    DataAnalyst,
    DataEngineer,
    CyberAnalyst,
    Pentester,
    Devops,
    Sysadmin,
    ProjectLead,
}

impl RoleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleId::Developer => "developer",
            RoleId::DataAnalyst => "data_analyst",
            RoleId::DataEngineer => "data_engineer",
            RoleId::CyberAnalyst => "cyber_analyst",
            RoleId::Pentester => "pentester",
            RoleId::Devops => "devops",
            RoleId::Sysadmin => "sysadmin",
            RoleId::ProjectLead => "project_lead",
        }
    }
}

/// A role and its expected profile over the five domains, in `Domain::ALL` order.
#[derive(Debug, Clone, Copy)]
pub struct RoleProfile {
    pub id: RoleId,
    pub label: &'static str,
    pub weights: [f64; 5],
}

pub static ROLE_CATALOGUE: [RoleProfile; 8] = [
    RoleProfile {
        id: RoleId::Developer,
        label: "Développeur·se logiciel",
        weights: [0.9, 0.3, 0.3, 0.4, 0.5],
    },
    RoleProfile {
        id: RoleId::DataAnalyst,
        label: "Data analyst",
        weights: [0.3, 0.85, 0.2, 0.2, 0.6],
    },
    RoleProfile {
        id: RoleId::DataEngineer,
        label: "Data engineer",
        weights: [0.6, 0.9, 0.3, 0.6, 0.4],
    },
    RoleProfile {
        id: RoleId::CyberAnalyst,
        label: "Analyste cybersécurité (SOC)",
        weights: [0.3, 0.4, 0.9, 0.5, 0.4],
    },
    RoleProfile {
        id: RoleId::Pentester,
        label: "Pentesteur·se",
        weights: [0.6, 0.2, 0.9, 0.5, 0.3],
    },
    RoleProfile {
        id: RoleId::Devops,
        label: "Ingénieur·e DevOps",
        weights: [0.6, 0.3, 0.4, 0.9, 0.5],
    },
    RoleProfile {
        id: RoleId::Sysadmin,
        label: "Administrateur·rice systèmes et réseaux",
        weights: [0.3, 0.2, 0.5, 0.9, 0.4],
    },
    RoleProfile {
        id: RoleId::ProjectLead,
        label: "Chef·fe de projet IT",
        weights: [0.4, 0.4, 0.3, 0.4, 0.9],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role: RoleId,
    pub label: String,
    pub distance: f64,
    /// 100 at distance 0, 0 at the diagonal of the unit hypercube.
    pub match_percent: u32,
}

/// Largest possible distance between two points of [0, 1]^5.
fn max_distance() -> f64 {
    (Domain::ALL.len() as f64).sqrt()
}

fn euclidean(a: &[f64; 5], b: &[f64; 5]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Ranks every role by distance to `vector` (domain scores on [0, 1]).
/// Equal distances keep catalogue order.
pub fn nearest_roles(vector: &[f64; 5]) -> Vec<RoleMatch> {
    let mut matches: Vec<RoleMatch> = ROLE_CATALOGUE
        .iter()
        .map(|role| {
            let distance = euclidean(vector, &role.weights);
            let match_percent = ((1.0 - distance / max_distance()) * 100.0)
                .round()
                .clamp(0.0, 100.0) as u32;
            RoleMatch {
                role: role.id,
                label: role.label.to_string(),
                distance,
                match_percent,
            }
        })
        .collect();
    matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    matches
}

/// Nearest and second-nearest roles.
pub fn best_roles(vector: &[f64; 5]) -> (RoleMatch, Option<RoleMatch>) {
    let mut ranked = nearest_roles(vector);
    let secondary = (ranked.len() > 1).then(|| ranked.remove(1));
    // the catalogue is a non-empty static, so a first match always exists
    (ranked.remove(0), secondary)
}
