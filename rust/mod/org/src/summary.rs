//! Headcount figures for the portal's dashboard cards.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Employee, Team};
use crate::policy::PlacementPolicy;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgSummary {
    pub total: usize,
    pub on_bench: usize,
    /// Employees flagged `isAvailable`.
    pub available: usize,
    pub team_leads: usize,
    /// Distinct current projects.
    pub projects: usize,
    pub by_team: BTreeMap<Team, TeamSummary>,
    pub by_role: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub headcount: usize,
    pub on_bench: usize,
}

const UNASSIGNED_ROLE: &str = "Unassigned";

pub fn summarize(employees: &[Employee], policy: &PlacementPolicy) -> OrgSummary {
    let mut summary = OrgSummary {
        total: employees.len(),
        ..OrgSummary::default()
    };
    let mut projects = HashSet::new();

    for e in employees {
        let team = summary.by_team.entry(e.team()).or_default();
        team.headcount += 1;
        if e.is_on_bench {
            team.on_bench += 1;
            summary.on_bench += 1;
        }
        if e.is_available == Some(true) {
            summary.available += 1;
        }
        if policy.is_team_lead(e) {
            summary.team_leads += 1;
        }
        if let Some(key) = e.project_key() {
            projects.insert(key);
        }

        let role = match e.role.trim() {
            "" => UNASSIGNED_ROLE,
            r => r,
        };
        *summary.by_role.entry(role.to_string()).or_default() += 1;
    }

    summary.projects = projects.len();
    summary
}
