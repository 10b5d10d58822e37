//! Placement rules for the hierarchy builder.
//!
//! Every role and team taxonomy the builder consults lives here, so a
//! deployment can reshape its org chart from a TOML file without touching
//! code. All fields are optional in the file; missing ones keep their
//! defaults.
//!
//! ```toml
//! group_by_role = true
//! bench_exempt_teams = ["Executive", "Finance"]
//!
//! [team_heads]
//! Technical = "CTO"
//!
//! [palette]
//! Technical = "#2563eb"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Employee, Team};
use crate::service::OrgError;

/// Used when neither the team nor `Other` has a palette entry.
pub const FALLBACK_COLOR: &str = "#64748b";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPolicy {
    /// Role of the single tree root.
    pub root_role: String,

    /// Roles placed directly under the root.
    pub executive_roles: Vec<String>,

    /// First management tier inside a team.
    pub senior_manager_roles: Vec<String>,

    /// Second management tier inside a team.
    pub manager_roles: Vec<String>,

    /// Role titles treated as team leads even without the `isTeamLead` flag.
    pub team_lead_roles: Vec<String>,

    /// Executive role that owns each team. A team whose head is missing
    /// gets a synthetic department node under the root.
    pub team_heads: BTreeMap<Team, String>,

    /// Teams whose bench members stay mixed with everyone else.
    pub bench_exempt_teams: Vec<Team>,

    /// Put bench members of non-exempt teams in a separate "Bench" group.
    pub segregate_bench: bool,

    /// Bucket loose individual contributors into per-role group nodes.
    pub group_by_role: bool,

    /// Appended to the role name to label a role group.
    pub role_group_suffix: String,

    /// Name of the group node holding a parent's bench members.
    pub bench_label: String,

    /// Team display colors. Entries in a config file are merged over the
    /// defaults.
    #[serde(deserialize_with = "merge_palette")]
    pub palette: BTreeMap<Team, String>,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            root_role: "CEO".to_string(),
            executive_roles: strings(&["CTO", "CFO", "CMO", "COO", "CHRO"]),
            senior_manager_roles: strings(&["Senior Manager"]),
            manager_roles: strings(&["Manager"]),
            team_lead_roles: strings(&["Team Lead"]),
            team_heads: BTreeMap::from([
                (Team::Technical, "CTO".to_string()),
                (Team::Finance, "CFO".to_string()),
                (Team::Marketing, "CMO".to_string()),
                (Team::Operations, "COO".to_string()),
                (Team::Recruitment, "CHRO".to_string()),
            ]),
            bench_exempt_teams: vec![
                Team::Executive,
                Team::Operations,
                Team::Recruitment,
                Team::Finance,
            ],
            segregate_bench: true,
            group_by_role: false,
            role_group_suffix: " Team".to_string(),
            bench_label: "Bench".to_string(),
            palette: default_palette(),
        }
    }
}

impl PlacementPolicy {
    /// Load a policy from a TOML file.
    pub fn load(path: &Path) -> Result<Self, OrgError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OrgError::Validation(format!("failed to read policy {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, OrgError> {
        toml::from_str(content).map_err(|e| OrgError::Validation(format!("invalid policy: {}", e)))
    }

    pub fn is_root(&self, e: &Employee) -> bool {
        e.has_role(&self.root_role)
    }

    pub fn is_executive(&self, e: &Employee) -> bool {
        role_in(&self.executive_roles, e)
    }

    /// Management tier of an employee inside their team: 0 for senior
    /// managers, 1 for managers, `None` for everyone else.
    pub fn management_tier(&self, e: &Employee) -> Option<usize> {
        if role_in(&self.senior_manager_roles, e) {
            Some(0)
        } else if role_in(&self.manager_roles, e) {
            Some(1)
        } else {
            None
        }
    }

    pub fn is_team_lead(&self, e: &Employee) -> bool {
        e.is_team_lead || role_in(&self.team_lead_roles, e)
    }

    /// Whether bench members of `team` go into a separate bench group.
    pub fn segregates_bench(&self, team: Team) -> bool {
        self.segregate_bench && !self.bench_exempt_teams.contains(&team)
    }

    pub fn head_role(&self, team: Team) -> Option<&str> {
        self.team_heads.get(&team).map(String::as_str)
    }

    pub fn color(&self, team: Team) -> &str {
        self.palette
            .get(&team)
            .or_else(|| self.palette.get(&Team::Other))
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn role_group_label(&self, role: &str) -> String {
        format!("{}{}", role.trim(), self.role_group_suffix)
    }
}

fn role_in(roles: &[String], e: &Employee) -> bool {
    roles.iter().any(|r| e.has_role(r))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_palette() -> BTreeMap<Team, String> {
    BTreeMap::from([
        (Team::Executive, "#6366f1".to_string()),
        (Team::Technical, "#0ea5e9".to_string()),
        (Team::Operations, "#f59e0b".to_string()),
        (Team::Recruitment, "#10b981".to_string()),
        (Team::Marketing, "#ec4899".to_string()),
        (Team::Finance, "#8b5cf6".to_string()),
        (Team::Other, FALLBACK_COLOR.to_string()),
    ])
}

fn merge_palette<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<Team, String>, D::Error> {
    let overrides = BTreeMap::<Team, String>::deserialize(deserializer)?;
    let mut palette = default_palette();
    palette.extend(overrides);
    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_team_color() {
        let policy = PlacementPolicy::default();
        for team in Team::ALL {
            assert!(policy.color(team).starts_with('#'), "no color for {team}");
        }
        assert_eq!(policy.head_role(Team::Technical), Some("CTO"));
        assert_eq!(policy.head_role(Team::Executive), None);
    }

    #[test]
    fn bench_exemptions() {
        let policy = PlacementPolicy::default();
        assert!(policy.segregates_bench(Team::Technical));
        assert!(policy.segregates_bench(Team::Marketing));
        assert!(!policy.segregates_bench(Team::Finance));
        assert!(!policy.segregates_bench(Team::Executive));

        let off = PlacementPolicy { segregate_bench: false, ..Default::default() };
        assert!(!off.segregates_bench(Team::Technical));
    }

    #[test]
    fn role_classification() {
        let policy = PlacementPolicy::default();
        let sm = Employee::new("1", "A", "Senior Manager", "Technical");
        let m = Employee::new("2", "B", "manager", "Technical");
        let dev = Employee::new("3", "C", "Developer", "Technical");
        let lead = Employee::new("4", "D", "Team Lead", "Technical");
        assert_eq!(policy.management_tier(&sm), Some(0));
        assert_eq!(policy.management_tier(&m), Some(1));
        assert_eq!(policy.management_tier(&dev), None);
        assert!(policy.is_team_lead(&lead));
        assert!(!policy.is_team_lead(&dev));
        assert!(policy.is_executive(&Employee::new("5", "E", "cfo", "Finance")));
        assert!(policy.is_root(&Employee::new("6", "F", "CEO", "Executive")));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let policy = PlacementPolicy::from_toml_str(
            r##"
group_by_role = true
bench_exempt_teams = ["Finance"]

[palette]
Technical = "#2563eb"
"##,
        )
        .unwrap();
        assert!(policy.group_by_role);
        assert_eq!(policy.bench_exempt_teams, vec![Team::Finance]);
        assert_eq!(policy.color(Team::Technical), "#2563eb");
        assert_eq!(policy.color(Team::Finance), "#8b5cf6");
        assert_eq!(policy.root_role, "CEO");
        assert_eq!(policy.manager_roles, vec!["Manager".to_string()]);
    }

    #[test]
    fn invalid_toml_is_validation_error() {
        let err = PlacementPolicy::from_toml_str("group_by_role = \"yes\"").unwrap_err();
        assert!(matches!(err, OrgError::Validation(_)));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "root_role = \"Founder\"\n").unwrap();
        let policy = PlacementPolicy::load(tmp.path()).unwrap();
        assert_eq!(policy.root_role, "Founder");
        assert!(policy.segregate_bench);
    }

    #[test]
    fn role_group_label() {
        let policy = PlacementPolicy::default();
        assert_eq!(policy.role_group_label("Developer"), "Developer Team");
    }
}
