use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Team;

/// An employee record as served by the portal directory.
///
/// Only the fields the hierarchy builder and the roster summary look at are
/// typed. Everything else (experience, skills, certifications, avatars ...)
/// lands in `extra` and is serialized back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEmployee")]
pub struct Employee {
    /// Directory identifier. Numeric ids are accepted and stringified.
    pub id: String,

    pub name: String,

    /// Free-form role title, e.g. "CTO", "Senior Manager", "Developer".
    pub role: String,

    /// Raw team label. Use [`Employee::team`] for the classified value.
    pub team: String,

    pub is_team_lead: bool,

    /// True when the employee is not allocated to any project.
    pub is_on_bench: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_project: Option<ProjectRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Human-facing badge number, distinct from `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of [`Employee`]. Directory documents carry `_id`, `id`, or both
/// (the second being a virtual copy of the first); explicit nulls count as
/// absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEmployee {
    #[serde(rename = "_id", default, deserialize_with = "opt_id_string")]
    document_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    id: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    team: String,
    #[serde(default, deserialize_with = "null_as_default")]
    is_team_lead: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    is_on_bench: bool,
    #[serde(default)]
    current_project: Option<ProjectRef>,
    #[serde(default)]
    is_available: Option<bool>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    employee_id: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawEmployee> for Employee {
    type Error = String;

    fn try_from(raw: RawEmployee) -> Result<Self, Self::Error> {
        // `_id` is authoritative; a virtual `id` next to it is dropped.
        let id = raw
            .document_id
            .or(raw.id)
            .ok_or_else(|| format!("employee {:?} has neither `_id` nor `id`", raw.name))?;
        Ok(Self {
            id,
            name: raw.name,
            role: raw.role,
            team: raw.team,
            is_team_lead: raw.is_team_lead,
            is_on_bench: raw.is_on_bench,
            current_project: raw.current_project,
            is_available: raw.is_available,
            gender: raw.gender,
            email: raw.email,
            employee_id: raw.employee_id,
            extra: raw.extra,
        })
    }
}

impl Employee {
    /// Minimal record, mostly useful for tests and fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            team: team.into(),
            is_team_lead: false,
            is_on_bench: false,
            current_project: None,
            is_available: None,
            gender: None,
            email: None,
            employee_id: None,
            extra: Map::new(),
        }
    }

    pub fn team(&self) -> Team {
        Team::classify(&self.team)
    }

    /// Case-insensitive role comparison.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.trim().eq_ignore_ascii_case(role.trim())
    }

    /// Identifier of the current project, if any. Blank ids count as none.
    pub fn project_key(&self) -> Option<&str> {
        self.current_project
            .as_ref()
            .map(ProjectRef::key)
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Reference to the project an employee is allocated to.
///
/// The directory sends either a bare project id or a populated project
/// document. Populated documents may carry `_id`, `id`, both, or only a
/// title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectRef {
    Id(String),
    Detailed {
        #[serde(
            rename = "_id",
            default,
            skip_serializing_if = "Option::is_none",
            deserialize_with = "opt_id_string"
        )]
        document_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_id_string")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl ProjectRef {
    /// Project identifier, `_id` first. Empty when the document has none.
    pub fn key(&self) -> &str {
        match self {
            ProjectRef::Id(id) => id,
            ProjectRef::Detailed { document_id, id, .. } => {
                document_id.as_deref().or(id.as_deref()).unwrap_or("")
            }
        }
    }

    /// Display title, falling back to the id.
    pub fn title(&self) -> &str {
        match self {
            ProjectRef::Id(id) => id,
            ProjectRef::Detailed { title, .. } => title.as_deref().unwrap_or_else(|| self.key()),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn opt_id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_directory_record() {
        let json = serde_json::json!({
            "_id": "65f1",
            "name": "Asha",
            "role": "Developer",
            "team": "Technical",
            "isTeamLead": true,
            "isOnBench": false,
            "currentProject": {"_id": "p1", "title": "Payroll"},
            "isAvailable": true,
            "employeeId": 1042,
            "email": "asha@example.com",
            "experience": 4,
            "skills": ["rust", "react"],
        });
        let e: Employee = serde_json::from_value(json).unwrap();
        assert_eq!(e.id, "65f1");
        assert_eq!(e.team(), Team::Technical);
        assert!(e.is_team_lead);
        assert_eq!(e.project_key(), Some("p1"));
        assert_eq!(e.current_project.as_ref().unwrap().title(), "Payroll");
        assert_eq!(e.employee_id.as_deref(), Some("1042"));
        assert_eq!(e.extra["experience"], 4);
        assert_eq!(e.extra["skills"], serde_json::json!(["rust", "react"]));
    }

    #[test]
    fn missing_flags_default_to_false() {
        let e: Employee = serde_json::from_str(r#"{"id": 7, "name": "Bo", "currentProject": null}"#).unwrap();
        assert_eq!(e.id, "7");
        assert!(!e.is_team_lead);
        assert!(!e.is_on_bench);
        assert_eq!(e.project_key(), None);
        assert_eq!(e.team(), Team::Other);
    }

    #[test]
    fn bare_project_id() {
        let e: Employee = serde_json::from_str(
            r#"{"id": "e1", "name": "Cy", "currentProject": "proj-9"}"#,
        )
        .unwrap();
        assert_eq!(e.project_key(), Some("proj-9"));
        assert_eq!(e.current_project.unwrap().title(), "proj-9");
    }

    #[test]
    fn blank_project_counts_as_none() {
        let mut e = Employee::new("e1", "Di", "Developer", "Technical");
        e.current_project = Some(ProjectRef::Id("  ".into()));
        assert_eq!(e.project_key(), None);
    }

    #[test]
    fn extra_fields_survive_serialization() {
        let json = serde_json::json!({
            "id": "e2",
            "name": "Ed",
            "role": "HR",
            "team": "Recruitment",
            "certifications": [{"name": "SHRM"}],
        });
        let e: Employee = serde_json::from_value(json).unwrap();
        let out = serde_json::to_value(&e).unwrap();
        assert_eq!(out["certifications"][0]["name"], "SHRM");
        assert_eq!(out["team"], "Recruitment");
        assert_eq!(out["isOnBench"], false);
    }

    #[test]
    fn explicit_nulls_fall_back_to_defaults() {
        let e: Employee = serde_json::from_str(
            r#"{"_id": "e4", "name": "Gil", "role": null, "team": null, "isTeamLead": null, "isOnBench": null}"#,
        )
        .unwrap();
        assert_eq!(e.role, "");
        assert_eq!(e.team(), Team::Other);
        assert!(!e.is_team_lead);
        assert!(!e.is_on_bench);
    }

    #[test]
    fn document_id_wins_over_virtual_id() {
        let e: Employee = serde_json::from_str(r#"{"_id": "65f2", "id": "65f2", "name": "Hal"}"#).unwrap();
        assert_eq!(e.id, "65f2");
        assert!(e.extra.is_empty());

        let e: Employee = serde_json::from_str(r#"{"_id": "a", "id": "b", "name": "Hal"}"#).unwrap();
        assert_eq!(e.id, "a");

        let out = serde_json::to_value(&e).unwrap();
        assert_eq!(out["id"], "a");
        assert!(out.get("_id").is_none());
    }

    #[test]
    fn record_without_any_id_is_rejected() {
        let err = serde_json::from_str::<Employee>(r#"{"name": "Ira"}"#).unwrap_err();
        assert!(err.to_string().contains("neither `_id` nor `id`"));
    }

    #[test]
    fn project_document_shapes() {
        let e: Employee = serde_json::from_str(
            r#"{"id": "e5", "name": "Jo", "currentProject": {"title": "Intranet"}}"#,
        )
        .unwrap();
        assert_eq!(e.project_key(), None);
        assert_eq!(e.current_project.as_ref().unwrap().title(), "Intranet");

        let e: Employee = serde_json::from_str(
            r#"{"id": "e6", "name": "Ko", "currentProject": {"_id": "p7", "id": "p7", "title": "Billing"}}"#,
        )
        .unwrap();
        assert_eq!(e.project_key(), Some("p7"));

        let e: Employee = serde_json::from_str(
            r#"{"id": "e7", "name": "Lu", "currentProject": {"id": 12}}"#,
        )
        .unwrap();
        assert_eq!(e.project_key(), Some("12"));
        assert_eq!(e.current_project.unwrap().title(), "12");
    }

    #[test]
    fn role_match_ignores_case() {
        let e = Employee::new("e3", "Fa", " senior manager", "Technical");
        assert!(e.has_role("Senior Manager"));
        assert!(!e.has_role("Manager"));
    }
}
