use serde_json::Value;

use crate::model::Employee;
use crate::service::OrgError;

/// Envelope keys the directory has been seen to wrap the list in.
const ENVELOPE_KEYS: [&str; 3] = ["items", "data", "employees"];

/// Decode an employee listing response.
///
/// Accepts a bare JSON array or an object carrying the array under one of
/// [`ENVELOPE_KEYS`].
pub fn parse_roster(body: &[u8]) -> Result<Vec<Employee>, OrgError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| OrgError::Upstream(format!("employee listing is not JSON: {}", e)))?;

    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut obj) => ENVELOPE_KEYS
            .iter()
            .find_map(|k| obj.remove(*k).filter(Value::is_array))
            .ok_or_else(|| {
                OrgError::Upstream(format!(
                    "employee listing object has none of {:?} holding an array",
                    ENVELOPE_KEYS
                ))
            })?,
        other => {
            return Err(OrgError::Upstream(format!(
                "expected employee array, got {}",
                type_name(&other)
            )))
        }
    };

    serde_json::from_value(list)
        .map_err(|e| OrgError::Upstream(format!("malformed employee record: {}", e)))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array() {
        let roster = parse_roster(br#"[{"_id": "1", "name": "A", "role": "CEO"}]"#).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, "1");
    }

    #[test]
    fn wrapped_array() {
        let roster = parse_roster(br#"{"success": true, "data": [{"id": 1, "name": "A"}]}"#).unwrap();
        assert_eq!(roster[0].id, "1");
        let roster = parse_roster(br#"{"employees": []}"#).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn rejects_non_list() {
        let err = parse_roster(b"\"nope\"").unwrap_err();
        assert!(err.to_string().contains("got string"));
        let err = parse_roster(br#"{"message": "unauthorized"}"#).unwrap_err();
        assert!(matches!(err, OrgError::Upstream(_)));
        assert!(parse_roster(b"<html>").is_err());
    }

    #[test]
    fn tolerates_loose_records() {
        let roster = parse_roster(
            br#"[
                {"_id": "1", "id": "1", "name": "A", "role": "CEO", "team": "Executive"},
                {"_id": "2", "name": "B", "role": null, "team": null, "isTeamLead": null, "isOnBench": null},
                {"_id": "3", "name": "C", "currentProject": {"title": "Unfiled"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].id, "1");
        assert_eq!(roster[1].team(), crate::model::Team::Other);
        assert!(!roster[1].is_team_lead);
        assert_eq!(roster[2].project_key(), None);
    }

    #[test]
    fn rejects_record_without_name() {
        let err = parse_roster(br#"[{"id": "1"}]"#).unwrap_err();
        assert!(err.to_string().contains("malformed employee record"));
    }
}
