use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Organizational team an employee belongs to.
///
/// Declaration order is the order department nodes appear under the root.
/// Anything the directory sends that isn't one of the known labels is
/// classified as [`Team::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Team {
    Executive,
    Technical,
    Operations,
    Recruitment,
    Marketing,
    Finance,
    Other,
}

impl Team {
    pub const ALL: [Team; 7] = [
        Team::Executive,
        Team::Technical,
        Team::Operations,
        Team::Recruitment,
        Team::Marketing,
        Team::Finance,
        Team::Other,
    ];

    /// Classify a raw team label. Case and surrounding whitespace are ignored.
    pub fn classify(label: &str) -> Team {
        Team::from_label(label).unwrap_or(Team::Other)
    }

    /// Exact (case-insensitive) label lookup; `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Team> {
        let label = label.trim();
        Team::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label))
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::Executive => "Executive",
            Team::Technical => "Technical",
            Team::Operations => "Operations",
            Team::Recruitment => "Recruitment",
            Team::Marketing => "Marketing",
            Team::Finance => "Finance",
            Team::Other => "Other",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Team {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Team {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Team::classify(&label))
    }
}
