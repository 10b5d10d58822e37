use std::collections::HashSet;

use thiserror::Error;

use crate::builder::HierarchyBuilder;
use crate::model::{Employee, HierarchyNode};
use crate::policy::PlacementPolicy;
use crate::summary::{summarize, OrgSummary};

/// Org module error type.
#[derive(Debug, Error)]
pub enum OrgError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("upstream: {0}")]
    Upstream(String),
}

impl From<OrgError> for orgchart_core::ServiceError {
    fn from(e: OrgError) -> Self {
        match e {
            OrgError::Validation(m) => orgchart_core::ServiceError::Validation(m),
            OrgError::Upstream(m) => orgchart_core::ServiceError::Upstream(m),
        }
    }
}

/// The org service. Holds the placement policy; otherwise stateless, so
/// every call rebuilds from the roster it is given.
pub struct OrgService {
    policy: PlacementPolicy,
}

impl OrgService {
    pub fn new(policy: PlacementPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PlacementPolicy {
        &self.policy
    }

    /// Build the org chart. `Ok(None)` when the roster has no root.
    pub fn hierarchy(&self, employees: &[Employee]) -> Result<Option<HierarchyNode>, OrgError> {
        check_unique_ids(employees)?;
        Ok(HierarchyBuilder::new(&self.policy).build(employees))
    }

    pub fn summary(&self, employees: &[Employee]) -> Result<OrgSummary, OrgError> {
        check_unique_ids(employees)?;
        Ok(summarize(employees, &self.policy))
    }
}

/// Employee ids must be unique within one roster.
pub fn check_unique_ids(employees: &[Employee]) -> Result<(), OrgError> {
    let mut seen = HashSet::new();
    for e in employees {
        if !seen.insert(e.id.as_str()) {
            return Err(OrgError::Validation(format!(
                "duplicate employee id '{}'",
                e.id
            )));
        }
    }
    Ok(())
}
