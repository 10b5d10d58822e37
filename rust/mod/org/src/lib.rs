//! Org module: turns the portal's flat employee directory into the org
//! chart tree its chart widget renders.
//!
//! # Pieces
//!
//! - **model**: employee records, teams, and the `{name, data, children}` tree
//! - **policy**: the placement rules table (role tiers, team heads, bench, colors)
//! - **builder**: the pure list -> tree transform
//! - **summary**: dashboard headcount figures
//! - **roster**: decoding the directory's listing payload
//! - **api**: HTTP routes under `/org`
//!
//! # Usage
//!
//! ```ignore
//! use org::{build_hierarchy, PlacementPolicy};
//!
//! let tree = build_hierarchy(&employees, &PlacementPolicy::default());
//! ```

pub mod api;
pub mod builder;
pub mod model;
pub mod policy;
pub mod roster;
pub mod service;
pub mod summary;

use std::sync::Arc;

use axum::Router;

use orgchart_core::Module;

pub use builder::{build_hierarchy, HierarchyBuilder};
pub use model::{Employee, HierarchyNode, Team};
pub use policy::PlacementPolicy;
pub use roster::parse_roster;
pub use service::{OrgError, OrgService};
pub use summary::{summarize, OrgSummary};

/// Org module implementing the Module trait.
pub struct OrgModule {
    service: Arc<OrgService>,
}

impl OrgModule {
    pub fn new(policy: PlacementPolicy) -> Self {
        Self {
            service: Arc::new(OrgService::new(policy)),
        }
    }

    pub fn service(&self) -> &Arc<OrgService> {
        &self.service
    }
}

impl Module for OrgModule {
    fn name(&self) -> &str {
        "org"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
