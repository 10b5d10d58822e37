use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use orgchart_core::ServiceError;

use crate::api::AppState;
use crate::model::{Employee, HierarchyNode, TreeStats};
use crate::policy::PlacementPolicy;
use crate::summary::OrgSummary;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hierarchy", post(build_hierarchy))
        .route("/summary", post(summary))
        .route("/policy", get(policy))
}

#[derive(Debug, Serialize)]
struct HierarchyResponse {
    /// `null` when the roster has no root employee.
    tree: Option<HierarchyNode>,
    stats: Option<TreeStats>,
}

async fn build_hierarchy(
    State(svc): State<AppState>,
    Json(employees): Json<Vec<Employee>>,
) -> Result<Json<HierarchyResponse>, ServiceError> {
    let tree = svc.hierarchy(&employees).map_err(ServiceError::from)?;
    let stats = tree.as_ref().map(HierarchyNode::stats);
    Ok(Json(HierarchyResponse { tree, stats }))
}

async fn summary(
    State(svc): State<AppState>,
    Json(employees): Json<Vec<Employee>>,
) -> Result<Json<OrgSummary>, ServiceError> {
    let summary = svc.summary(&employees).map_err(ServiceError::from)?;
    Ok(Json(summary))
}

async fn policy(State(svc): State<AppState>) -> Json<PlacementPolicy> {
    Json(svc.policy().clone())
}
