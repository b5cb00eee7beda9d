//! Policy handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use core_kernel::PolicyId;
use domain_policy::PolicyQuery;
use validator::Validate;

use crate::dto::policy::*;
use crate::error::{ApiError, POLICY_ID_MISMATCH};
use crate::AppState;

/// Unwraps a JSON body and applies the field rules
fn validated(payload: Result<Json<PolicyRequest>, JsonRejection>) -> Result<PolicyRequest, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(request)
}

/// Reads the numeric id from the path
fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<PolicyId, ApiError> {
    let Path(id) = path?;
    Ok(PolicyId::new(id))
}

/// Lists policies, optionally filtered and sorted
pub async fn list_policies(
    State(state): State<AppState>,
    Query(params): Query<ListPoliciesParams>,
) -> Result<Json<Vec<PolicyResponse>>, ApiError> {
    let query = PolicyQuery::from_params(
        params.search.as_deref(),
        params.policy_type.as_deref(),
        params.sort_by.as_deref(),
    );

    let policies = state.service.list_policies(&query).await?;
    Ok(Json(policies.into_iter().map(PolicyResponse::from).collect()))
}

/// Gets a policy by ID
pub async fn get_policy(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PolicyResponse>, ApiError> {
    state
        .service
        .get_policy(path_id(path)?)
        .await?
        .map(|policy| Json(policy.into()))
        .ok_or_else(ApiError::policy_not_found)
}

/// Creates a policy, answering 201 with its location
pub async fn create_policy(
    State(state): State<AppState>,
    payload: Result<Json<PolicyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = validated(payload)?.into_draft()?;
    let policy = state.service.create_policy(draft).await?;

    let location = format!("/api/policies/{}", policy.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PolicyResponse::from(policy)),
    ))
}

/// Updates the mutable fields of a policy
pub async fn update_policy(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PolicyRequest>, JsonRejection>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let id = path_id(path)?;
    let request = validated(payload)?;
    if request.id.is_some_and(|body_id| body_id != id.value()) {
        return Err(ApiError::BadRequest(POLICY_ID_MISMATCH.to_string()));
    }

    state
        .service
        .update_policy(id, request.into_draft()?)
        .await?
        .map(|policy| Json(policy.into()))
        .ok_or_else(ApiError::policy_not_found)
}

/// Deletes a policy
pub async fn delete_policy(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    if state.service.delete_policy(path_id(path)?).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::policy_not_found())
    }
}
