use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use models::subscription::Model;
use service::errors::ServiceError;
use service::subscription::domain::{CreateSubscriptionInput, SubscriptionFilter, UpdateSubscriptionInput};

use crate::{errors::JsonApiError, state::ServerState};

const INVALID_JSON: &str = "invalid JSON payload";
const INVALID_DATA: &str = "invalid subscription data";

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact user id
    pub user_id: Option<String>,
    /// Exact service name
    pub service_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Exact user id
    pub user_id: Option<String>,
    /// Exact service name
    pub service_name: Option<String>,
    /// First month included, `YYYY-MM`
    pub start: Option<String>,
    /// Last month included, `YYYY-MM`
    pub end: Option<String>,
}

impl From<ListQuery> for SubscriptionFilter {
    fn from(q: ListQuery) -> Self {
        SubscriptionFilter { user_id: q.user_id, service_name: q.service_name, start: None, end: None }
    }
}

impl From<SummaryQuery> for SubscriptionFilter {
    fn from(q: SummaryQuery) -> Self {
        SubscriptionFilter { user_id: q.user_id, service_name: q.service_name, start: q.start, end: q.end }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SummaryOutput { pub total: i64 }

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageOutput { pub message: String }

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    payload.map(|Json(v)| v).map_err(|e| {
        warn!(err = %e, "json decode failed");
        JsonApiError::bad_request(INVALID_JSON)
    })
}

#[utoipa::path(
    post, path = "/subscriptions", tag = "subscriptions",
    request_body = crate::openapi::CreateSubscriptionDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SubscriptionDoc),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateSubscriptionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Model>), JsonApiError> {
    info!("POST /subscriptions");
    let input = decode(payload)?;
    match state.subscriptions.create(input).await {
        Ok(m) => { info!(id = %m.id, start_date = %m.start_date, "created subscription"); Ok((StatusCode::CREATED, Json(m))) }
        Err(e) if e.is_client_error() => { warn!(err = %e, "rejected subscription"); Err(JsonApiError::bad_request(INVALID_DATA)) }
        Err(e) => { error!(err = %e, "create subscription failed"); Err(JsonApiError::internal("failed to save subscription")) }
    }
}

#[utoipa::path(
    get, path = "/subscriptions", tag = "subscriptions",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::SubscriptionDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<Model>>, JsonApiError> {
    let filter = SubscriptionFilter::from(q);
    match state.subscriptions.list(&filter).await {
        Ok(list) => { info!(count = list.len(), "list subscriptions"); Ok(Json(list)) }
        Err(e) => { error!(err = %e, "list subscriptions failed"); Err(JsonApiError::internal("failed to fetch subscriptions")) }
    }
}

/// Any lookup failure is reported as not found.
#[utoipa::path(
    get, path = "/subscriptions/{id}", tag = "subscriptions",
    params(("id" = String, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SubscriptionDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Model>, JsonApiError> {
    match state.subscriptions.get(&id).await {
        Ok(Some(m)) => { info!(id = %m.id, "found subscription"); Ok(Json(m)) }
        Ok(None) => { warn!(id = %id, "subscription not found"); Err(JsonApiError::not_found()) }
        Err(e) => { error!(id = %id, err = %e, "get subscription failed"); Err(JsonApiError::not_found()) }
    }
}

#[utoipa::path(
    put, path = "/subscriptions/{id}", tag = "subscriptions",
    params(("id" = String, Path, description = "Subscription ID")),
    request_body = crate::openapi::UpdateSubscriptionDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SubscriptionDoc),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSubscriptionInput>, JsonRejection>,
) -> Result<Json<Model>, JsonApiError> {
    info!(id = %id, "PUT /subscriptions/:id");
    let input = decode(payload)?;
    match state.subscriptions.update(&id, input).await {
        Ok(m) => { info!(id = %m.id, "updated subscription"); Ok(Json(m)) }
        Err(ServiceError::NotFound(_)) => { warn!(id = %id, "subscription not found for update"); Err(JsonApiError::not_found()) }
        Err(e) if e.is_client_error() => { warn!(err = %e, "rejected subscription update"); Err(JsonApiError::bad_request(INVALID_DATA)) }
        Err(e) => { error!(id = %id, err = %e, "update subscription failed"); Err(JsonApiError::internal("failed to update subscription")) }
    }
}

#[utoipa::path(
    delete, path = "/subscriptions/{id}", tag = "subscriptions",
    params(("id" = String, Path, description = "Subscription ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageOutput),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<MessageOutput>, JsonApiError> {
    match state.subscriptions.delete(&id).await {
        Ok(true) => { info!(id = %id, "deleted subscription"); Ok(Json(MessageOutput { message: "subscription deleted".into() })) }
        Ok(false) => { warn!(id = %id, "subscription not found for delete"); Err(JsonApiError::not_found()) }
        Err(e) => { error!(id = %id, err = %e, "delete subscription failed"); Err(JsonApiError::internal("failed to delete subscription")) }
    }
}

#[utoipa::path(
    get, path = "/subscriptions/summary", tag = "subscriptions",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Total price", body = SummaryOutput),
        (status = 500, description = "Summary Failed")
    )
)]
pub async fn summary(State(state): State<ServerState>, Query(q): Query<SummaryQuery>) -> Result<Json<SummaryOutput>, JsonApiError> {
    let filter = SubscriptionFilter::from(q);
    match state.subscriptions.summary(&filter).await {
        Ok(total) => { info!(total, "subscription summary"); Ok(Json(SummaryOutput { total })) }
        Err(e) => { error!(err = %e, "summary failed"); Err(JsonApiError::internal("failed to calculate total")) }
    }
}
