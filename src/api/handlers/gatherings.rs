//! Gathering request handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::GATHERING_TAG;
use crate::api::dto::{
    AttendeeResponse, CreateGatheringRequest, ErrorResponse, GatheringResponse, IdQuery,
    UpdateGatheringRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// Creates gathering routes.
///
/// Routes:
/// - POST /create      - Create a gathering
/// - GET  /findByID    - Get gathering by id
/// - POST /update      - Overwrite a gathering
/// - POST /deleteByID  - Soft-delete a gathering
/// - GET  /attendees   - Members attending the gathering
pub fn gathering_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_gathering))
        .routes(routes!(find_gathering_by_id))
        .routes(routes!(update_gathering))
        .routes(routes!(delete_gathering_by_id))
        .routes(routes!(gathering_attendees))
}

#[utoipa::path(
    post,
    path = "/create",
    tag = GATHERING_TAG,
    request_body = CreateGatheringRequest,
    responses(
        (status = 201, description = "Gathering created", body = GatheringResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn create_gathering(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateGatheringRequest>,
) -> AppResult<(StatusCode, Json<GatheringResponse>)> {
    let gathering = state
        .services
        .gatherings
        .create_gathering(payload.into_new_gathering())
        .await?;
    Ok((StatusCode::CREATED, Json(GatheringResponse::from(gathering))))
}

#[utoipa::path(
    get,
    path = "/findByID",
    tag = GATHERING_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Gathering found", body = GatheringResponse),
        (status = 404, description = "Gathering not found or deleted", body = ErrorResponse)
    )
)]
async fn find_gathering_by_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<GatheringResponse>> {
    let gathering = state
        .services
        .gatherings
        .find_gathering_by_id(query.id)
        .await?;
    Ok(Json(GatheringResponse::from(gathering)))
}

#[utoipa::path(
    post,
    path = "/update",
    tag = GATHERING_TAG,
    request_body = UpdateGatheringRequest,
    responses(
        (status = 200, description = "Gathering updated", body = GatheringResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Gathering not found or deleted", body = ErrorResponse)
    )
)]
async fn update_gathering(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateGatheringRequest>,
) -> AppResult<Json<GatheringResponse>> {
    let (id, fields) = payload.into_parts();
    let gathering = state
        .services
        .gatherings
        .update_gathering_by_id(id, fields)
        .await?;
    Ok(Json(GatheringResponse::from(gathering)))
}

#[utoipa::path(
    post,
    path = "/deleteByID",
    tag = GATHERING_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Gathering soft-deleted", body = GatheringResponse),
        (status = 404, description = "Gathering not found or already deleted", body = ErrorResponse)
    )
)]
async fn delete_gathering_by_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<GatheringResponse>> {
    let gathering = state
        .services
        .gatherings
        .delete_gathering_by_id(query.id)
        .await?;
    Ok(Json(GatheringResponse::from(gathering)))
}

#[utoipa::path(
    get,
    path = "/attendees",
    tag = GATHERING_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Live attendees of the gathering", body = Vec<AttendeeResponse>),
        (status = 404, description = "Gathering not found or deleted", body = ErrorResponse)
    )
)]
async fn gathering_attendees(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<Vec<AttendeeResponse>>> {
    let attendees = state
        .services
        .invitations
        .attendees_of_gathering(query.id)
        .await?;
    Ok(Json(
        attendees.into_iter().map(AttendeeResponse::from).collect(),
    ))
}
