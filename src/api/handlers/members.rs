//! Member request handlers.
//!
//! Lookups and deletes take the id from the query string, updates from the
//! body. Deletion is soft and returns the deleted snapshot.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::MEMBER_TAG;
use crate::api::dto::{
    AttendeeResponse, ErrorResponse, IdQuery, MemberResponse, RegisterMemberRequest,
    UpdateMemberRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// Creates member routes.
///
/// Routes:
/// - POST /register      - Register a member
/// - GET  /findByID      - Get member by id
/// - POST /update        - Overwrite a member
/// - POST /deleteByID    - Soft-delete a member
/// - GET  /attendances   - Gatherings the member attends
pub fn member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register_member))
        .routes(routes!(find_member_by_id))
        .routes(routes!(update_member))
        .routes(routes!(delete_member_by_id))
        .routes(routes!(member_attendances))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = MEMBER_TAG,
    request_body = RegisterMemberRequest,
    responses(
        (status = 201, description = "Member registered", body = MemberResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn register_member(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterMemberRequest>,
) -> AppResult<(StatusCode, Json<MemberResponse>)> {
    let member = state
        .services
        .members
        .register(payload.into_new_member())
        .await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

#[utoipa::path(
    get,
    path = "/findByID",
    tag = MEMBER_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Member not found or deleted", body = ErrorResponse)
    )
)]
async fn find_member_by_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<MemberResponse>> {
    let member = state.services.members.find_member_by_id(query.id).await?;
    Ok(Json(MemberResponse::from(member)))
}

#[utoipa::path(
    post,
    path = "/update",
    tag = MEMBER_TAG,
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Member not found or deleted", body = ErrorResponse)
    )
)]
async fn update_member(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateMemberRequest>,
) -> AppResult<Json<MemberResponse>> {
    let (id, fields) = payload.into_parts();
    let member = state
        .services
        .members
        .update_member_by_id(id, fields)
        .await?;
    Ok(Json(MemberResponse::from(member)))
}

#[utoipa::path(
    post,
    path = "/deleteByID",
    tag = MEMBER_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Member soft-deleted", body = MemberResponse),
        (status = 404, description = "Member not found or already deleted", body = ErrorResponse)
    )
)]
async fn delete_member_by_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<MemberResponse>> {
    let member = state.services.members.delete_member_by_id(query.id).await?;
    Ok(Json(MemberResponse::from(member)))
}

#[utoipa::path(
    get,
    path = "/attendances",
    tag = MEMBER_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Live attendances of the member", body = Vec<AttendeeResponse>),
        (status = 404, description = "Member not found or deleted", body = ErrorResponse)
    )
)]
async fn member_attendances(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<Vec<AttendeeResponse>>> {
    let attendees = state
        .services
        .invitations
        .gatherings_of_member(query.id)
        .await?;
    Ok(Json(
        attendees.into_iter().map(AttendeeResponse::from).collect(),
    ))
}
