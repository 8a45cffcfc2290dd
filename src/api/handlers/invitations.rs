//! Invitation request handlers.
//!
//! Inviting also records the member as an attendee of the gathering, and
//! deleting an invitation soft-deletes that attendee row.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::INVITATION_TAG;
use crate::api::dto::{
    ErrorResponse, IdQuery, InvitationResponse, InviteMemberRequest, UpdateInvitationRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};

pub fn invitation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(invite_member))
        .routes(routes!(find_invitation_by_id))
        .routes(routes!(update_invitation))
        .routes(routes!(delete_invitation_by_id))
}

#[utoipa::path(
    post,
    path = "/invite",
    tag = INVITATION_TAG,
    request_body = InviteMemberRequest,
    responses(
        (status = 201, description = "Member invited and recorded as attendee", body = InvitationResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Member or gathering not found", body = ErrorResponse),
        (status = 500, description = "Storage failure; earlier steps are not undone", body = ErrorResponse)
    )
)]
async fn invite_member(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<InviteMemberRequest>,
) -> AppResult<(StatusCode, Json<InvitationResponse>)> {
    let invitation = state
        .services
        .invitations
        .invite_member_to_gathering(payload.into_new_invitation())
        .await?;
    Ok((StatusCode::CREATED, Json(InvitationResponse::from(invitation))))
}

#[utoipa::path(
    get,
    path = "/findByID",
    tag = INVITATION_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Invitation found", body = InvitationResponse),
        (status = 404, description = "Invitation not found or deleted", body = ErrorResponse)
    )
)]
async fn find_invitation_by_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<InvitationResponse>> {
    let invitation = state
        .services
        .invitations
        .find_invitation_by_id(query.id)
        .await?;
    Ok(Json(InvitationResponse::from(invitation)))
}

#[utoipa::path(
    post,
    path = "/update",
    tag = INVITATION_TAG,
    request_body = UpdateInvitationRequest,
    responses(
        (status = 200, description = "Invitation updated", body = InvitationResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Invitation, member or gathering not found", body = ErrorResponse)
    )
)]
async fn update_invitation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateInvitationRequest>,
) -> AppResult<Json<InvitationResponse>> {
    let (id, fields) = payload.into_parts();
    let invitation = state
        .services
        .invitations
        .update_invitation_by_id(id, fields)
        .await?;
    Ok(Json(InvitationResponse::from(invitation)))
}

#[utoipa::path(
    post,
    path = "/deleteByID",
    tag = INVITATION_TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Invitation and attendee soft-deleted", body = InvitationResponse),
        (status = 404, description = "Invitation not found or already deleted", body = ErrorResponse)
    )
)]
async fn delete_invitation_by_id(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<IdQuery>,
) -> AppResult<Json<InvitationResponse>> {
    let invitation = state
        .services
        .invitations
        .delete_invitation_by_id(query.id)
        .await?;
    Ok(Json(InvitationResponse::from(invitation)))
}
