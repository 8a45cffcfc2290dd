use utoipa::OpenApi;

pub const MEMBER_TAG: &str = "Member";
pub const GATHERING_TAG: &str = "Gathering";
pub const INVITATION_TAG: &str = "Invitation";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gathering",
        description = "Members, gatherings and invitations to them",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = MEMBER_TAG, description = "Member registration and lookup"),
        (name = GATHERING_TAG, description = "Gathering scheduling"),
        (name = INVITATION_TAG, description = "Invitations; inviting also records attendance"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
