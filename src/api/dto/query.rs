use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// `?id=` query used by the findByID, deleteByID and listing routes.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Entity identifier
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    #[param(minimum = 1, example = 1234567890)]
    pub id: i64,
}
