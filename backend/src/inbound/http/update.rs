//! Administrative rating writes.
//!
//! ```text
//! POST /update?username=Pro_Player_1&rating=4200
//! ```
//!
//! Unknown usernames are created, so this endpoint never answers 404.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, MemberId, MemberIdValidationError, Rating, RatingValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Raw query string of `POST /update`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateParams {
    pub username: Option<String>,
    pub rating: Option<String>,
}

/// Acknowledgement returned by `POST /update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateResult {
    #[schema(example = "updated")]
    pub status: String,
}

impl UpdateResult {
    fn updated() -> Self {
        Self {
            status: "updated".to_owned(),
        }
    }
}

fn map_member_id_error(err: MemberIdValidationError) -> Error {
    match err {
        MemberIdValidationError::Empty => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "username", "code": "empty_username" })),
    }
}

fn map_rating_error(err: RatingValidationError) -> Error {
    let code = match &err {
        RatingValidationError::NotAnInteger { .. } => "invalid_rating",
        RatingValidationError::OutOfRange { .. } => "rating_out_of_range",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "rating", "code": code }))
}

/// Set a member's rating, creating the member when unknown.
#[utoipa::path(
    post,
    path = "/update",
    params(
        ("username" = String, Query, description = "Member to update or create"),
        ("rating" = String, Query, description = "Integer rating between 100 and 5000")
    ),
    responses(
        (status = 200, description = "Rating stored", body = UpdateResult),
        (status = 400, description = "Invalid username or rating", body = Error),
        (status = 503, description = "Score index unavailable", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "updateRating"
)]
#[post("/update")]
pub async fn update_rating(
    state: web::Data<HttpState>,
    params: web::Query<UpdateParams>,
) -> ApiResult<web::Json<UpdateResult>> {
    let UpdateParams { username, rating } = params.into_inner();
    let id = MemberId::new(username.unwrap_or_default()).map_err(map_member_id_error)?;
    let rating = Rating::parse(rating.as_deref().unwrap_or_default()).map_err(map_rating_error)?;

    let update = state.ratings.set_rating(id, rating).await?;
    info!(member = %update.id, rating = %update.rating, "rating set via API");
    Ok(web::Json(UpdateResult::updated()))
}
