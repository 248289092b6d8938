//! Leaderboard read endpoints.
//!
//! ```text
//! GET /
//! GET /leaderboard?page=2&limit=25
//! GET /leaderboard?q=pro
//! ```
//!
//! Query parameters are read as raw strings so malformed `page` or `limit`
//! values fall back to their defaults instead of failing extraction. When a
//! key repeats, its first value wins.

use actix_web::{HttpRequest, HttpResponse, get, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::LeaderboardRequest;
use crate::domain::{Error, LeaderboardPage, RankedMember, SearchQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Raw query string of `GET /leaderboard`.
#[derive(Debug, Default)]
pub struct LeaderboardParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub q: Option<String>,
}

impl LeaderboardParams {
    /// Read `page`, `limit` and `q` from a raw query string.
    ///
    /// Unknown keys are ignored and an undecodable string yields no
    /// parameters at all.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::leaderboard::LeaderboardParams;
    ///
    /// let params = LeaderboardParams::from_query_string("page=1&page=2&q=pro");
    /// assert_eq!(params.page.as_deref(), Some("1"));
    /// assert_eq!(params.q.as_deref(), Some("pro"));
    /// ```
    pub fn from_query_string(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(web::Query::<Vec<(String, String)>>::into_inner)
            .unwrap_or_default();
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "q" => &mut params.q,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    fn into_request(self, max_items: u64) -> LeaderboardRequest {
        let page = PageRequest::from_query(self.page.as_deref(), self.limit.as_deref())
            .with_max_items(max_items);
        match self.q.as_deref().and_then(SearchQuery::new) {
            Some(query) => LeaderboardRequest::search(page, query),
            None => LeaderboardRequest::listing(page),
        }
    }
}

/// One ranked row of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    #[schema(example = "Pro_Player_1")]
    pub username: String,
    #[schema(example = 4990)]
    pub rating: i64,
    /// Competition rank: tied ratings share a rank.
    #[schema(example = 3)]
    pub rank: u64,
}

impl From<RankedMember> for LeaderboardEntry {
    fn from(member: RankedMember) -> Self {
        Self {
            username: member.id.into(),
            rating: member.score,
            rank: member.rank,
        }
    }
}

/// Response body of `GET /leaderboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub users: Vec<LeaderboardEntry>,
    /// Size of the full ordering, or of the match set when searching.
    pub total: u64,
}

impl From<LeaderboardPage> for LeaderboardResponse {
    fn from(page: LeaderboardPage) -> Self {
        let (items, total) = page.into_parts();
        Self {
            users: items.into_iter().map(LeaderboardEntry::from).collect(),
            total,
        }
    }
}

/// Trivial liveness text kept for clients that poll the root path.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Server is running", body = String)),
    tags = ["leaderboard"],
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Backend is running\n")
}

/// List or search the leaderboard.
///
/// A non-empty `q` switches to substring search; `total` then counts the
/// matches. Ranks always refer to the full leaderboard.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::leaderboard::get_leaderboard;
///
/// let app = App::new().service(get_leaderboard);
/// ```
#[utoipa::path(
    get,
    path = "/leaderboard",
    params(
        ("page" = Option<String>, Query, description = "1-based page; defaults to 1 when missing or invalid"),
        ("limit" = Option<String>, Query, description = "Page size; defaults to 50 when missing or invalid. The server may return fewer rows than asked"),
        ("q" = Option<String>, Query, description = "Case-insensitive username substring")
    ),
    responses(
        (status = 200, description = "Ranked page", body = LeaderboardResponse),
        (status = 503, description = "Score index unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["leaderboard"],
    operation_id = "getLeaderboard"
)]
#[get("/leaderboard")]
pub async fn get_leaderboard(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<LeaderboardResponse>> {
    let params = LeaderboardParams::from_query_string(req.query_string());
    let request = params.into_request(state.max_page_limit());
    let page = state.leaderboard.leaderboard(request).await?;
    Ok(web::Json(LeaderboardResponse::from(page)))
}

#[cfg(test)]
#[path = "leaderboard_tests.rs"]
mod tests;
