//! Tests for leaderboard read handlers.

use super::*;
use crate::domain::Error;
use crate::domain::ports::{LeaderboardQuery, MockLeaderboardQuery};
use crate::inbound::http::state::HttpStatePorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use pagination::{DEFAULT_LIMIT, PageWindow, Paginated};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

fn state_with(leaderboard: Arc<dyn LeaderboardQuery>) -> HttpState {
    HttpState::new(HttpStatePorts {
        leaderboard,
        ..HttpStatePorts::fixtures()
    })
}

async fn get_json(state: HttpState, uri: &str) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(root)
            .service(get_leaderboard),
    )
    .await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn usernames(value: &Value) -> Vec<String> {
    value["users"]
        .as_array()
        .expect("users array")
        .iter()
        .filter_map(|user| user["username"].as_str().map(str::to_owned))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn root_reports_running() {
    let app = actix_test::init_service(App::new().service(root)).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), b"Backend is running\n");
}

#[rstest]
#[actix_web::test]
async fn listing_returns_users_and_total() {
    let state = HttpState::from(HttpStatePorts::fixtures());
    let (status, body) = get_json(state, "/leaderboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(
        body["users"][0],
        serde_json::json!({ "username": "Legendary_Player_1", "rating": 5000, "rank": 1 })
    );
    let ranks: Vec<_> = body["users"]
        .as_array()
        .expect("users array")
        .iter()
        .filter_map(|user| user["rank"].as_u64())
        .collect();
    assert_eq!(ranks, [1, 2, 3, 3]);
}

#[rstest]
#[case("/leaderboard?page=2&limit=1", &["Master_Gamer_2"])]
#[case("/leaderboard?page=abc&limit=-3", &["Legendary_Player_1", "Master_Gamer_2", "Pro_Player_1", "Pro_Player_2"])]
#[case("/leaderboard?page=9&limit=2", &[])]
#[case("/leaderboard?q=PRO_", &["Pro_Player_1", "Pro_Player_2"])]
#[case("/leaderboard?q=", &["Legendary_Player_1", "Master_Gamer_2", "Pro_Player_1", "Pro_Player_2"])]
#[case("/leaderboard?q=%20%20", &[])]
#[case("/leaderboard?page=1&page=2&limit=1&limit=3", &["Legendary_Player_1"])]
#[case("/leaderboard?page=2&limit=1&page=x", &["Master_Gamer_2"])]
#[actix_web::test]
async fn query_parameters_shape_the_page(#[case] uri: &str, #[case] expected: &[&str]) {
    let (status, body) = get_json(HttpState::from(HttpStatePorts::fixtures()), uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&body), expected);
}

#[rstest]
#[actix_web::test]
async fn state_caps_rows_but_not_the_offset() {
    let mut query = MockLeaderboardQuery::new();
    query
        .expect_leaderboard()
        .withf(|request| {
            request.page.limit() == 5000
                && request.page.page_size() == 10
                && request.page.window() == PageWindow { start: 10_000, stop: 10_009 }
                && request.query.is_none()
        })
        .times(1)
        .returning(|_| Ok(Paginated::empty(0)));
    let state = state_with(Arc::new(query)).with_max_page_limit(10);

    let (status, body) = get_json(state, "/leaderboard?page=3&limit=5000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "users": [], "total": 0 }));
}

#[rstest]
#[actix_web::test]
async fn search_terms_reach_the_port_untrimmed() {
    let mut query = MockLeaderboardQuery::new();
    query
        .expect_leaderboard()
        .withf(|request| {
            request.page.limit() == DEFAULT_LIMIT
                && request.query.as_ref().map(SearchQuery::as_str) == Some(" gamer ")
        })
        .times(1)
        .returning(|_| Ok(Paginated::empty(0)));

    let (status, _) = get_json(state_with(Arc::new(query)), "/leaderboard?q=%20gamer%20").await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn index_outage_maps_to_service_unavailable() {
    let mut query = MockLeaderboardQuery::new();
    query
        .expect_leaderboard()
        .times(1)
        .returning(|_| Err(Error::service_unavailable("leaderboard index unavailable")));

    let (status, body) = get_json(state_with(Arc::new(query)), "/leaderboard").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[actix_web::test]
async fn repeated_keys_do_not_reject_the_request() {
    let (status, body) = get_json(
        HttpState::from(HttpStatePorts::fixtures()),
        "/leaderboard?page=1&page=2&q=pro&q=gamer",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&body), ["Pro_Player_1", "Pro_Player_2"]);
}

#[rstest]
#[case("", None, None, None)]
#[case("page=3&limit=7", Some("3"), Some("7"), None)]
#[case("q=a%20b&other=1&q=c", None, None, Some("a b"))]
#[case("page=%ZZ", None, None, None)]
fn params_keep_the_first_value_per_key(
    #[case] raw: &str,
    #[case] page: Option<&str>,
    #[case] limit: Option<&str>,
    #[case] q: Option<&str>,
) {
    let params = LeaderboardParams::from_query_string(raw);
    assert_eq!(params.page.as_deref(), page);
    assert_eq!(params.limit.as_deref(), limit);
    assert_eq!(params.q.as_deref(), q);
}
