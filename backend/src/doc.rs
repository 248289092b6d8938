//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler of the inbound layer together with
//! the response DTOs and the error payload. Swagger UI serves it at `/docs`
//! in debug builds and `openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::leaderboard::{LeaderboardEntry, LeaderboardResponse};
use crate::inbound::http::update::UpdateResult;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leaderboard API",
        description = "Ranked, searchable and live-updating leaderboard with competition ranking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::leaderboard::root,
        crate::inbound::http::leaderboard::get_leaderboard,
        crate::inbound::http::update::update_rating,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(LeaderboardEntry, LeaderboardResponse, UpdateResult, Error, ErrorCode)),
    tags(
        (name = "leaderboard", description = "Ranked listing, search and rating writes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/leaderboard")]
    #[case("/update")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("LeaderboardResponse", &["users", "total"])]
    #[case("LeaderboardEntry", &["username", "rating", "rank"])]
    #[case("UpdateResult", &["status"])]
    #[case("Error", &["code", "message", "traceId"])]
    fn response_schemas_have_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }
}
