use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;

use coaching_api::database::models::UserRole;

mod common;

// Admin-only routes must return 403 for an authenticated CLIENT before any
// store access: the gate reads the token role only.
macro_rules! test_forbidden_for_client {
    ($test_name:ident, $method:ident, $uri:expr) => {
        #[actix_web::test]
        #[serial]
        async fn $test_name() {
            let ctx = common::TestContext::new();
            let token = ctx.token_for_role(UserRole::Client);
            let app = test_app!(ctx);

            let req = test::TestRequest::$method()
                .uri($uri)
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }
    };
    ($test_name:ident, $method:ident, $uri:expr, $json:expr) => {
        #[actix_web::test]
        #[serial]
        async fn $test_name() {
            let ctx = common::TestContext::new();
            let token = ctx.token_for_role(UserRole::Client);
            let app = test_app!(ctx);

            let req = test::TestRequest::$method()
                .uri($uri)
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .set_json($json)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }
    };
}

test_forbidden_for_client!(
    create_club_needs_admin,
    post,
    "/api/v1/clubs",
    json!({
        "name": "FC Test",
        "shortName": "FCT",
        "foregroundColor": "#FFFFFF",
        "backgroundColor": "#000000"
    })
);
test_forbidden_for_client!(
    update_club_needs_admin,
    patch,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566",
    json!({ "name": "Renamed" })
);
test_forbidden_for_client!(
    delete_club_needs_admin,
    delete,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);
test_forbidden_for_client!(
    create_season_needs_admin,
    post,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566/seasons",
    json!({ "name": "Season 2026/2027", "startDate": "2026-08-30T00:00:00Z" })
);
test_forbidden_for_client!(
    add_member_needs_admin,
    post,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566/users",
    json!({ "userId": "7b1c9f6e-3a1d-4b6e-9d1c-112233445566", "role": "MEMBER" })
);
test_forbidden_for_client!(
    remove_member_needs_admin,
    delete,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566/users/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);
test_forbidden_for_client!(list_users_needs_admin, get, "/api/v1/users");
test_forbidden_for_client!(
    update_user_needs_admin,
    patch,
    "/api/v1/users/7b1c9f6e-3a1d-4b6e-9d1c-112233445566",
    json!({ "action": "toggleActive" })
);
test_forbidden_for_client!(
    delete_user_needs_admin,
    delete,
    "/api/v1/users/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);

// A COACH global role is not ADMIN either.
#[actix_web::test]
#[serial]
async fn coach_role_is_rejected_on_admin_routes() {
    let ctx = common::TestContext::new();
    let token = ctx.token_for_role(UserRole::Coach);
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
