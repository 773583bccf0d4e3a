use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serial_test::serial;

mod common;

// Every club-scoped or admin route must reject a request without a token
// before any store access happens.
macro_rules! test_unauthorized {
    ($test_name:ident, $method:ident, $uri:expr) => {
        #[actix_web::test]
        #[serial]
        async fn $test_name() {
            let ctx = common::TestContext::new();
            let app = test_app!(ctx);

            let req = test::TestRequest::$method().uri($uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    };
}

test_unauthorized!(me_requires_token, get, "/api/v1/auth/me");
test_unauthorized!(list_clubs_requires_token, get, "/api/v1/clubs");
test_unauthorized!(
    current_club_requires_token,
    get,
    "/api/v1/clubs/current"
);
test_unauthorized!(
    get_club_requires_token,
    get,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);
test_unauthorized!(
    delete_club_requires_token,
    delete,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);
test_unauthorized!(
    list_seasons_requires_token,
    get,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566/seasons"
);
test_unauthorized!(
    list_members_requires_token,
    get,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566/users"
);
test_unauthorized!(
    remove_member_requires_token,
    delete,
    "/api/v1/clubs/7b1c9f6e-3a1d-4b6e-9d1c-112233445566/users/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);
test_unauthorized!(user_clubs_requires_token, get, "/api/v1/user/clubs");
test_unauthorized!(list_users_requires_token, get, "/api/v1/users");
test_unauthorized!(
    delete_user_requires_token,
    delete,
    "/api/v1/users/7b1c9f6e-3a1d-4b6e-9d1c-112233445566"
);

#[actix_web::test]
#[serial]
async fn garbage_token_is_rejected() {
    let ctx = common::TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn token_signed_with_wrong_secret_is_rejected() {
    let ctx = common::TestContext::new();

    // Token minted under a different secret
    let mut other_config = common::test_config();
    other_config.jwt_secret = "some-entirely-different-secret-material".to_string();
    let other_ctx = common::TestContext::new();
    let foreign_token = {
        use coaching_api::database::models::{User, UserRole};
        let service = coaching_api::AuthService::new(
            other_config,
            coaching_api::database::repositories::UserRepository::new(other_ctx.pool.clone()),
            coaching_api::database::repositories::ClubRepository::new(other_ctx.pool.clone()),
        );
        let user = User::new(
            "x@y.com".to_string(),
            "hash".to_string(),
            "X".to_string(),
            UserRole::Admin,
        );
        service.generate_token(&user).unwrap()
    };

    let app = test_app!(ctx);
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", foreign_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
