use serial_test::serial;

use coaching_api::database::models::{User, UserRole};
use coaching_api::database::repositories::{ClubRepository, MembershipRepository};
use coaching_api::services::{ClubResolver, ResolvedClub};

mod common;

fn resolver(ctx: &common::TestContext) -> ClubResolver {
    ClubResolver::new(
        ClubRepository::new(ctx.pool.clone()),
        MembershipRepository::new(ctx.pool.clone()),
    )
}

fn user(role: UserRole) -> User {
    User::new(
        "u@example.com".to_string(),
        "hash".to_string(),
        "U".to_string(),
        role,
    )
}

// Resolution swallows store failures step by step instead of erroring, so
// with an unreachable store every step misses and only the terminal state
// differs by global role.

#[actix_web::test]
#[serial]
async fn non_admin_degrades_to_no_access_when_every_lookup_fails() {
    let ctx = common::TestContext::new();
    let resolver = resolver(&ctx);

    let mut client = user(UserRole::Client);
    client.default_club_id = Some(uuid::Uuid::new_v4());

    let resolved = resolver
        .resolve(&client, Some(uuid::Uuid::new_v4()))
        .await;

    assert!(matches!(resolved, ResolvedClub::NoAccess));
}

#[actix_web::test]
#[serial]
async fn admin_without_club_context_is_none_selected_not_no_access() {
    let ctx = common::TestContext::new();
    let resolver = resolver(&ctx);

    let admin = user(UserRole::Admin);

    let resolved = resolver.resolve(&admin, None).await;

    assert!(matches!(resolved, ResolvedClub::NoneSelected));
}
