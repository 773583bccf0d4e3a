use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use coaching_api::database::{
    init_database,
    repositories::{ClubRepository, MembershipRepository, SeasonRepository, UserRepository},
};
use coaching_api::handlers::{auth, clubs, members, user, users};
use coaching_api::middleware::RequestId;
use coaching_api::{AppState, AuthService, ClubResolver, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Coaching API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("Starting Coaching API server...");

    // Load configuration
    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    // Initialize repositories and services
    let user_repository = UserRepository::new(pool.clone());
    let club_repository = ClubRepository::new(pool.clone());
    let season_repository = SeasonRepository::new(pool.clone());
    let membership_repository = MembershipRepository::new(pool.clone());

    let auth_service = AuthService::new(
        config.clone(),
        user_repository.clone(),
        club_repository.clone(),
    );
    let club_resolver = ClubResolver::new(
        club_repository.clone(),
        membership_repository.clone(),
    );

    let app_state = web::Data::new(AppState { auth_service });
    let user_repo_data = web::Data::new(user_repository);
    let club_repo_data = web::Data::new(club_repository);
    let season_repo_data = web::Data::new(season_repository);
    let membership_repo_data = web::Data::new(membership_repository);
    let club_resolver_data = web::Data::new(club_resolver);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(user_repo_data.clone())
            .app_data(club_repo_data.clone())
            .app_data(season_repo_data.clone())
            .app_data(membership_repo_data.clone())
            .app_data(club_resolver_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_origin)
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(auth::register))
                            .route("/login", web::post().to(auth::login))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/clubs")
                            .route("", web::get().to(clubs::list_clubs))
                            .route("", web::post().to(clubs::create_club))
                            .route("/current", web::get().to(clubs::current_club))
                            .route("/default", web::post().to(user::set_default_club))
                            .route("/{id}", web::get().to(clubs::get_club))
                            .route("/{id}", web::patch().to(clubs::update_club))
                            .route("/{id}", web::delete().to(clubs::delete_club))
                            .route("/{id}/seasons", web::get().to(clubs::list_seasons))
                            .route("/{id}/seasons", web::post().to(clubs::create_season))
                            .route("/{id}/users", web::get().to(members::list_members))
                            .route("/{id}/users", web::post().to(members::add_member))
                            .route(
                                "/{id}/users/{user_id}",
                                web::delete().to(members::remove_member),
                            ),
                    )
                    .service(
                        web::scope("/user")
                            .route("/clubs", web::get().to(user::get_user_clubs))
                            .route("/default-club", web::patch().to(user::set_default_club)),
                    )
                    .service(
                        web::scope("/users")
                            .route("", web::get().to(users::list_users))
                            .route("/{id}", web::patch().to(users::update_user))
                            .route("/{id}", web::delete().to(users::delete_user)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
