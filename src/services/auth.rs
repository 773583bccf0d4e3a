use actix_web::{
    dev::Payload, error::ErrorUnauthorized, web::Data, Error as ActixError, FromRequest,
    HttpRequest,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::Config;
use crate::database::models::{AuthResponse, LoginInput, RegisterInput, User, UserRole};
use crate::database::repositories::{ClubRepository, UserRepository};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    pub role: UserRole,
    pub default_club_id: Option<Uuid>,
    pub exp: usize, // expiration time
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Global-role gate: club administration, user administration and the
    /// all-clubs listing are ADMIN only.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Administrator role required".to_string(),
            ))
        }
    }

    /// Decode and validate a bearer token. Any decode failure (bad
    /// signature, expired, malformed) collapses to Unauthorized.
    pub fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::Unauthorized)?;

        Ok(token_data.claims)
    }
}

impl FromRequest for Claims {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth_header = req.headers().get("Authorization");

        if let Some(auth_header) = auth_header {
            if let Ok(auth_str) = auth_header.to_str() {
                if let Some(token) = auth_str.strip_prefix("Bearer ") {
                    // Get the config from app data
                    if let Some(config) = req.app_data::<Data<Config>>() {
                        return match Claims::from_token(token, &config.jwt_secret) {
                            Ok(claims) => ready(Ok(claims)),
                            Err(_) => ready(Err(ErrorUnauthorized("Invalid token"))),
                        };
                    }
                }
            }
        }

        ready(Err(ErrorUnauthorized(
            "Missing or invalid authorization header",
        )))
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    club_repository: ClubRepository,
    config: Config,
}

impl AuthService {
    pub fn new(
        config: Config,
        user_repository: UserRepository,
        club_repository: ClubRepository,
    ) -> Self {
        Self {
            user_repository,
            club_repository,
            config,
        }
    }

    pub async fn register(&self, request: RegisterInput) -> Result<AuthResponse, AppError> {
        request.validate()?;

        if self.user_repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)?;

        let user = User::new(
            request.email,
            password_hash,
            request.name,
            request.role.unwrap_or_default(),
        );

        self.user_repository.create_user(&user).await?;

        let token = self.generate_token(&user)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
            default_club: None, // No club membership yet on registration
        })
    }

    pub async fn login(&self, request: LoginInput) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        if !user.active {
            return Err(AppError::Forbidden(
                "Account not activated. Contact administrator.".to_string(),
            ));
        }

        // The stored default is a weak reference; the club may be gone.
        let default_club = match user.default_club_id {
            Some(club_id) => self.club_repository.find_by_id(club_id).await?,
            None => None,
        };

        let token = self.generate_token(&user)?;

        Ok(AuthResponse {
            token,
            user: user.into(),
            default_club,
        })
    }

    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::days(self.config.jwt_expiration_days))
            .ok_or_else(|| {
                AppError::internal_server_error_message("Token expiration out of range")
            })?
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            default_club_id: user.default_club_id,
            exp: expiration,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    const SECRET: &str = "test-jwt-secret-key-that-is-long-enough";

    fn service() -> AuthService {
        let config = Config {
            database_url: "postgres://localhost:1/unused".to_string(),
            jwt_secret: SECRET.to_string(),
            jwt_expiration_days: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            client_origin: "http://localhost:3000".to_string(),
        };
        // Lazy pool: token tests never touch the database
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        AuthService::new(
            config,
            UserRepository::new(pool.clone()),
            ClubRepository::new(pool),
        )
    }

    #[tokio::test]
    async fn token_round_trips_claims() {
        let service = service();
        let user = User::new(
            "coach@example.com".to_string(),
            "hash".to_string(),
            "Coach".to_string(),
            UserRole::Coach,
        );

        let token = service.generate_token(&user).unwrap();
        let claims = Claims::from_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Coach);
        assert_eq!(claims.default_club_id, None);
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let service = service();
        let user = User::new(
            "a@b.com".to_string(),
            "hash".to_string(),
            "A".to_string(),
            UserRole::Client,
        );

        let mut token = service.generate_token(&user).unwrap();
        token.push('x');
        assert!(matches!(
            Claims::from_token(&token, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn admin_gate_rejects_non_admin_roles() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "c@d.com".to_string(),
            role: UserRole::Client,
            default_club_id: None,
            exp: 0,
        };
        assert!(matches!(
            claims.require_admin(),
            Err(AppError::Forbidden(_))
        ));

        let claims = Claims {
            role: UserRole::Admin,
            ..claims
        };
        assert!(claims.require_admin().is_ok());
    }
}
