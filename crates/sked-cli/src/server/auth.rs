//! Single-password sign-in.
//!
//! A successful sign-in returns an HS256 JWT whose `hash` claim is the SHA-256
//! of the configured password. The front-end stores it in the `token` cookie.
//! Changing the password invalidates every token issued before.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use salvo::http::StatusCode;
use salvo::writing::Text;
use salvo::{handler, Depot, Request, Response};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::server::error::{render_json, ApiError, ApiResult};
use crate::server::state::get_config_from_depot;

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    hash: String,
    exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

pub fn password_hash(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub fn create_token(password: &str, secret: &str, ttl_hours: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        hash: password_hash(password),
        exp: Utc::now().timestamp() + ttl_hours * 3600,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// True when `token` is a live token issued for `current_password`.
pub fn validate_token(token: &str, current_password: &str, secret: &str) -> bool {
    let validation = Validation::new(Algorithm::HS256);
    match decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation) {
        Ok(data) => data.claims.hash == password_hash(current_password),
        Err(e) => {
            tracing::debug!(error = %e, "rejected token");
            false
        }
    }
}

/// Rejects requests without a valid token cookie while a password is set.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        let Some(password) = config.password() else {
            return;
        };

        let token = req
            .cookie(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .unwrap_or_default();

        if !validate_token(&token, password, &config.jwt_secret) {
            res.status_code(StatusCode::UNAUTHORIZED);
            res.render(Text::Plain("Authentication required"));
            ctrl.skip_rest();
        }
    }
}

/// POST /api/signin
#[handler]
pub async fn sign_in(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_json(res, sign_in_inner(req, depot).await);
}

async fn sign_in_inner(req: &mut Request, depot: &Depot) -> ApiResult<SignInResponse> {
    let config = get_config_from_depot(depot)?;
    let body: SignInRequest = req
        .parse_json()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password = config
        .password()
        .ok_or(ApiError::BadRequest("authentication is not configured".to_string()))?;

    if body.password != password {
        return Err(ApiError::Unauthorized("wrong password"));
    }

    let token = create_token(password, &config.jwt_secret, config.token_ttl_hours).map_err(|e| {
        tracing::error!(error = ?e, "Failed to sign token");
        ApiError::Invariant("failed to create token")
    })?;

    tracing::info!("user signed in");
    Ok(SignInResponse { token })
}
