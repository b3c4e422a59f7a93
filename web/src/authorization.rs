/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use anyhow::Context;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::Response;
use axum::middleware::Next;
use chrono::{Duration, Utc};
use core::input::load_secret;
use core::types::*;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
}

/// Validates the request token and attaches the requesting user to the
/// request. Every route registered behind this middleware can rely on a
/// `MUser` extension being present.
pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> WebResult<Response<Body>> {
    let auth_header = match req.headers().get(axum::http::header::AUTHORIZATION) {
        Some(header) => header
            .to_str()
            .map_err(|_| WebError::Unauthorized("Invalid Authorization header".to_string()))?,
        None => {
            return Err(WebError::Unauthorized(
                "Authorization header not found".to_string(),
            ));
        }
    };

    // Clients send the token either verbatim or with the conventional
    // "Bearer " prefix; both are accepted.
    let token = auth_header
        .strip_prefix("Bearer ")
        .unwrap_or(auth_header)
        .trim();

    if token.is_empty() {
        return Err(WebError::Unauthorized(
            "Missing authorization token".to_string(),
        ));
    }

    let token_data = decode_jwt(state.clone(), token)
        .map_err(|_| WebError::Unauthorized("Unable to decode token".to_string()))?;

    let current_user = match EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await?
    {
        Some(user) => user,
        None => return Err(WebError::Unauthorized("User not found".to_string())),
    };

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

pub fn encode_jwt(state: State<Arc<ServerState>>, id: Uuid) -> WebResult<String> {
    let secret = load_secret(&state.cli.jwt_secret_file);

    if secret.is_empty() {
        return Err(WebError::InternalServerError(
            "JWT secret not configured".to_string(),
        ));
    }

    encode_token(secret.as_bytes(), id, state.cli.jwt_expiry_hours)
        .map_err(|_| WebError::failed_to_generate_token())
}

pub fn decode_jwt(
    state: State<Arc<ServerState>>,
    jwt: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    let secret = load_secret(&state.cli.jwt_secret_file);

    decode_token(secret.as_bytes(), jwt)
}

/// Pure function of (secret, user id, lifetime) to a signed token; holds no
/// server-side session state.
pub fn encode_token(
    secret: &[u8],
    id: Uuid,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = (now + Duration::hours(expiry_hours)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = Claims { exp, iat, id };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token(
    secret: &[u8],
    jwt: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    decode(
        jwt,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
}

pub async fn update_last_login(state: State<Arc<ServerState>>, user: MUser) -> WebResult<MUser> {
    let mut auser: AUser = user.into();

    auser.last_login_at = Set(Utc::now().naive_utc());
    Ok(auser
        .update(&state.db)
        .await
        .context("Failed to update user last login")?)
}
