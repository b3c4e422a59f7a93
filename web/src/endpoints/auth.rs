/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::{encode_jwt, update_last_login};
use crate::error::{WebError, WebResult};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use core::consts::*;
use core::input::{validate_password, validate_username};
use core::types::*;
use email_address::EmailAddress;
use password_auth::{generate_hash, verify_password};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUserRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub token: String,
    pub email: String,
    pub username: String,
}

pub async fn post_signup(
    state: State<Arc<ServerState>>,
    body: Result<Json<MakeUserRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<BaseResponse<SignupResponse>>)> {
    let Json(body) = body?;

    if state.cli.disable_registration {
        return Err(WebError::registration_disabled());
    }

    validate_username(&body.username).map_err(WebError::BadRequest)?;
    validate_password(&body.password).map_err(WebError::BadRequest)?;

    if !EmailAddress::is_valid(body.email.as_str()) {
        return Err(WebError::invalid_email());
    }

    let existing_user = EUser::find()
        .filter(CUser::Email.eq(body.email.clone()))
        .one(&state.db)
        .await?;

    if existing_user.is_some() {
        return Err(WebError::already_exists("User"));
    }

    let user = AUser {
        id: Set(Uuid::new_v4()),
        username: Set(body.username.clone()),
        email: Set(body.email.clone()),
        password: Set(generate_hash(body.password.as_str())),
        last_login_at: Set(*NULL_TIME),
        created_at: Set(Utc::now().naive_utc()),
    };

    let user = user.insert(&state.db).await?;

    tracing::info!(user = %user.id, "new user registered");

    let res = BaseResponse {
        error: false,
        message: SignupResponse { user_id: user.id },
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn post_signin(
    state: State<Arc<ServerState>>,
    body: Result<Json<MakeLoginRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<SessionResponse>>> {
    let Json(body) = body?;

    // Unknown email and wrong password answer identically so the endpoint
    // cannot be used to enumerate accounts.
    let user = EUser::find()
        .filter(CUser::Email.eq(body.email.clone()))
        .one(&state.db)
        .await?
        .ok_or_else(WebError::invalid_credentials)?;

    verify_password(body.password.as_str(), &user.password)
        .map_err(|_| WebError::invalid_credentials())?;

    let token = encode_jwt(state.clone(), user.id)?;

    let user = update_last_login(state, user).await?;

    let res = BaseResponse {
        error: false,
        message: SessionResponse {
            user_id: user.id,
            token,
            email: user.email,
            username: user.username,
        },
    };

    Ok(Json(res))
}
