/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use core::database::{get_owned_comment, get_project_by_id};
use core::types::*;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeCommentRequest {
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub project: Uuid,
    pub created_at: chrono::NaiveDateTime,
    pub author: Option<CommentAuthor>,
}

fn to_response(comment: MComment, author: Option<MUser>) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        content: comment.content,
        project: comment.project,
        created_at: comment.created_at,
        author: author.map(|u| CommentAuthor {
            id: u.id,
            username: u.username,
        }),
    }
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Path(project): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<CommentResponse>>>> {
    let project = get_project_by_id(state.0.clone(), project)
        .await?
        .ok_or_else(|| WebError::not_found("Project"))?;

    // Most recent first.
    let comments = EComment::find()
        .filter(CComment::Project.eq(project.id))
        .order_by_desc(CComment::CreatedAt)
        .find_also_related(entity::user::Entity)
        .all(&state.db)
        .await?;

    let comments = comments
        .into_iter()
        .map(|(comment, author)| to_response(comment, author))
        .collect();

    let res = BaseResponse {
        error: false,
        message: comments,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project): Path<Uuid>,
    body: Result<Json<MakeCommentRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<BaseResponse<CommentResponse>>)> {
    let Json(body) = body?;

    if body.content.trim().is_empty() {
        return Err(WebError::BadRequest(
            "Comment content is required".to_string(),
        ));
    }

    let project = get_project_by_id(state.0.clone(), project)
        .await?
        .ok_or_else(|| WebError::not_found("Project"))?;

    let comment = AComment {
        id: Set(Uuid::new_v4()),
        project: Set(project.id),
        content: Set(body.content.clone()),
        created_by: Set(user.id),
        created_at: Set(Utc::now().naive_utc()),
    };

    let comment = comment.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: to_response(comment, Some(user)),
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn delete(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(comment): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    let comment = get_owned_comment(state.0.clone(), user.id, comment)
        .await?
        .ok_or_else(|| WebError::not_found_or_forbidden("Comment"))?;

    comment.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Comment deleted".to_string(),
    };

    Ok(Json(res))
}
