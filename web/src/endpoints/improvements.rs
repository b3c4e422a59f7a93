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
use core::database::{get_owned_improvement, get_project_by_id};
use core::types::*;
use entity::improvement::ImprovementStatus;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeImprovementRequest {
    pub title: String,
    pub description: String,
    pub status: Option<ImprovementStatus>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchImprovementRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ImprovementStatus>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ImprovementStatus,
    pub project: Uuid,
    pub created_at: chrono::NaiveDateTime,
    pub author: Option<ImprovementAuthor>,
}

fn to_response(improvement: MImprovement, author: Option<MUser>) -> ImprovementResponse {
    ImprovementResponse {
        id: improvement.id,
        title: improvement.title,
        description: improvement.description,
        status: improvement.status,
        project: improvement.project,
        created_at: improvement.created_at,
        author: author.map(|u| ImprovementAuthor {
            id: u.id,
            username: u.username,
        }),
    }
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Path(project): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<ImprovementResponse>>>> {
    let project = get_project_by_id(state.0.clone(), project)
        .await?
        .ok_or_else(|| WebError::not_found("Project"))?;

    let improvements = EImprovement::find()
        .filter(CImprovement::Project.eq(project.id))
        .order_by_desc(CImprovement::CreatedAt)
        .find_also_related(entity::user::Entity)
        .all(&state.db)
        .await?;

    let improvements = improvements
        .into_iter()
        .map(|(improvement, author)| to_response(improvement, author))
        .collect();

    let res = BaseResponse {
        error: false,
        message: improvements,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project): Path<Uuid>,
    body: Result<Json<MakeImprovementRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<BaseResponse<ImprovementResponse>>)> {
    let Json(body) = body?;

    if body.title.trim().is_empty() || body.description.trim().is_empty() {
        return Err(WebError::BadRequest(
            "Improvement title and description are required".to_string(),
        ));
    }

    let project = get_project_by_id(state.0.clone(), project)
        .await?
        .ok_or_else(|| WebError::not_found("Project"))?;

    let improvement = AImprovement {
        id: Set(Uuid::new_v4()),
        project: Set(project.id),
        title: Set(body.title.clone()),
        description: Set(body.description.clone()),
        status: Set(body.status.unwrap_or(ImprovementStatus::Pending)),
        created_by: Set(user.id),
        created_at: Set(Utc::now().naive_utc()),
    };

    let improvement = improvement.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: to_response(improvement, Some(user)),
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(improvement): Path<Uuid>,
    body: Result<Json<PatchImprovementRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<ImprovementResponse>>> {
    let Json(body) = body?;

    let improvement = get_owned_improvement(state.0.clone(), user.id, improvement)
        .await?
        .ok_or_else(|| WebError::not_found_or_forbidden("Improvement"))?;

    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(WebError::BadRequest(
                "Improvement title is required".to_string(),
            ));
        }
    }

    if let Some(description) = &body.description {
        if description.trim().is_empty() {
            return Err(WebError::BadRequest(
                "Improvement description is required".to_string(),
            ));
        }
    }

    let mut aimprovement: AImprovement = improvement.into();

    if let Some(title) = body.title {
        aimprovement.title = Set(title);
    }
    if let Some(description) = body.description {
        aimprovement.description = Set(description);
    }
    if let Some(status) = body.status {
        aimprovement.status = Set(status);
    }

    let improvement = aimprovement.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: to_response(improvement, Some(user)),
    };

    Ok(Json(res))
}

pub async fn delete(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(improvement): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    let improvement = get_owned_improvement(state.0.clone(), user.id, improvement)
        .await?
        .ok_or_else(|| WebError::not_found_or_forbidden("Improvement"))?;

    improvement.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Improvement deleted".to_string(),
    };

    Ok(Json(res))
}
