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
use core::database::{get_owned_project, get_project_by_id};
use core::types::*;
use entity::project::ProjectStatus;
use git_url_parse::GitUrl;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MakeProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub repository_url: Option<String>,
    pub source_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PatchProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub repository_url: Option<String>,
}

fn check_repository_url(url: &str) -> WebResult<String> {
    let parsed =
        GitUrl::parse(url).map_err(|_| WebError::BadRequest("Invalid Repository URL".to_string()))?;

    Ok(parsed.to_string())
}

pub async fn get(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<Vec<MProject>>>> {
    let projects = EProject::find().all(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: projects,
    };

    Ok(Json(res))
}

pub async fn get_project(
    state: State<Arc<ServerState>>,
    Path(project): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let project = get_project_by_id(state.0.clone(), project)
        .await?
        .ok_or_else(|| WebError::not_found("Project"))?;

    let res = BaseResponse {
        error: false,
        message: project,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    body: Result<Json<MakeProjectRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<BaseResponse<MProject>>)> {
    let Json(body) = body?;

    if body.title.trim().is_empty() {
        return Err(WebError::BadRequest("Project title is required".to_string()));
    }

    let repository_url = match body.repository_url.as_deref() {
        Some(url) => Some(check_repository_url(url)?),
        None => None,
    };

    let now = Utc::now().naive_utc();
    let project = AProject {
        id: Set(Uuid::new_v4()),
        title: Set(body.title.clone()),
        description: Set(body.description.clone()),
        repository_url: Set(repository_url),
        source_code: Set(body.source_code.clone()),
        status: Set(ProjectStatus::Pending),
        created_by: Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let project = project.insert(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: project,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn put(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project): Path<Uuid>,
    body: Result<Json<PatchProjectRequest>, JsonRejection>,
) -> WebResult<Json<BaseResponse<MProject>>> {
    let Json(body) = body?;

    let project = get_owned_project(state.0.clone(), user.id, project)
        .await?
        .ok_or_else(|| WebError::not_found_or_forbidden("Project"))?;

    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(WebError::BadRequest("Project title is required".to_string()));
        }
    }

    let repository_url = match body.repository_url.as_deref() {
        Some(url) => Some(check_repository_url(url)?),
        None => None,
    };

    let mut aproject: AProject = project.into();

    if let Some(title) = body.title {
        aproject.title = Set(title);
    }
    if let Some(description) = body.description {
        aproject.description = Set(Some(description));
    }
    if let Some(url) = repository_url {
        aproject.repository_url = Set(Some(url));
    }
    aproject.updated_at = Set(Utc::now().naive_utc());

    let project = aproject.update(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: project,
    };

    Ok(Json(res))
}

pub async fn delete(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(project): Path<Uuid>,
) -> WebResult<Json<BaseResponse<String>>> {
    let project = get_owned_project(state.0.clone(), user.id, project)
        .await?
        .ok_or_else(|| WebError::not_found_or_forbidden("Project"))?;

    // Comments and improvements go with it through the cascade constraints.
    project.delete(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: "Project deleted".to_string(),
    };

    Ok(Json(res))
}
