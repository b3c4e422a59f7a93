/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use migration::Migrator;
use sea_orm::{
    ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter,
};
use sea_orm_migration::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::log::LevelFilter;
use uuid::Uuid;

use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file).context("Failed to read database url from file")?
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    let mut opt = ConnectOptions::new(db_url);

    if sql_logging_enabled(cli) {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    Ok(db)
}

/// SQL statement logging is opt-in via `--debug` or a debug log level.
pub fn sql_logging_enabled(cli: &Cli) -> bool {
    cli.debug || cli.log_level == "debug"
}

pub async fn get_project_by_id(
    state: Arc<ServerState>,
    project_id: Uuid,
) -> Result<Option<MProject>> {
    Ok(EProject::find_by_id(project_id)
        .one(&state.db)
        .await
        .context("Failed to query project")?)
}

/// Fetches a project only if it is owned by the given user. A missing row and
/// a row owned by someone else are indistinguishable to the caller.
pub async fn get_owned_project(
    state: Arc<ServerState>,
    user_id: Uuid,
    project_id: Uuid,
) -> Result<Option<MProject>> {
    Ok(EProject::find()
        .filter(
            Condition::all()
                .add(CProject::Id.eq(project_id))
                .add(CProject::CreatedBy.eq(user_id)),
        )
        .one(&state.db)
        .await
        .context("Failed to query project")?)
}

pub async fn get_owned_comment(
    state: Arc<ServerState>,
    user_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<MComment>> {
    Ok(EComment::find()
        .filter(
            Condition::all()
                .add(CComment::Id.eq(comment_id))
                .add(CComment::CreatedBy.eq(user_id)),
        )
        .one(&state.db)
        .await
        .context("Failed to query comment")?)
}

pub async fn get_owned_improvement(
    state: Arc<ServerState>,
    user_id: Uuid,
    improvement_id: Uuid,
) -> Result<Option<MImprovement>> {
    Ok(EImprovement::find()
        .filter(
            Condition::all()
                .add(CImprovement::Id.eq(improvement_id))
                .add(CImprovement::CreatedBy.eq(user_id)),
        )
        .one(&state.db)
        .await
        .context("Failed to query improvement")?)
}
