/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "Showcase", display_name = "Showcase", bin_name = "showcase-server", author = "Showcase Contributors", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "SHOWCASE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "SHOWCASE_DEBUG", default_value = "false")]
    pub debug: bool,
    #[arg(long, env = "SHOWCASE_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "SHOWCASE_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(
        long,
        env = "SHOWCASE_SERVE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub serve_url: String,
    #[arg(long, env = "SHOWCASE_CORS_ORIGINS")]
    pub cors_origins: Option<String>,
    #[arg(long, env = "SHOWCASE_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "SHOWCASE_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "SHOWCASE_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "SHOWCASE_JWT_EXPIRY_HOURS", value_parser = greater_than_zero::<i64>, default_value = "24")]
    pub jwt_expiry_hours: i64,
    #[arg(long, env = "SHOWCASE_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

pub type EComment = comment::Entity;
pub type EImprovement = improvement::Entity;
pub type EProject = project::Entity;
pub type EUser = user::Entity;

pub type MComment = comment::Model;
pub type MImprovement = improvement::Model;
pub type MProject = project::Model;
pub type MUser = user::Model;

pub type AComment = comment::ActiveModel;
pub type AImprovement = improvement::ActiveModel;
pub type AProject = project::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CComment = comment::Column;
pub type CImprovement = improvement::Column;
pub type CProject = project::Column;
pub type CUser = user::Column;
