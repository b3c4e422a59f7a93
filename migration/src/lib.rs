/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20250814_000001_create_table_user;
mod m20250814_000002_create_table_project;
mod m20250814_000003_create_table_comment;
mod m20250814_000004_create_table_improvement;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250814_000001_create_table_user::Migration),
            Box::new(m20250814_000002_create_table_project::Migration),
            Box::new(m20250814_000003_create_table_comment::Migration),
            Box::new(m20250814_000004_create_table_improvement::Migration),
        ]
    }
}
