/*
 * SPDX-FileCopyrightText: 2025 Showcase Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Improvement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Improvement::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Improvement::Project).uuid().not_null())
                    .col(ColumnDef::new(Improvement::Title).string().not_null())
                    .col(ColumnDef::new(Improvement::Description).text().not_null())
                    .col(ColumnDef::new(Improvement::Status).integer().not_null())
                    .col(ColumnDef::new(Improvement::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Improvement::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-improvement-project")
                            .from(Improvement::Table, Improvement::Project)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-improvement-created_by")
                            .from(Improvement::Table, Improvement::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Improvement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Improvement {
    Table,
    Id,
    Project,
    Title,
    Description,
    Status,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Project {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
