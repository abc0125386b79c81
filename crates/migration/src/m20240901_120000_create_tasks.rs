//! Create `tasks` table: to-do items owned by a row in `users`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240812_224250_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

pub(crate) fn tasks_table() -> TableCreateStatement {
    Table::create()
        .table(Tasks::Table)
        .if_not_exists()
        .col(uuid(Tasks::Id).primary_key())
        .col(text(Tasks::Content))
        .col(boolean(Tasks::IsCompleted).default(false))
        .col(uuid(Tasks::OwnerId))
        .foreign_key(
            ForeignKey::create()
                .name("fk_tasks_owner_id")
                .from(Tasks::Table, Tasks::OwnerId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(tasks_table()).await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_tasks_owner_id")
                    .table(Tasks::Table)
                    .col(Tasks::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("ix_tasks_owner_id").table(Tasks::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Tasks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tasks { Table, Id, Content, IsCompleted, OwnerId }
