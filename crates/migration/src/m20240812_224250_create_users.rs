//! Create `users` table holding one credential record per account.
//!
//! Username uniqueness is enforced by `ix_users_username`; the credential
//! store relies on this index for atomic duplicate detection.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

// Neither column has a length cap: long usernames are valid input.
pub(crate) fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(uuid(Users::Id).primary_key())
        .col(text(Users::Username))
        .col(text(Users::PasswordHash))
        .to_owned()
}

pub(crate) fn username_index() -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .name("ix_users_username")
        .table(Users::Table)
        .col(Users::Username)
        .unique()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await?;
        manager.create_index(username_index()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("ix_users_username").table(Users::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users { Table, Id, Username, PasswordHash }
