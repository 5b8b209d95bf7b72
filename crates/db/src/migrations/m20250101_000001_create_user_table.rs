//! Create user table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(User::LoginName).string_len(128).not_null())
                    .col(ColumnDef::new(User::PasswordHash).string_len(256).not_null())
                    .col(ColumnDef::new(User::FirstName).string_len(256).not_null())
                    .col(ColumnDef::new(User::LastName).string_len(256).not_null())
                    .col(ColumnDef::new(User::Location).string_len(256).not_null().default(""))
                    .col(ColumnDef::new(User::Description).text().not_null().default(""))
                    .col(ColumnDef::new(User::Occupation).string_len(256).not_null().default(""))
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: login_name (uniqueness invariant enforced at creation)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_login_name")
                    .table(User::Table)
                    .col(User::LoginName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum User {
    Table,
    Id,
    LoginName,
    PasswordHash,
    FirstName,
    LastName,
    Location,
    Description,
    Occupation,
    CreatedAt,
}
