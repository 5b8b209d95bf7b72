//! Create photo table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photo::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Photo::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Photo::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Photo::FileName).string_len(512).not_null())
                    .col(
                        ColumnDef::new(Photo::DateTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Photo::Comments).json_binary().not_null().default("[]"))
                    .to_owned(),
            )
            .await?;

        // Composite index: (user_id, id) for a user's photos in upload order
        manager
            .create_index(
                Index::create()
                    .name("idx_photo_user_id_id")
                    .table(Photo::Table)
                    .col(Photo::UserId)
                    .col(Photo::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Photo {
    Table,
    Id,
    UserId,
    FileName,
    DateTime,
    Comments,
}
