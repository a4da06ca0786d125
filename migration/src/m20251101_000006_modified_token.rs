use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModifiedToken::Table)
                    .if_not_exists()
                    .col(pk_auto(ModifiedToken::Id))
                    .col(string_uniq(ModifiedToken::Resource))
                    .col(string(ModifiedToken::Token))
                    .col(timestamp(ModifiedToken::CreatedAt))
                    .col(timestamp(ModifiedToken::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModifiedToken::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ModifiedToken {
    Table,
    Id,
    Resource,
    Token,
    CreatedAt,
    UpdatedAt,
}
