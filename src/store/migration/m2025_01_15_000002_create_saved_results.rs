use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum SavedResults {
    Table,
    Id,
    OriginalText,
    SimplifiedText,
    TargetAudience,
    OutputFormat,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedResults::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedResults::OriginalText).text().not_null())
                    .col(ColumnDef::new(SavedResults::SimplifiedText).text().not_null())
                    .col(ColumnDef::new(SavedResults::TargetAudience).string().not_null())
                    .col(ColumnDef::new(SavedResults::OutputFormat).string().not_null())
                    .col(
                        ColumnDef::new(SavedResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedResults::Table).to_owned())
            .await
    }
}
