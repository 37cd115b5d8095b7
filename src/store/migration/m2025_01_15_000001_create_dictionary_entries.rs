use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum DictionaryEntries {
    Table,
    Id,
    OriginalTerm,
    SimplifiedTerm,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DictionaryEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DictionaryEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // uniqueness is what makes a second insert of the same term fail
                    .col(
                        ColumnDef::new(DictionaryEntries::OriginalTerm)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DictionaryEntries::SimplifiedTerm).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DictionaryEntries::Table).to_owned())
            .await
    }
}
