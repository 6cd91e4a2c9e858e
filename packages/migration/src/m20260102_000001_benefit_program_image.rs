use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum BenefitPrograms {
    Table,
    ImagePath,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(BenefitPrograms::Table)
                    .add_column(ColumnDef::new(BenefitPrograms::ImagePath).string_len(255).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(BenefitPrograms::Table)
                    .drop_column(BenefitPrograms::ImagePath)
                    .to_owned(),
            )
            .await
    }
}
