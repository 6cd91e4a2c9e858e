use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, IntoIden, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Provinces {
    Table,
    Id,
    Name,
    Slug,
    RegionName,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Municipalities {
    Table,
    Id,
    ProvinceId,
    Name,
    Slug,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Barangays {
    Table,
    Id,
    MunicipalityId,
    Name,
    Slug,
    CreatedAt,
}

#[derive(Iden)]
enum DocumentTypes {
    Table,
    Id,
    Code,
    Name,
    Description,
    AuthorityLevel,
    Requirements,
    Fee,
    ProcessingDays,
    SupportsPhysical,
    SupportsDigital,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum IssueCategories {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Icon,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum BenefitPrograms {
    Table,
    Id,
    Name,
    Code,
    Description,
    ProgramType,
    EligibilityCriteria,
    RequiredDocuments,
    IsActive,
    IsAcceptingApplications,
    CreatedAt,
}

fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn created_at<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // provinces
        manager
            .create_table(
                Table::create()
                    .table(Provinces::Table)
                    .if_not_exists()
                    .col(id_column(Provinces::Id))
                    .col(ColumnDef::new(Provinces::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Provinces::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Provinces::RegionName).string().not_null())
                    .col(
                        ColumnDef::new(Provinces::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(Provinces::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // municipalities
        manager
            .create_table(
                Table::create()
                    .table(Municipalities::Table)
                    .if_not_exists()
                    .col(id_column(Municipalities::Id))
                    .col(ColumnDef::new(Municipalities::ProvinceId).integer().not_null())
                    .col(ColumnDef::new(Municipalities::Name).string().not_null())
                    .col(ColumnDef::new(Municipalities::Slug).string().not_null())
                    .col(
                        ColumnDef::new(Municipalities::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(Municipalities::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_municipalities_province_id")
                            .from(Municipalities::Table, Municipalities::ProvinceId)
                            .to(Provinces::Table, Provinces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_municipalities_province_slug")
                    .table(Municipalities::Table)
                    .col(Municipalities::ProvinceId)
                    .col(Municipalities::Slug)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // barangays
        manager
            .create_table(
                Table::create()
                    .table(Barangays::Table)
                    .if_not_exists()
                    .col(id_column(Barangays::Id))
                    .col(ColumnDef::new(Barangays::MunicipalityId).integer().not_null())
                    .col(ColumnDef::new(Barangays::Name).string().not_null())
                    .col(ColumnDef::new(Barangays::Slug).string().not_null())
                    .col(created_at(Barangays::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_barangays_municipality_id")
                            .from(Barangays::Table, Barangays::MunicipalityId)
                            .to(Municipalities::Table, Municipalities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_barangays_municipality_slug")
                    .table(Barangays::Table)
                    .col(Barangays::MunicipalityId)
                    .col(Barangays::Slug)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // document_types
        manager
            .create_table(
                Table::create()
                    .table(DocumentTypes::Table)
                    .if_not_exists()
                    .col(id_column(DocumentTypes::Id))
                    .col(ColumnDef::new(DocumentTypes::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(DocumentTypes::Name).string().not_null())
                    .col(ColumnDef::new(DocumentTypes::Description).text().null())
                    .col(ColumnDef::new(DocumentTypes::AuthorityLevel).string().not_null())
                    .col(ColumnDef::new(DocumentTypes::Requirements).json().not_null())
                    .col(
                        ColumnDef::new(DocumentTypes::Fee)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(DocumentTypes::ProcessingDays)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(DocumentTypes::SupportsPhysical)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DocumentTypes::SupportsDigital)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DocumentTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(DocumentTypes::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // issue_categories
        manager
            .create_table(
                Table::create()
                    .table(IssueCategories::Table)
                    .if_not_exists()
                    .col(id_column(IssueCategories::Id))
                    .col(ColumnDef::new(IssueCategories::Name).string().not_null())
                    .col(ColumnDef::new(IssueCategories::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(IssueCategories::Description).text().null())
                    .col(ColumnDef::new(IssueCategories::Icon).string().null())
                    .col(
                        ColumnDef::new(IssueCategories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(IssueCategories::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // benefit_programs
        manager
            .create_table(
                Table::create()
                    .table(BenefitPrograms::Table)
                    .if_not_exists()
                    .col(id_column(BenefitPrograms::Id))
                    .col(ColumnDef::new(BenefitPrograms::Name).string().not_null())
                    .col(ColumnDef::new(BenefitPrograms::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(BenefitPrograms::Description).text().not_null())
                    .col(ColumnDef::new(BenefitPrograms::ProgramType).string().not_null())
                    .col(ColumnDef::new(BenefitPrograms::EligibilityCriteria).json().not_null())
                    .col(ColumnDef::new(BenefitPrograms::RequiredDocuments).json().not_null())
                    .col(
                        ColumnDef::new(BenefitPrograms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BenefitPrograms::IsAcceptingApplications)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at(BenefitPrograms::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_table(Table::drop().table(BenefitPrograms::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueCategories::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DocumentTypes::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_barangays_municipality_slug")
                    .table(Barangays::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Barangays::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_municipalities_province_slug")
                    .table(Municipalities::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Municipalities::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Provinces::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
