//! Create-if-absent schema built straight from the entity definitions.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};
use tracing::debug;

use crate::entities::{
    barangays, benefit_programs, document_types, issue_categories, municipalities, provinces,
};

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    debug!("schema=table_ready table={}", entity.table_name());
    Ok(())
}

fn composite_indexes() -> [IndexCreateStatement; 2] {
    [
        Index::create()
            .if_not_exists()
            .name("ux_municipalities_province_slug")
            .table(municipalities::Entity)
            .col(municipalities::Column::ProvinceId)
            .col(municipalities::Column::Slug)
            .unique()
            .to_owned(),
        Index::create()
            .if_not_exists()
            .name("ux_barangays_municipality_slug")
            .table(barangays::Entity)
            .col(barangays::Column::MunicipalityId)
            .col(barangays::Column::Slug)
            .unique()
            .to_owned(),
    ]
}

/// Create every table (parents first) and the composite unique indexes.
///
/// Existing tables are left untouched.
pub async fn create_all<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, provinces::Entity).await?;
    create_table(db, &schema, municipalities::Entity).await?;
    create_table(db, &schema, barangays::Entity).await?;
    create_table(db, &schema, document_types::Entity).await?;
    create_table(db, &schema, issue_categories::Entity).await?;
    create_table(db, &schema, benefit_programs::Entity).await?;

    for index in composite_indexes() {
        db.execute(db.get_database_backend().build(&index)).await?;
    }
    Ok(())
}
